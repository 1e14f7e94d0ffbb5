use std::fmt;
use std::str::FromStr;

use lithos_game::{
    Companion, CraftOptions, GameSession, ItemKind, Material, Place, Recipe, Structure,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// One move a policy wants the session to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Explore(Place),
    Craft(Recipe, CraftOptions),
    UseItem {
        index: usize,
        target: Option<Companion>,
    },
    Cook,
    Eat,
    Sleep,
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick the next action given the current session.
    fn next_action(&mut self, session: &GameSession) -> PlayerAction;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameplayStrategy {
    /// Explores every open place in turn and only builds the Furnace.
    Gatherer,
    /// Works toward Revival Potions and revives every companion.
    Artisan,
    /// Picks uniformly among plausible actions.
    Random,
}

impl GameplayStrategy {
    pub const ALL: [Self; 3] = [Self::Gatherer, Self::Artisan, Self::Random];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gatherer => "Gatherer",
            Self::Artisan => "Artisan",
            Self::Random => "Random",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Gatherer => "round-robin exploration, builds the Furnace, never revives",
            Self::Artisan => "goal-directed potion route to revive all three companions",
            Self::Random => "seeded random walk over the available actions",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy> {
        match self {
            Self::Gatherer => Box::new(GathererPolicy::default()),
            Self::Artisan => Box::new(ArtisanPolicy),
            Self::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameplayStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown strategy: {wanted}"))
    }
}

fn item_index(session: &GameSession, kind: ItemKind) -> Option<usize> {
    session
        .crafted_items()
        .iter()
        .position(|item| item.kind() == kind)
}

/// Food upkeep shared by the scripted policies.
fn upkeep(session: &GameSession) -> Option<PlayerAction> {
    let exhausted = session.fullness() == 0 || session.explorations_left() == 0;
    if exhausted && session.material_count(Material::CookedMeat) > 0 {
        return Some(PlayerAction::Eat);
    }
    if session.has_structure(Structure::Furnace) && session.material_count(Material::RawMeat) > 0 {
        return Some(PlayerAction::Cook);
    }
    None
}

#[derive(Default)]
struct GathererPolicy {
    cursor: usize,
}

impl PlayerPolicy for GathererPolicy {
    fn name(&self) -> &'static str {
        "Gatherer"
    }

    fn next_action(&mut self, session: &GameSession) -> PlayerAction {
        if let Some(action) = upkeep(session) {
            return action;
        }
        if session.craftable_recipes().contains(&Recipe::Furnace) {
            return PlayerAction::Craft(Recipe::Furnace, CraftOptions::default());
        }
        if session.explorations_left() == 0 {
            return PlayerAction::Sleep;
        }
        let open = session.unlocked_places();
        let place = open[self.cursor % open.len()];
        self.cursor = self.cursor.wrapping_add(1);
        PlayerAction::Explore(place)
    }
}

struct ArtisanPolicy;

impl ArtisanPolicy {
    /// Kino and Bem first; Akio empties the pack so he goes last.
    fn next_target(session: &GameSession) -> Option<Companion> {
        let revived = session.state().companions.ever_revived();
        [Companion::Kino, Companion::Bem, Companion::Akio]
            .into_iter()
            .find(|companion| !revived.contains(companion))
    }

    fn craft_step(session: &GameSession) -> Option<PlayerAction> {
        let craftable = session.craftable_recipes();
        let platinum = session.material_count(Material::Platinum) > 0;
        let priority = [
            Recipe::AlchemyTable,
            Recipe::RevivalPotion,
            Recipe::Ferment,
            Recipe::Furnace,
        ];
        let recipe = priority
            .into_iter()
            .find(|recipe| craftable.contains(recipe))?;
        if recipe == Recipe::Ferment && session.material_count(Material::Alcohol) > 0 {
            return None;
        }
        let options = CraftOptions {
            use_platinum: recipe == Recipe::RevivalPotion && platinum,
        };
        Some(PlayerAction::Craft(recipe, options))
    }

    fn pick_place(session: &GameSession) -> Place {
        let open = session.unlocked_places();
        let has_table = session.has_structure(Structure::AlchemyTable);
        let wants = |material: Material| session.material_count(material) == 0;

        if !session.has_map_fragment() {
            return Place::Forest;
        }
        if !has_table && wants(Material::Painite) {
            return if open.contains(&Place::DeepSeaShore) {
                Place::DeepSeaShore
            } else {
                Place::Cave
            };
        }
        if !has_table && (wants(Material::Wood) || wants(Material::Stone)) {
            return Place::Forest;
        }
        if wants(Material::NitricAcid) {
            return Place::Cave;
        }
        if wants(Material::Alcohol) && wants(Material::Grapes) {
            return Place::Forest;
        }
        Place::Cave
    }
}

impl PlayerPolicy for ArtisanPolicy {
    fn name(&self) -> &'static str {
        "Artisan"
    }

    fn next_action(&mut self, session: &GameSession) -> PlayerAction {
        if let (Some(index), Some(target)) = (
            item_index(session, ItemKind::RevivalPotion),
            Self::next_target(session),
        ) {
            return PlayerAction::UseItem {
                index,
                target: Some(target),
            };
        }
        if let Some(action) = upkeep(session).or_else(|| Self::craft_step(session)) {
            return action;
        }
        if session.explorations_left() == 0 {
            return PlayerAction::Sleep;
        }
        PlayerAction::Explore(Self::pick_place(session))
    }
}

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn next_action(&mut self, session: &GameSession) -> PlayerAction {
        let mut options: Vec<PlayerAction> = session
            .craftable_recipes()
            .into_iter()
            .map(|recipe| PlayerAction::Craft(recipe, CraftOptions::default()))
            .collect();
        let items = session.crafted_items().len();
        if items > 0 {
            let index = self.rng.gen_range(0..items);
            let target = Companion::ALL.choose(&mut self.rng).copied();
            options.push(PlayerAction::UseItem { index, target });
        }
        if session.material_count(Material::CookedMeat) > 0 {
            options.push(PlayerAction::Eat);
        }
        if session.material_count(Material::RawMeat) > 0 {
            options.push(PlayerAction::Cook);
        }
        if session.explorations_left() > 0 {
            for place in session.unlocked_places() {
                // Weighted toward exploring.
                options.push(PlayerAction::Explore(place));
                options.push(PlayerAction::Explore(place));
            }
        } else {
            options.push(PlayerAction::Sleep);
        }
        options
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PlayerAction::Sleep)
    }
}

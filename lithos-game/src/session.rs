//! The public state-transition API.
use std::collections::BTreeMap;

use crate::companion::{Companion, CompanionState};
use crate::config::{ConfigError, GameConfig};
use crate::crafting::{self, CraftOptions, CraftReport, Recipe};
use crate::day::DaySummary;
use crate::error::GameError;
use crate::events::EventTags;
use crate::explore::{self, ExploreReport};
use crate::inventory::{CraftedItem, Structure};
use crate::material::Material;
use crate::place::{Place, PlaceCatalog};
use crate::rng::RngBundle;
use crate::seed::decode_to_seed;
use crate::state::GameState;
use crate::tools::{self, ItemReport};
use crate::weather::Weather;

/// One playthrough: state, tuning and the seeded random streams.
///
/// Every operation validates before it mutates, so an `Err` leaves the
/// session exactly as it was.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    cfg: GameConfig,
    catalog: PlaceCatalog,
    rngs: RngBundle,
    seed: u64,
}

impl GameSession {
    /// Fresh session with the default tuning and drop tables.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::build(seed, GameConfig::default(), PlaceCatalog::default_catalog())
    }

    /// Fresh session with custom tuning and drop tables.
    ///
    /// # Errors
    ///
    /// Returns the first rule the configuration breaks.
    pub fn with_config(seed: u64, cfg: GameConfig, catalog: PlaceCatalog) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::build(seed, cfg, catalog))
    }

    /// Fresh default session seeded from an `LT-` share code.
    #[must_use]
    pub fn from_share_code(code: &str) -> Option<Self> {
        decode_to_seed(code).map(Self::new)
    }

    fn build(seed: u64, cfg: GameConfig, catalog: PlaceCatalog) -> Self {
        log::debug!("new session with seed {seed}");
        Self {
            state: GameState::new(&cfg),
            cfg,
            catalog,
            rngs: RngBundle::from_user_seed(seed),
            seed,
        }
    }

    // Operations -------------------------------------------------------------

    /// Explore the place named by `token` (menu number or name).
    ///
    /// Successful attempts also burn `fullness_decay`, including Akio's
    /// free wipes.
    ///
    /// # Errors
    ///
    /// `ExhaustedForToday`, `UnknownInput` or `LocationLocked`.
    pub fn explore(&mut self, token: &str) -> Result<ExploreReport, GameError> {
        let report = explore::explore_place(
            &mut self.state,
            &self.cfg,
            &self.catalog,
            token,
            &mut self.rngs,
        )?;
        self.state.inventory.decrease_fullness(self.cfg.fullness_decay);
        Ok(report)
    }

    /// Craft a recipe.
    ///
    /// # Errors
    ///
    /// `StructureRequired`, `AlreadyBuilt` or `InsufficientMaterials`.
    pub fn craft(&mut self, recipe: Recipe, options: CraftOptions) -> Result<CraftReport, GameError> {
        crafting::craft(&mut self.state, &self.cfg, recipe, options, self.rngs.craft())
    }

    /// Craft by player token, e.g. `"batea"` or `"Alchemy Table"`.
    ///
    /// # Errors
    ///
    /// `UnknownInput` for an unrecognized token, otherwise as [`Self::craft`].
    pub fn craft_token(&mut self, token: &str, options: CraftOptions) -> Result<CraftReport, GameError> {
        let recipe: Recipe = token.parse()?;
        self.craft(recipe, options)
    }

    pub fn sleep(&mut self) -> DaySummary {
        self.state.days.sleep(self.rngs.weather())
    }

    /// Revive a companion directly, without spending a potion.
    pub fn revive_companion(&mut self, companion: Companion) -> EventTags {
        self.state
            .companions
            .revive(companion, &mut self.state.inventory)
    }

    /// Use the crafted item at `index` (0-based).
    ///
    /// # Errors
    ///
    /// `NoSuchItem` or `TargetRequired`.
    pub fn use_item(&mut self, index: usize, target: Option<Companion>) -> Result<ItemReport, GameError> {
        tools::use_item(&mut self.state, &self.cfg, index, target, self.rngs.tools())
    }

    /// # Errors
    ///
    /// `NoPotion` when no Revival Potion is carried.
    pub fn revive_with_potion(&mut self, companion: Companion) -> Result<ItemReport, GameError> {
        tools::revive_with_potion(&mut self.state, companion)
    }

    /// # Errors
    ///
    /// `StructureRequired` or `InsufficientMaterials`.
    pub fn cook(&mut self) -> Result<EventTags, GameError> {
        tools::cook(&mut self.state)
    }

    /// # Errors
    ///
    /// `InsufficientMaterials` without Cooked Meat.
    pub fn eat(&mut self) -> Result<EventTags, GameError> {
        tools::eat(&mut self.state)
    }

    // Queries ----------------------------------------------------------------

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn explorations_left(&self) -> u32 {
        self.state.days.explorations_left()
    }

    #[must_use]
    pub const fn current_day(&self) -> u32 {
        self.state.days.current_day()
    }

    #[must_use]
    pub const fn today_weather(&self) -> Weather {
        self.state.days.today_weather()
    }

    #[must_use]
    pub fn material_count(&self, material: Material) -> u32 {
        self.state.inventory.material_count(material)
    }

    #[must_use]
    pub const fn materials(&self) -> &BTreeMap<Material, u32> {
        self.state.inventory.materials()
    }

    #[must_use]
    pub fn crafted_items(&self) -> &[CraftedItem] {
        self.state.inventory.crafted_items()
    }

    #[must_use]
    pub fn has_structure(&self, structure: Structure) -> bool {
        self.state.inventory.has_structure(structure)
    }

    #[must_use]
    pub const fn fullness(&self) -> u32 {
        self.state.inventory.fullness()
    }

    #[must_use]
    pub const fn companion(&self) -> CompanionState {
        self.state.companions.state()
    }

    #[must_use]
    pub const fn has_map_fragment(&self) -> bool {
        self.state.map_fragment
    }

    /// Places that can be explored today.
    #[must_use]
    pub fn unlocked_places(&self) -> Vec<Place> {
        Place::ALL
            .into_iter()
            .filter(|place| {
                place
                    .lock_reason(
                        self.current_day(),
                        self.state.map_fragment,
                        self.cfg.deep_sea_unlock_day,
                    )
                    .is_none()
            })
            .collect()
    }

    #[must_use]
    pub fn craftable_recipes(&self) -> Vec<Recipe> {
        crafting::craftable_recipes(&self.state)
    }

    /// Every companion has been revived at least once.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.state.companions.all_revived()
    }

    /// Total random draws made so far across all streams.
    #[must_use]
    pub const fn rng_draws(&self) -> u64 {
        self.rngs.total_draws()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explore_applies_fullness_decay() {
        let cfg = GameConfig {
            hazard_pct: 0,
            ..GameConfig::default()
        };
        let mut session =
            GameSession::with_config(11, cfg, PlaceCatalog::default_catalog()).unwrap();
        let start = session.fullness();
        session.explore("river").unwrap();
        assert_eq!(session.fullness(), start - 1);
        assert_eq!(session.explorations_left(), 9);
    }

    #[test]
    fn failed_explore_changes_nothing() {
        let mut session = GameSession::new(12);
        let before = session.state().clone();
        assert!(session.explore("6").is_err());
        assert!(session.explore("cave").unwrap_err().is_locked());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn with_config_rejects_bad_tuning() {
        let cfg = GameConfig {
            max_explorations: 0,
            ..GameConfig::default()
        };
        assert!(GameSession::with_config(1, cfg, PlaceCatalog::default_catalog()).is_err());
    }

    #[test]
    fn share_codes_seed_sessions() {
        let session = GameSession::from_share_code("LT-BEM21").unwrap();
        assert_eq!(Some(session.seed()), decode_to_seed("LT-BEM21"));
        assert!(GameSession::from_share_code("XX-BEM21").is_none());
    }

    #[test]
    fn unlocks_follow_day_and_map() {
        let mut session = GameSession::new(13);
        assert_eq!(
            session.unlocked_places(),
            vec![Place::River, Place::Forest, Place::RockyBeach]
        );
        for _ in 0..4 {
            session.sleep();
        }
        assert!(session.unlocked_places().contains(&Place::DeepSeaShore));
        assert!(!session.unlocked_places().contains(&Place::Cave));
    }

    #[test]
    fn win_needs_all_three_revivals() {
        let mut session = GameSession::new(14);
        session.revive_companion(Companion::Kino);
        session.revive_companion(Companion::Bem);
        assert!(!session.has_won());
        session.revive_companion(Companion::Akio);
        assert!(session.has_won());
        assert_eq!(session.companion(), CompanionState::Revived(Companion::Akio));
    }
}

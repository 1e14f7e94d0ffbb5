//! Recipes and the shared craft success policy.
//!
//! Every recipe goes through [`craft`]: requirements are validated first,
//! then the cost is deducted, then the success roll decides whether the
//! product appears. The cost is spent either way, except for fermentation
//! which never fails.
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::config::GameConfig;
use crate::constants::{
    LOG_CRAFT_FAILURE, LOG_CRAFT_GUARANTEED, LOG_CRAFT_PLATINUM, LOG_CRAFT_SUCCESS,
};
use crate::error::GameError;
use crate::events::{EventTag, EventTags};
use crate::inventory::{CraftedItem, ItemKind, Structure};
use crate::material::Material;
use crate::rng::percent_hit;
use crate::state::GameState;

/// Materials spent by one craft, in recipe order.
pub type RecipeCost = SmallVec<[(Material, u32); 3]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipe {
    Furnace,
    AlchemyTable,
    WoodenBatea,
    Spear,
    /// Grapes into Alcohol at the Alchemy Table.
    Ferment,
    RevivalPotion,
}

impl Recipe {
    pub const ALL: [Self; 6] = [
        Self::Furnace,
        Self::AlchemyTable,
        Self::WoodenBatea,
        Self::Spear,
        Self::Ferment,
        Self::RevivalPotion,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Furnace => "Furnace",
            Self::AlchemyTable => "Alchemy Table",
            Self::WoodenBatea => "Wooden Batea",
            Self::Spear => "Spear",
            Self::Ferment => "Ferment",
            Self::RevivalPotion => "Revival Potion",
        }
    }

    const fn short_token(self) -> &'static str {
        match self {
            Self::Furnace => "furnace",
            Self::AlchemyTable => "alchemy",
            Self::WoodenBatea => "batea",
            Self::Spear => "spear",
            Self::Ferment => "grapes",
            Self::RevivalPotion => "potion",
        }
    }

    /// Structure that must already stand before this recipe can be attempted.
    #[must_use]
    pub const fn required_structure(self) -> Option<Structure> {
        match self {
            Self::Ferment | Self::RevivalPotion => Some(Structure::AlchemyTable),
            _ => None,
        }
    }

    /// Structure this recipe builds, if it is a one-time build.
    #[must_use]
    pub const fn builds(self) -> Option<Structure> {
        match self {
            Self::Furnace => Some(Structure::Furnace),
            Self::AlchemyTable => Some(Structure::AlchemyTable),
            _ => None,
        }
    }

    /// Fermentation always succeeds.
    #[must_use]
    pub const fn rolls_for_success(self) -> bool {
        !matches!(self, Self::Ferment)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Recipe {
    type Err = GameError;

    /// Accepts the full name, a short token (`batea`, `potion`, ...) or the
    /// 1-based menu position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', " ");
        Self::ALL
            .into_iter()
            .enumerate()
            .find(|(idx, recipe)| {
                wanted == recipe.name().to_ascii_lowercase()
                    || wanted == recipe.short_token()
                    || wanted == (idx + 1).to_string()
            })
            .map(|(_, recipe)| recipe)
            .ok_or_else(|| GameError::UnknownInput(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CraftOptions {
    /// Spend one Platinum on a Revival Potion for a second potion.
    pub use_platinum: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Structure(Structure),
    Item { item: ItemKind, count: u32 },
    Material { material: Material, count: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftResult {
    Success(Product),
    Failure,
}

impl CraftResult {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftReport {
    pub recipe: Recipe,
    pub result: CraftResult,
    pub consumed: RecipeCost,
    pub events: EventTags,
}

/// Materials a recipe spends with the given options.
#[must_use]
pub fn recipe_cost(recipe: Recipe, options: CraftOptions) -> RecipeCost {
    let mut cost = RecipeCost::new();
    match recipe {
        Recipe::Furnace => cost.push((Material::Stone, 3)),
        Recipe::AlchemyTable => {
            cost.push((Material::Stone, 1));
            cost.push((Material::Wood, 1));
            cost.push((Material::Painite, 1));
        }
        Recipe::WoodenBatea => cost.push((Material::Wood, 3)),
        Recipe::Spear => {
            cost.push((Material::Wood, 1));
            cost.push((Material::Stone, 1));
        }
        Recipe::Ferment => cost.push((Material::Grapes, 1)),
        Recipe::RevivalPotion => {
            cost.push((Material::NitricAcid, 1));
            cost.push((Material::Alcohol, 1));
            if options.use_platinum {
                cost.push((Material::Platinum, 1));
            }
        }
    }
    cost
}

/// The single success policy shared by every recipe.
pub fn craft_success<R: Rng + ?Sized>(guaranteed: bool, cfg: &GameConfig, rng: &mut R) -> bool {
    guaranteed || percent_hit(rng, i32::try_from(cfg.craft_success_pct).unwrap_or(i32::MAX))
}

fn validate(state: &GameState, recipe: Recipe, options: CraftOptions) -> Result<RecipeCost, GameError> {
    let inventory = &state.inventory;
    if let Some(structure) = recipe.required_structure()
        && !inventory.has_structure(structure)
    {
        return Err(GameError::StructureRequired {
            action: recipe.name(),
            structure,
        });
    }
    if let Some(structure) = recipe.builds()
        && inventory.has_structure(structure)
    {
        return Err(GameError::AlreadyBuilt(structure));
    }
    let cost = recipe_cost(recipe, options);
    if let Some(shortfall) = inventory.first_shortfall(&cost) {
        return Err(shortfall.into_error(recipe.name()));
    }
    Ok(cost)
}

/// Attempt a recipe.
///
/// # Errors
///
/// `StructureRequired`, `AlreadyBuilt` and `InsufficientMaterials`, checked in
/// that order. Nothing is spent when an error is returned.
pub fn craft<R: Rng + ?Sized>(
    state: &mut GameState,
    cfg: &GameConfig,
    recipe: Recipe,
    options: CraftOptions,
    rng: &mut R,
) -> Result<CraftReport, GameError> {
    let cost = validate(state, recipe, options)?;
    state
        .inventory
        .remove_all(&cost)
        .map_err(|shortfall| shortfall.into_error(recipe.name()))?;

    let mut events = EventTags::new();
    let guaranteed = state.companions.guaranteed_craft();
    let succeeded = if recipe.rolls_for_success() {
        if guaranteed {
            events.push(EventTag::new(LOG_CRAFT_GUARANTEED));
        }
        craft_success(guaranteed, cfg, rng)
    } else {
        true
    };

    let result = if succeeded {
        let product = deliver(state, recipe, options, &mut events);
        events.push(EventTag::new(LOG_CRAFT_SUCCESS));
        log::info!("crafted {recipe}");
        CraftResult::Success(product)
    } else {
        events.push(EventTag::new(LOG_CRAFT_FAILURE));
        log::info!("crafting {recipe} failed; materials lost");
        CraftResult::Failure
    };

    Ok(CraftReport {
        recipe,
        result,
        consumed: cost,
        events,
    })
}

fn deliver(
    state: &mut GameState,
    recipe: Recipe,
    options: CraftOptions,
    events: &mut EventTags,
) -> Product {
    let inventory = &mut state.inventory;
    let item = |kind: ItemKind, count: u32| Product::Item { item: kind, count };
    match recipe {
        Recipe::Furnace => {
            inventory.register_structure(Structure::Furnace);
            Product::Structure(Structure::Furnace)
        }
        Recipe::AlchemyTable => {
            inventory.register_structure(Structure::AlchemyTable);
            Product::Structure(Structure::AlchemyTable)
        }
        Recipe::WoodenBatea => {
            inventory.add_crafted_item(CraftedItem::new(ItemKind::WoodenBatea));
            item(ItemKind::WoodenBatea, 1)
        }
        Recipe::Spear => {
            inventory.add_crafted_item(CraftedItem::new(ItemKind::Spear));
            item(ItemKind::Spear, 1)
        }
        Recipe::Ferment => {
            inventory.add_material(Material::Alcohol, 1);
            Product::Material {
                material: Material::Alcohol,
                count: 1,
            }
        }
        Recipe::RevivalPotion => {
            let count = if options.use_platinum {
                events.push(EventTag::new(LOG_CRAFT_PLATINUM));
                2
            } else {
                1
            };
            for _ in 0..count {
                inventory.add_crafted_item(CraftedItem::new(ItemKind::RevivalPotion));
            }
            item(ItemKind::RevivalPotion, count)
        }
    }
}

/// Recipes whose requirements are met right now, without platinum.
#[must_use]
pub fn craftable_recipes(state: &GameState) -> Vec<Recipe> {
    Recipe::ALL
        .into_iter()
        .filter(|recipe| validate(state, *recipe, CraftOptions::default()).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companion::Companion;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn forced() -> GameConfig {
        GameConfig {
            craft_success_pct: 100,
            ..GameConfig::default()
        }
    }

    #[test]
    fn recipe_tokens_parse() {
        assert_eq!("Furnace".parse::<Recipe>(), Ok(Recipe::Furnace));
        assert_eq!("alchemy".parse::<Recipe>(), Ok(Recipe::AlchemyTable));
        assert_eq!("wooden_batea".parse::<Recipe>(), Ok(Recipe::WoodenBatea));
        assert_eq!("potion".parse::<Recipe>(), Ok(Recipe::RevivalPotion));
        assert_eq!("4".parse::<Recipe>(), Ok(Recipe::Spear));
        assert!("anvil".parse::<Recipe>().is_err());
    }

    #[test]
    fn furnace_builds_once() {
        let cfg = forced();
        let mut state = GameState::new(&cfg);
        let mut rng = SmallRng::seed_from_u64(1);
        state.inventory.add_material(Material::Stone, 3);

        let report = craft(&mut state, &cfg, Recipe::Furnace, CraftOptions::default(), &mut rng).unwrap();
        assert_eq!(report.result, CraftResult::Success(Product::Structure(Structure::Furnace)));
        assert_eq!(state.inventory.material_count(Material::Stone), 0);
        assert!(state.inventory.has_structure(Structure::Furnace));

        assert_eq!(
            craft(&mut state, &cfg, Recipe::Furnace, CraftOptions::default(), &mut rng),
            Err(GameError::AlreadyBuilt(Structure::Furnace))
        );
    }

    #[test]
    fn already_built_wins_over_missing_materials() {
        let cfg = forced();
        let mut state = GameState::new(&cfg);
        state.inventory.register_structure(Structure::AlchemyTable);
        let mut rng = SmallRng::seed_from_u64(2);
        assert_eq!(
            craft(&mut state, &cfg, Recipe::AlchemyTable, CraftOptions::default(), &mut rng),
            Err(GameError::AlreadyBuilt(Structure::AlchemyTable))
        );
    }

    #[test]
    fn alchemy_recipes_need_the_table() {
        let cfg = forced();
        let mut state = GameState::new(&cfg);
        state.inventory.add_material(Material::Grapes, 2);
        let before = state.clone();
        let mut rng = SmallRng::seed_from_u64(3);
        let err = craft(&mut state, &cfg, Recipe::Ferment, CraftOptions::default(), &mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::StructureRequired {
                action: "Ferment",
                structure: Structure::AlchemyTable
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn shortfall_names_the_first_missing_material() {
        let cfg = forced();
        let mut state = GameState::new(&cfg);
        state.inventory.add_material(Material::Wood, 2);
        let mut rng = SmallRng::seed_from_u64(4);
        assert_eq!(
            craft(&mut state, &cfg, Recipe::WoodenBatea, CraftOptions::default(), &mut rng),
            Err(GameError::InsufficientMaterials {
                action: "Wooden Batea",
                material: Material::Wood,
                needed: 3,
                available: 2,
            })
        );
        assert_eq!(state.inventory.material_count(Material::Wood), 2);
    }

    #[test]
    fn bem_guarantees_a_thousand_crafts() {
        let cfg = GameConfig {
            craft_success_pct: 0,
            ..GameConfig::default()
        };
        let mut state = GameState::new(&cfg);
        state.companions.revive(Companion::Bem, &mut state.inventory);
        state.inventory.add_material(Material::Wood, 1000);
        state.inventory.add_material(Material::Stone, 1000);
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..1000 {
            let report = craft(&mut state, &cfg, Recipe::Spear, CraftOptions::default(), &mut rng).unwrap();
            assert!(report.result.is_success());
        }
        assert_eq!(state.inventory.count_items(ItemKind::Spear), 1000);
    }

    #[test]
    fn failed_crafts_still_spend_materials() {
        let cfg = GameConfig {
            craft_success_pct: 0,
            ..GameConfig::default()
        };
        let mut state = GameState::new(&cfg);
        state.inventory.add_material(Material::Wood, 3);
        let mut rng = SmallRng::seed_from_u64(6);
        let report = craft(&mut state, &cfg, Recipe::WoodenBatea, CraftOptions::default(), &mut rng).unwrap();
        assert_eq!(report.result, CraftResult::Failure);
        assert_eq!(state.inventory.material_count(Material::Wood), 0);
        assert_eq!(state.inventory.crafted_count(), 0);
    }

    #[test]
    fn fermentation_never_fails() {
        let cfg = GameConfig {
            craft_success_pct: 0,
            ..GameConfig::default()
        };
        let mut state = GameState::new(&cfg);
        state.inventory.register_structure(Structure::AlchemyTable);
        state.inventory.add_material(Material::Grapes, 20);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let report = craft(&mut state, &cfg, Recipe::Ferment, CraftOptions::default(), &mut rng).unwrap();
            assert!(report.result.is_success());
        }
        assert_eq!(state.inventory.material_count(Material::Alcohol), 20);
        assert!(!state.inventory.has_material(Material::Grapes));
    }

    #[test]
    fn platinum_doubles_potions() {
        let cfg = forced();
        let mut state = GameState::new(&cfg);
        state.inventory.register_structure(Structure::AlchemyTable);
        state.inventory.add_material(Material::NitricAcid, 2);
        state.inventory.add_material(Material::Alcohol, 2);
        let mut rng = SmallRng::seed_from_u64(8);

        let with_platinum = CraftOptions { use_platinum: true };
        assert!(matches!(
            craft(&mut state, &cfg, Recipe::RevivalPotion, with_platinum, &mut rng),
            Err(GameError::InsufficientMaterials {
                material: Material::Platinum,
                ..
            })
        ));

        state.inventory.add_material(Material::Platinum, 1);
        let report = craft(&mut state, &cfg, Recipe::RevivalPotion, with_platinum, &mut rng).unwrap();
        assert_eq!(
            report.result,
            CraftResult::Success(Product::Item {
                item: ItemKind::RevivalPotion,
                count: 2
            })
        );
        assert_eq!(state.inventory.count_items(ItemKind::RevivalPotion), 2);
        assert!(!state.inventory.has_material(Material::Platinum));
    }

    #[test]
    fn craftable_list_tracks_inventory() {
        let cfg = forced();
        let mut state = GameState::new(&cfg);
        assert!(craftable_recipes(&state).is_empty());
        state.inventory.add_material(Material::Stone, 3);
        state.inventory.add_material(Material::Wood, 1);
        assert_eq!(craftable_recipes(&state), vec![Recipe::Furnace, Recipe::Spear]);
        state.inventory.register_structure(Structure::Furnace);
        assert_eq!(craftable_recipes(&state), vec![Recipe::Spear]);
    }

    #[test]
    fn baseline_success_rate_is_near_seventy_percent() {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let hits = (0..20_000)
            .filter(|_| craft_success(false, &cfg, &mut rng))
            .count();
        assert!((13_400..14_600).contains(&hits), "hits {hits}");
    }
}

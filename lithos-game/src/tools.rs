//! Using crafted items, cooking and eating.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::companion::Companion;
use crate::config::GameConfig;
use crate::constants::{
    LOG_COOK, LOG_EAT, LOG_HUNT, LOG_PAN_EMPTY, LOG_PAN_GOLD, LOG_PAN_PLATINUM, LOG_POTION,
};
use crate::error::GameError;
use crate::events::{EventTag, EventTags};
use crate::inventory::{ItemKind, Structure};
use crate::material::Material;
use crate::rng::percent_hit;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOutcome {
    Panned,
    Hunted,
    Revived(Companion),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    pub item: ItemKind,
    pub outcome: ItemOutcome,
    pub found: Vec<Material>,
    pub events: EventTags,
}

/// Use the crafted item at `index`.
///
/// The Wooden Batea stays in the inventory; Spears and Revival Potions are
/// used up. `target` is only read by Revival Potions.
///
/// # Errors
///
/// `NoSuchItem` for an index past the end, `TargetRequired` for a potion
/// without a companion.
pub fn use_item<R: Rng + ?Sized>(
    state: &mut GameState,
    cfg: &GameConfig,
    index: usize,
    target: Option<Companion>,
    rng: &mut R,
) -> Result<ItemReport, GameError> {
    let kind = state
        .inventory
        .crafted_items()
        .get(index)
        .map(|item| item.kind())
        .ok_or(GameError::NoSuchItem { index })?;

    let potion_target = match (kind, target) {
        (ItemKind::RevivalPotion, None) => {
            return Err(GameError::TargetRequired { item: kind.name() });
        }
        (ItemKind::RevivalPotion, Some(companion)) => Some(companion),
        _ => None,
    };

    if !kind.is_reusable() {
        state.inventory.take_crafted_item(index);
    }

    Ok(match potion_target {
        Some(companion) => drink_potion(state, companion),
        None if kind == ItemKind::Spear => hunt(state),
        None => pan_for_gold(state, cfg, rng),
    })
}

/// Revive `companion` with the first Revival Potion in the inventory.
///
/// # Errors
///
/// `NoPotion` when there is none.
pub fn revive_with_potion(state: &mut GameState, companion: Companion) -> Result<ItemReport, GameError> {
    let index = state
        .inventory
        .position_of(ItemKind::RevivalPotion)
        .ok_or(GameError::NoPotion)?;
    state.inventory.take_crafted_item(index);
    Ok(drink_potion(state, companion))
}

/// Turn one Raw Meat into Cooked Meat at the Furnace.
///
/// # Errors
///
/// `StructureRequired` without a Furnace, `InsufficientMaterials` without Raw Meat.
pub fn cook(state: &mut GameState) -> Result<EventTags, GameError> {
    if !state.inventory.has_structure(Structure::Furnace) {
        return Err(GameError::StructureRequired {
            action: "Cook",
            structure: Structure::Furnace,
        });
    }
    state
        .inventory
        .remove_material(Material::RawMeat, 1)
        .map_err(|shortfall| shortfall.into_error("Cook"))?;
    state.inventory.add_material(Material::CookedMeat, 1);
    log::debug!("cooked one Raw Meat");
    Ok(smallvec::smallvec![EventTag::new(LOG_COOK)])
}

/// Eat one Cooked Meat: fullness back to max and today's budget refilled.
///
/// # Errors
///
/// `InsufficientMaterials` without Cooked Meat.
pub fn eat(state: &mut GameState) -> Result<EventTags, GameError> {
    state
        .inventory
        .remove_material(Material::CookedMeat, 1)
        .map_err(|shortfall| shortfall.into_error("Eat"))?;
    state.inventory.restore_fullness();
    state.days.reset_exploration_limit();
    log::info!(
        "ate Cooked Meat; fullness {} and {} explorations available",
        state.inventory.fullness(),
        state.days.explorations_left()
    );
    Ok(smallvec::smallvec![EventTag::new(LOG_EAT)])
}

fn yield_units(state: &GameState) -> u32 {
    if state.inventory.double_yield() { 2 } else { 1 }
}

fn pan_for_gold<R: Rng + ?Sized>(state: &mut GameState, cfg: &GameConfig, rng: &mut R) -> ItemReport {
    let units = yield_units(state);
    let mut events = EventTags::new();
    let mut found = Vec::new();
    let gold_hit = percent_hit(rng, i32::try_from(cfg.gold_pan_pct).unwrap_or(i32::MAX));
    let platinum_hit = percent_hit(rng, i32::try_from(cfg.platinum_pan_pct).unwrap_or(i32::MAX));
    for (hit, material, key) in [
        (gold_hit, Material::Gold, LOG_PAN_GOLD),
        (platinum_hit, Material::Platinum, LOG_PAN_PLATINUM),
    ] {
        if hit {
            state.inventory.add_material(material, units);
            found.extend(std::iter::repeat_n(material, units as usize));
            events.push(EventTag::new(key));
        }
    }
    if found.is_empty() {
        events.push(EventTag::new(LOG_PAN_EMPTY));
    }
    ItemReport {
        item: ItemKind::WoodenBatea,
        outcome: ItemOutcome::Panned,
        found,
        events,
    }
}

fn hunt(state: &mut GameState) -> ItemReport {
    let units = yield_units(state);
    state.inventory.add_material(Material::RawMeat, units);
    log::debug!("hunt brought back {units} Raw Meat");
    ItemReport {
        item: ItemKind::Spear,
        outcome: ItemOutcome::Hunted,
        found: std::iter::repeat_n(Material::RawMeat, units as usize).collect(),
        events: smallvec::smallvec![EventTag::new(LOG_HUNT)],
    }
}

fn drink_potion(state: &mut GameState, companion: Companion) -> ItemReport {
    let mut events: EventTags = smallvec::smallvec![EventTag::new(LOG_POTION)];
    events.extend(state.companions.revive(companion, &mut state.inventory));
    ItemReport {
        item: ItemKind::RevivalPotion,
        outcome: ItemOutcome::Revived(companion),
        found: Vec::new(),
        events,
    }
}

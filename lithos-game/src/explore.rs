//! One exploration attempt, from place resolution to loot.
use serde::{Deserialize, Serialize};

use crate::companion::Companion;
use crate::config::GameConfig;
use crate::constants::{
    LOG_AKIO_THEFT, LOG_AKIO_WIPE, LOG_DEEP_SEA_BONUS, LOG_DEEP_SEA_SCAN, LOG_EXPLORE_BEM_ESCORT,
    LOG_EXPLORE_DOUBLED, LOG_EXPLORE_FOUND, LOG_EXPLORE_NOTHING, LOG_EXPLORE_START, LOG_HAZARD,
    LOG_HAZARD_EXHAUSTED, LOG_HAZARD_ITEM, LOG_HAZARD_MEAT, LOG_HAZARD_STONE,
};
use crate::drops::{DropRoll, check_hazard, get_materials};
use crate::error::GameError;
use crate::events::{EventTag, EventTags};
use crate::inventory::CraftedItem;
use crate::material::Material;
use crate::place::{Place, PlaceCatalog};
use crate::rng::{RngBundle, percent_hit};
use crate::state::GameState;

/// What a hazard took from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardLoss {
    Stone,
    CookedMeat,
    CraftedItem(CraftedItem),
    Fullness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExploreOutcome {
    Gathered,
    NothingFound,
    Hazard(HazardLoss),
    AkioTheft(CraftedItem),
    /// Akio emptied the pack again; the attempt is not counted.
    AkioWipe,
}

impl ExploreOutcome {
    /// Whether the attempt was charged against today's budget.
    #[must_use]
    pub const fn consumes_budget(self) -> bool {
        !matches!(self, Self::AkioWipe)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreReport {
    pub place: Place,
    pub outcome: ExploreOutcome,
    /// Units added to the inventory, after any doubling. Key items are
    /// reported through their event tag instead.
    pub found: Vec<Material>,
    pub events: EventTags,
}

/// Turn a player token into an explorable place.
///
/// # Errors
///
/// `UnknownInput` when nothing matches, `LocationLocked` when the place is
/// known but gated.
pub fn resolve_place(token: &str, state: &GameState, cfg: &GameConfig) -> Result<Place, GameError> {
    let place: Place = token.parse()?;
    match place.lock_reason(
        state.days.current_day(),
        state.map_fragment,
        cfg.deep_sea_unlock_day,
    ) {
        Some(reason) => Err(GameError::LocationLocked { place, reason }),
        None => Ok(place),
    }
}

/// Run one exploration attempt.
///
/// Nothing is mutated when an error is returned. Fullness decay after the
/// attempt is left to the caller.
///
/// # Errors
///
/// `ExhaustedForToday` with no budget left, otherwise the errors of
/// [`resolve_place`].
pub fn explore_place(
    state: &mut GameState,
    cfg: &GameConfig,
    catalog: &PlaceCatalog,
    token: &str,
    rngs: &mut RngBundle,
) -> Result<ExploreReport, GameError> {
    if state.days.explorations_left() == 0 {
        return Err(GameError::ExhaustedForToday);
    }
    let place = resolve_place(token, state, cfg)?;
    let mut events = EventTags::new();
    events.push(EventTag::new(LOG_EXPLORE_START));
    log::debug!(
        "exploring {place} on day {} ({} attempts left)",
        state.days.current_day(),
        state.days.explorations_left()
    );

    if state.companions.is_active(Companion::Akio) {
        let outcome = akio_visit(state, cfg, rngs, &mut events);
        if outcome.consumes_budget() {
            state.days.decrement_exploration();
        }
        return Ok(ExploreReport {
            place,
            outcome,
            found: Vec::new(),
            events,
        });
    }

    if check_hazard(cfg, rngs.hazard()) {
        let loss = apply_hazard(state, cfg, rngs, &mut events);
        state.days.decrement_exploration();
        return Ok(ExploreReport {
            place,
            outcome: ExploreOutcome::Hazard(loss),
            found: Vec::new(),
            events,
        });
    }

    if state.companions.is_active(Companion::Bem) {
        events.push(EventTag::new(LOG_EXPLORE_BEM_ESCORT));
    }

    let rate = cfg.base_success_rate(state.inventory.fullness());
    let multiplier = state.days.today_weather().multiplier();
    let roll = match catalog.drops(place) {
        Some(drops) => {
            if drops.gacha {
                events.push(EventTag::new(LOG_DEEP_SEA_SCAN));
            }
            get_materials(drops, rate, multiplier, &mut state.inventory, cfg, rngs.drops())
        }
        None => {
            log::warn!("no drop table for {place}; treating the attempt as empty");
            DropRoll::default()
        }
    };
    if roll.gacha_bonus {
        events.push(EventTag::new(LOG_DEEP_SEA_BONUS));
    }

    if roll.found.is_empty() {
        events.push(EventTag::new(LOG_EXPLORE_NOTHING));
        state.days.decrement_exploration();
        return Ok(ExploreReport {
            place,
            outcome: ExploreOutcome::NothingFound,
            found: Vec::new(),
            events,
        });
    }

    let mut found = roll.found;
    if state.companions.is_active(Companion::Kino) {
        found.extend_from_within(..);
        events.push(EventTag::new(LOG_EXPLORE_DOUBLED));
    }
    found.retain(|material| state.collect(*material, &mut events));
    events.push(EventTag::new(LOG_EXPLORE_FOUND));
    state.days.decrement_exploration();
    log::debug!("{place} yielded {} units", found.len());

    Ok(ExploreReport {
        place,
        outcome: ExploreOutcome::Gathered,
        found,
        events,
    })
}

fn akio_visit(
    state: &mut GameState,
    cfg: &GameConfig,
    rngs: &mut RngBundle,
    events: &mut EventTags,
) -> ExploreOutcome {
    let late_enough = state.days.current_day() >= cfg.akio_theft_day;
    let theft_pct = i32::try_from(cfg.akio_theft_pct).unwrap_or(i32::MAX);
    if late_enough
        && percent_hit(rngs.companion(), theft_pct)
        && let Some(item) = state.inventory.remove_random_crafted_item(rngs.companion())
    {
        events.push(EventTag::new(LOG_AKIO_THEFT));
        log::info!("Akio stole a {item}");
        return ExploreOutcome::AkioTheft(item);
    }

    events.push(EventTag::new(LOG_AKIO_WIPE));
    events.extend(
        state
            .companions
            .revive(Companion::Akio, &mut state.inventory),
    );
    ExploreOutcome::AkioWipe
}

fn apply_hazard(
    state: &mut GameState,
    cfg: &GameConfig,
    rngs: &mut RngBundle,
    events: &mut EventTags,
) -> HazardLoss {
    events.push(EventTag::new(LOG_HAZARD));
    let inventory = &mut state.inventory;
    let loss = if inventory.remove_material(Material::Stone, 1).is_ok() {
        events.push(EventTag::new(LOG_HAZARD_STONE));
        HazardLoss::Stone
    } else if inventory.remove_material(Material::CookedMeat, 1).is_ok() {
        events.push(EventTag::new(LOG_HAZARD_MEAT));
        HazardLoss::CookedMeat
    } else if let Some(item) = inventory.remove_random_crafted_item(rngs.hazard()) {
        events.push(EventTag::new(LOG_HAZARD_ITEM));
        HazardLoss::CraftedItem(item)
    } else {
        inventory.decrease_fullness(cfg.fullness_decay);
        events.push(EventTag::new(LOG_HAZARD_EXHAUSTED));
        HazardLoss::Fullness
    };
    log::info!("hazard struck: {loss:?}");
    loss
}

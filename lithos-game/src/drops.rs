//! Drop table rolls, including the deep sea gacha.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::constants::{COMMON_DROP_DIVISOR, SUCCESS_RATE_DIVISOR};
use crate::inventory::Inventory;
use crate::material::Material;
use crate::numbers::{trunc_f64_to_i32, u32_to_f64};
use crate::place::PlaceDrops;
use crate::rng::percent_hit;

/// Materials found by a single drop roll.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DropRoll {
    /// One entry per unit found, duplicates allowed.
    pub found: Vec<Material>,
    /// The deep sea tracker filled up and paid out its bonus.
    pub gacha_bonus: bool,
}

/// Percent chance for a common drop: `w * (rate / 50) * weather / 2`, truncated.
#[must_use]
pub fn common_chance(weight: u32, base_success_rate: u32, weather_multiplier: f64) -> i32 {
    let base_chance = u32_to_f64(weight) * (u32_to_f64(base_success_rate) / SUCCESS_RATE_DIVISOR);
    trunc_f64_to_i32(base_chance * weather_multiplier / COMMON_DROP_DIVISOR)
}

/// Percent chance for a rare drop: `w * weather`, truncated.
#[must_use]
pub fn rare_chance(weight: u32, weather_multiplier: f64) -> i32 {
    trunc_f64_to_i32(u32_to_f64(weight) * weather_multiplier)
}

/// Percent chance for each deep sea entry: flat base scaled by weather.
#[must_use]
pub fn gacha_chance(base_chance: u32, weather_multiplier: f64) -> i32 {
    trunc_f64_to_i32(u32_to_f64(base_chance) * weather_multiplier)
}

/// Roll every entry of a place's drop table independently.
///
/// Gacha places record their finds into the inventory's deep sea tracker,
/// which persists across calls and pays out `cfg.gacha_bonus` once it holds
/// `cfg.gacha_threshold` distinct materials.
pub fn get_materials<R: Rng + ?Sized>(
    drops: &PlaceDrops,
    base_success_rate: u32,
    weather_multiplier: f64,
    inventory: &mut Inventory,
    cfg: &GameConfig,
    rng: &mut R,
) -> DropRoll {
    if drops.gacha {
        return roll_deep_sea_gacha(drops, weather_multiplier, inventory, cfg, rng);
    }

    let mut found = Vec::new();
    for (material, weight) in &drops.common {
        if percent_hit(rng, common_chance(*weight, base_success_rate, weather_multiplier)) {
            found.push(*material);
        }
    }
    for (material, weight) in &drops.rare {
        if percent_hit(rng, rare_chance(*weight, weather_multiplier)) {
            found.push(*material);
        }
    }
    DropRoll {
        found,
        gacha_bonus: false,
    }
}

fn roll_deep_sea_gacha<R: Rng + ?Sized>(
    drops: &PlaceDrops,
    weather_multiplier: f64,
    inventory: &mut Inventory,
    cfg: &GameConfig,
    rng: &mut R,
) -> DropRoll {
    let chance = gacha_chance(cfg.deep_sea_base_chance, weather_multiplier);
    let mut found = Vec::new();
    for material in drops.common.keys() {
        if percent_hit(rng, chance) {
            found.push(*material);
            inventory.record_deep_sea_find(*material);
        }
    }

    let gacha_bonus = inventory.deep_sea_finds().len() >= cfg.gacha_threshold;
    if gacha_bonus {
        found.push(cfg.gacha_bonus);
        inventory.reset_deep_sea_tracker();
        log::debug!("deep sea tracker full; bonus {} awarded", cfg.gacha_bonus);
    }
    DropRoll { found, gacha_bonus }
}

/// Flat, stateless hazard check.
pub fn check_hazard<R: Rng + ?Sized>(cfg: &GameConfig, rng: &mut R) -> bool {
    percent_hit(rng, i32::try_from(cfg.hazard_pct).unwrap_or(i32::MAX))
}

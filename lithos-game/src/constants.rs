//! Centralized balance and tuning constants for Lithos game logic.
//!
//! Defaults for [`crate::config::GameConfig`] live here alongside the
//! narrative log keys reported back to the presentation layer.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_EXPLORE_START: &str = "log.explore.start";
pub(crate) const LOG_EXPLORE_FOUND: &str = "log.explore.found";
pub(crate) const LOG_EXPLORE_NOTHING: &str = "log.explore.nothing";
pub(crate) const LOG_EXPLORE_DOUBLED: &str = "log.explore.kino-doubled";
pub(crate) const LOG_EXPLORE_BEM_ESCORT: &str = "log.explore.bem-escort";
pub(crate) const LOG_EXPLORE_MAP_FRAGMENT: &str = "log.explore.map-fragment";
pub(crate) const LOG_DEEP_SEA_SCAN: &str = "log.deep-sea.scan";
pub(crate) const LOG_DEEP_SEA_BONUS: &str = "log.deep-sea.bonus";
pub(crate) const LOG_HAZARD: &str = "log.hazard";
pub(crate) const LOG_HAZARD_STONE: &str = "log.hazard.stone";
pub(crate) const LOG_HAZARD_MEAT: &str = "log.hazard.cooked-meat";
pub(crate) const LOG_HAZARD_ITEM: &str = "log.hazard.crafted-item";
pub(crate) const LOG_HAZARD_EXHAUSTED: &str = "log.hazard.exhausted";
pub(crate) const LOG_AKIO_THEFT: &str = "log.akio.theft";
pub(crate) const LOG_AKIO_WIPE: &str = "log.akio.wipe";
pub(crate) const LOG_REVIVE_KINO: &str = "log.revive.kino";
pub(crate) const LOG_REVIVE_BEM: &str = "log.revive.bem";
pub(crate) const LOG_REVIVE_AKIO: &str = "log.revive.akio";
pub(crate) const LOG_INVENTORY_CLEARED: &str = "log.inventory.cleared";
pub(crate) const LOG_CRAFT_GUARANTEED: &str = "log.craft.bem-guaranteed";
pub(crate) const LOG_CRAFT_SUCCESS: &str = "log.craft.success";
pub(crate) const LOG_CRAFT_FAILURE: &str = "log.craft.failure";
pub(crate) const LOG_CRAFT_PLATINUM: &str = "log.craft.platinum-doubled";
pub(crate) const LOG_SLEEP: &str = "log.sleep";
pub(crate) const LOG_PAN_GOLD: &str = "log.tools.pan.gold";
pub(crate) const LOG_PAN_PLATINUM: &str = "log.tools.pan.platinum";
pub(crate) const LOG_PAN_EMPTY: &str = "log.tools.pan.empty";
pub(crate) const LOG_HUNT: &str = "log.tools.hunt";
pub(crate) const LOG_COOK: &str = "log.tools.cook";
pub(crate) const LOG_EAT: &str = "log.tools.eat";
pub(crate) const LOG_POTION: &str = "log.tools.potion";

// Day cycle ----------------------------------------------------------------
pub(crate) const MAX_EXPLORATIONS: u32 = 10;
pub(crate) const STARTING_DAY: u32 = 1;

// Fullness -----------------------------------------------------------------
pub(crate) const FULLNESS_MIN: u32 = 0;
pub(crate) const FULLNESS_MAX: u32 = 5;
pub(crate) const FULLNESS_DECAY: u32 = 1;

// Rolls (percent on a 0..100 draw) ----------------------------------------
pub(crate) const CRAFT_SUCCESS_PCT: u32 = 70;
pub(crate) const HAZARD_PCT: u32 = 5;
pub(crate) const FED_SUCCESS_RATE: u32 = 65;
pub(crate) const HUNGRY_SUCCESS_RATE: u32 = 50;
pub(crate) const SUCCESS_RATE_DIVISOR: f64 = 50.0;
pub(crate) const COMMON_DROP_DIVISOR: f64 = 2.0;
pub(crate) const GOLD_PAN_PCT: u32 = 40;
pub(crate) const PLATINUM_PAN_PCT: u32 = 1;

// Weather thresholds, checked in order ------------------------------------
pub(crate) const WEATHER_STORM_BELOW: u32 = 10;
pub(crate) const WEATHER_CLEAR_SUN_BELOW: u32 = 25;
pub(crate) const WEATHER_BRIGHT_SUN_BELOW: u32 = 50;
pub(crate) const STORM_MULTIPLIER: f64 = 0.50;
pub(crate) const CLEAR_SUN_MULTIPLIER: f64 = 1.25;
pub(crate) const BRIGHT_SUN_MULTIPLIER: f64 = 1.10;
pub(crate) const NORMAL_MULTIPLIER: f64 = 1.00;

// Location gates -----------------------------------------------------------
pub(crate) const DEEP_SEA_UNLOCK_DAY: u32 = 5;

// Deep sea gacha -----------------------------------------------------------
pub(crate) const DEEP_SEA_BASE_CHANCE: u32 = 20;
pub(crate) const GACHA_THRESHOLD: usize = 3;

// Akio ---------------------------------------------------------------------
pub(crate) const AKIO_THEFT_DAY: u32 = 10;
pub(crate) const AKIO_THEFT_PCT: u32 = 25;

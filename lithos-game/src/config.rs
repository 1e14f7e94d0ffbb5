//! Tunable rules for a game session.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    AKIO_THEFT_DAY, AKIO_THEFT_PCT, CRAFT_SUCCESS_PCT, DEEP_SEA_BASE_CHANCE, DEEP_SEA_UNLOCK_DAY,
    FED_SUCCESS_RATE, FULLNESS_DECAY, FULLNESS_MAX, GACHA_THRESHOLD, GOLD_PAN_PCT, HAZARD_PCT,
    HUNGRY_SUCCESS_RATE, MAX_EXPLORATIONS, PLATINUM_PAN_PCT,
};
use crate::material::Material;

/// Balance knobs consumed by the exploration, crafting and tool engines.
///
/// Every field falls back to the shipped default when omitted from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_explorations: u32,
    pub starting_fullness: u32,
    pub max_fullness: u32,
    pub fullness_decay: u32,
    pub craft_success_pct: u32,
    pub hazard_pct: u32,
    pub fed_success_rate: u32,
    pub hungry_success_rate: u32,
    pub deep_sea_unlock_day: u32,
    pub deep_sea_base_chance: u32,
    pub gacha_threshold: usize,
    pub gacha_bonus: Material,
    pub akio_theft_day: u32,
    pub akio_theft_pct: u32,
    pub gold_pan_pct: u32,
    pub platinum_pan_pct: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_explorations: MAX_EXPLORATIONS,
            starting_fullness: FULLNESS_MAX,
            max_fullness: FULLNESS_MAX,
            fullness_decay: FULLNESS_DECAY,
            craft_success_pct: CRAFT_SUCCESS_PCT,
            hazard_pct: HAZARD_PCT,
            fed_success_rate: FED_SUCCESS_RATE,
            hungry_success_rate: HUNGRY_SUCCESS_RATE,
            deep_sea_unlock_day: DEEP_SEA_UNLOCK_DAY,
            deep_sea_base_chance: DEEP_SEA_BASE_CHANCE,
            gacha_threshold: GACHA_THRESHOLD,
            gacha_bonus: Material::Painite,
            akio_theft_day: AKIO_THEFT_DAY,
            akio_theft_pct: AKIO_THEFT_PCT,
            gold_pan_pct: GOLD_PAN_PCT,
            platinum_pan_pct: PLATINUM_PAN_PCT,
        }
    }
}

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Parse(String),
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: u32,
        value: u32,
    },
    #[error("{field} is a percent and must not exceed 100 (got {value})")]
    PercentOutOfRange { field: &'static str, value: u32 },
    #[error("starting fullness {starting} exceeds maximum {max}")]
    FullnessAboveMax { starting: u32, max: u32 },
    #[error("gacha bonus {0} cannot be a key item")]
    KeyItemBonus(Material),
}

impl GameConfig {
    /// Load configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or if validation fails.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the engines rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_explorations", self.max_explorations),
            ("max_fullness", self.max_fullness),
            ("deep_sea_unlock_day", self.deep_sea_unlock_day),
            ("akio_theft_day", self.akio_theft_day),
        ] {
            if value < 1 {
                return Err(ConfigError::MinViolation {
                    field,
                    min: 1,
                    value,
                });
            }
        }
        if self.gacha_threshold < 1 {
            return Err(ConfigError::MinViolation {
                field: "gacha_threshold",
                min: 1,
                value: 0,
            });
        }
        for (field, value) in [
            ("craft_success_pct", self.craft_success_pct),
            ("hazard_pct", self.hazard_pct),
            ("akio_theft_pct", self.akio_theft_pct),
            ("gold_pan_pct", self.gold_pan_pct),
            ("platinum_pan_pct", self.platinum_pan_pct),
        ] {
            if value > 100 {
                return Err(ConfigError::PercentOutOfRange { field, value });
            }
        }
        if self.starting_fullness > self.max_fullness {
            return Err(ConfigError::FullnessAboveMax {
                starting: self.starting_fullness,
                max: self.max_fullness,
            });
        }
        if self.gacha_bonus.is_key_item() {
            return Err(ConfigError::KeyItemBonus(self.gacha_bonus));
        }
        Ok(())
    }

    /// Base success rate for an explorer with the given fullness.
    #[must_use]
    pub const fn base_success_rate(&self, fullness: u32) -> u32 {
        if fullness > 0 {
            self.fed_success_rate
        } else {
            self.hungry_success_rate
        }
    }
}

//! Daily weather and its effect on exploration yields.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BRIGHT_SUN_MULTIPLIER, CLEAR_SUN_MULTIPLIER, NORMAL_MULTIPLIER, STORM_MULTIPLIER,
    WEATHER_BRIGHT_SUN_BELOW, WEATHER_CLEAR_SUN_BELOW, WEATHER_STORM_BELOW,
};
use crate::rng::roll_percent;

/// Weather conditions that scale every drop chance for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Weather {
    Storm,
    BrightSun,
    ClearSun,
    #[default]
    Normal,
}

impl Weather {
    pub const ALL: [Self; 4] = [Self::Storm, Self::BrightSun, Self::ClearSun, Self::Normal];

    /// Roll today's weather.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(roll_percent(rng))
    }

    /// Map a `0..100` roll onto a weather state. Thresholds are cumulative and
    /// checked in order: storm, clear sun, bright sun, then normal.
    #[must_use]
    pub const fn from_roll(roll: u32) -> Self {
        if roll < WEATHER_STORM_BELOW {
            Self::Storm
        } else if roll < WEATHER_CLEAR_SUN_BELOW {
            Self::ClearSun
        } else if roll < WEATHER_BRIGHT_SUN_BELOW {
            Self::BrightSun
        } else {
            Self::Normal
        }
    }

    /// Yield multiplier applied to drop chances.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Storm => STORM_MULTIPLIER,
            Self::BrightSun => BRIGHT_SUN_MULTIPLIER,
            Self::ClearSun => CLEAR_SUN_MULTIPLIER,
            Self::Normal => NORMAL_MULTIPLIER,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Storm => "Storm Day",
            Self::BrightSun => "Bright Sunny Day",
            Self::ClearSun => "Clear Sunny Day",
            Self::Normal => "Normal Day",
        }
    }

    #[must_use]
    pub const fn flavor_text(self) -> &'static str {
        match self {
            Self::Storm => "Exploration yields reduced by 50%.",
            Self::BrightSun => "Exploration yields increased by 10%.",
            Self::ClearSun => "Exploration yields increased by 25%.",
            Self::Normal => "Exploration yields are standard.",
        }
    }

    /// Get i18n key for weather state name
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Storm => "weather.states.Storm",
            Self::BrightSun => "weather.states.BrightSun",
            Self::ClearSun => "weather.states.ClearSun",
            Self::Normal => "weather.states.Normal",
        }
    }
}

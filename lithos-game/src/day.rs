//! Day counter, daily exploration budget and today's weather.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{LOG_SLEEP, STARTING_DAY};
use crate::events::{EventTag, EventTags};
use crate::weather::Weather;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCycle {
    current_day: u32,
    explorations_left: u32,
    max_explorations: u32,
    today_weather: Weather,
}

/// What changed when the player went to sleep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: u32,
    pub weather: Weather,
    pub explorations_left: u32,
    pub events: EventTags,
}

impl DayCycle {
    /// Day one always starts with normal weather and a full budget.
    #[must_use]
    pub const fn new(max_explorations: u32) -> Self {
        Self {
            current_day: STARTING_DAY,
            explorations_left: max_explorations,
            max_explorations,
            today_weather: Weather::Normal,
        }
    }

    #[must_use]
    pub const fn current_day(&self) -> u32 {
        self.current_day
    }

    #[must_use]
    pub const fn explorations_left(&self) -> u32 {
        self.explorations_left
    }

    #[must_use]
    pub const fn max_explorations(&self) -> u32 {
        self.max_explorations
    }

    #[must_use]
    pub const fn today_weather(&self) -> Weather {
        self.today_weather
    }

    /// Spend one exploration attempt, stopping at zero.
    pub const fn decrement_exploration(&mut self) {
        self.explorations_left = self.explorations_left.saturating_sub(1);
    }

    /// Refill today's budget without advancing the day.
    pub const fn reset_exploration_limit(&mut self) {
        self.explorations_left = self.max_explorations;
    }

    /// Advance to the next day: new weather and a full budget.
    pub fn sleep<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DaySummary {
        self.current_day = self.current_day.saturating_add(1);
        self.explorations_left = self.max_explorations;
        self.today_weather = Weather::generate(rng);
        log::info!(
            "day {} begins: {}",
            self.current_day,
            self.today_weather.description()
        );
        let mut events = EventTags::new();
        events.push(EventTag::new(LOG_SLEEP));
        events.push(EventTag::new(self.today_weather.i18n_key()));
        DaySummary {
            day: self.current_day,
            weather: self.today_weather,
            explorations_left: self.explorations_left,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn budget_floors_at_zero() {
        let mut cycle = DayCycle::new(2);
        cycle.decrement_exploration();
        cycle.decrement_exploration();
        cycle.decrement_exploration();
        assert_eq!(cycle.explorations_left(), 0);
        cycle.reset_exploration_limit();
        assert_eq!(cycle.explorations_left(), 2);
        assert_eq!(cycle.current_day(), 1);
    }

    #[test]
    fn sleep_advances_day_and_resets_budget() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut cycle = DayCycle::new(10);
        assert_eq!(cycle.today_weather(), Weather::Normal);
        for _ in 0..4 {
            cycle.decrement_exploration();
        }
        let summary = cycle.sleep(&mut rng);
        assert_eq!(summary.day, 2);
        assert_eq!(cycle.current_day(), 2);
        assert_eq!(cycle.explorations_left(), 10);
        assert_eq!(summary.weather, cycle.today_weather());
        assert!(summary.events.iter().any(|t| t.as_str() == LOG_SLEEP));
    }
}

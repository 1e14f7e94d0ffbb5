//! Mutable game state shared by every engine.
use serde::{Deserialize, Serialize};

use crate::companion::CompanionRoster;
use crate::config::GameConfig;
use crate::constants::LOG_EXPLORE_MAP_FRAGMENT;
use crate::day::DayCycle;
use crate::events::{EventTag, EventTags};
use crate::inventory::Inventory;
use crate::material::Material;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub inventory: Inventory,
    pub companions: CompanionRoster,
    pub days: DayCycle,
    /// Unlocks the Cave. Survives inventory wipes.
    pub map_fragment: bool,
}

impl GameState {
    #[must_use]
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            inventory: Inventory::new(cfg.starting_fullness, cfg.max_fullness),
            companions: CompanionRoster::default(),
            days: DayCycle::new(cfg.max_explorations),
            map_fragment: false,
        }
    }

    /// Store one gathered unit. Key items flip their unlock instead of stacking.
    ///
    /// Returns whether the unit landed in the inventory.
    pub fn collect(&mut self, material: Material, events: &mut EventTags) -> bool {
        match material {
            Material::MapFragment => {
                if !self.map_fragment {
                    self.map_fragment = true;
                    events.push(EventTag::new(LOG_EXPLORE_MAP_FRAGMENT));
                    log::info!("map fragment found; the Cave is now reachable");
                }
                false
            }
            other => {
                self.inventory.add_material(other, 1);
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_follows_config() {
        let cfg = GameConfig {
            max_explorations: 4,
            starting_fullness: 2,
            ..GameConfig::default()
        };
        let state = GameState::new(&cfg);
        assert_eq!(state.days.explorations_left(), 4);
        assert_eq!(state.days.current_day(), 1);
        assert_eq!(state.inventory.fullness(), 2);
        assert!(!state.map_fragment);
        assert!(state.companions.active().is_none());
    }

    #[test]
    fn map_fragment_unlocks_once() {
        let mut state = GameState::default();
        let mut events = EventTags::new();
        assert!(!state.collect(Material::MapFragment, &mut events));
        assert!(!state.collect(Material::MapFragment, &mut events));
        assert!(state.collect(Material::Wood, &mut events));
        assert!(state.map_fragment);
        assert_eq!(events.len(), 1);
        assert_eq!(state.inventory.material_count(Material::MapFragment), 0);
        assert_eq!(state.inventory.material_count(Material::Wood), 1);
    }
}

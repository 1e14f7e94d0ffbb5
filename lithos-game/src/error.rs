//! Recoverable errors reported by the game core.
//!
//! None of these abort the session and none of them leave partial state
//! behind: every operation validates before it mutates.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::Structure;
use crate::material::Material;
use crate::place::Place;

/// Why a known place cannot be explored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    MapFragmentRequired,
    TooEarly { unlock_day: u32, current_day: u32 },
}

impl fmt::Display for LockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapFragmentRequired => f.write_str("a map fragment is required"),
            Self::TooEarly {
                unlock_day,
                current_day,
            } => write!(f, "opens on day {unlock_day} (today is day {current_day})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{place} is locked: {reason}")]
    LocationLocked { place: Place, reason: LockReason },
    #[error("unrecognized input {0:?}")]
    UnknownInput(String),
    #[error("insufficient materials for {action}: need {needed} {material}, have {available}")]
    InsufficientMaterials {
        action: &'static str,
        material: Material,
        needed: u32,
        available: u32,
    },
    #[error("the {0} is already built")]
    AlreadyBuilt(Structure),
    #[error("{action} requires the {structure}")]
    StructureRequired {
        action: &'static str,
        structure: Structure,
    },
    #[error("no explorations left today")]
    ExhaustedForToday,
    #[error("no crafted item in slot {index}")]
    NoSuchItem { index: usize },
    #[error("no revival potion in the inventory")]
    NoPotion,
    #[error("the {item} needs a companion to target")]
    TargetRequired { item: &'static str },
}

impl GameError {
    /// Whether the error stems from a locked place rather than bad input.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::LocationLocked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_blocker() {
        let locked = GameError::LocationLocked {
            place: Place::Cave,
            reason: LockReason::MapFragmentRequired,
        };
        assert_eq!(
            locked.to_string(),
            "Cave is locked: a map fragment is required"
        );
        assert!(locked.is_locked());

        let early = GameError::LocationLocked {
            place: Place::DeepSeaShore,
            reason: LockReason::TooEarly {
                unlock_day: 5,
                current_day: 2,
            },
        };
        assert!(early.to_string().contains("day 5"));

        let short = GameError::InsufficientMaterials {
            action: "Furnace",
            material: Material::Stone,
            needed: 3,
            available: 1,
        };
        assert_eq!(
            short.to_string(),
            "insufficient materials for Furnace: need 3 Stone, have 1"
        );
        assert!(!short.is_locked());
    }
}

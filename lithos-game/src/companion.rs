//! Companion revival state machine.
//!
//! Exactly one companion can be active at a time, and reviving one dismisses
//! whoever was active before. The set of companions revived at least once is
//! tracked separately and only feeds the win condition.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::{LOG_INVENTORY_CLEARED, LOG_REVIVE_AKIO, LOG_REVIVE_BEM, LOG_REVIVE_KINO};
use crate::error::GameError;
use crate::events::{EventTag, EventTags};
use crate::inventory::Inventory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Companion {
    /// Doubles every raw material gathered.
    Kino,
    /// Guarantees every craft.
    Bem,
    /// Wipes the inventory on arrival and keeps raiding it.
    Akio,
}

impl Companion {
    pub const ALL: [Self; 3] = [Self::Kino, Self::Bem, Self::Akio];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kino => "Kino",
            Self::Bem => "Bem",
            Self::Akio => "Akio",
        }
    }

    const fn revive_log(self) -> &'static str {
        match self {
            Self::Kino => LOG_REVIVE_KINO,
            Self::Bem => LOG_REVIVE_BEM,
            Self::Akio => LOG_REVIVE_AKIO,
        }
    }
}

impl fmt::Display for Companion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Companion {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|companion| companion.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownInput(s.to_string()))
    }
}

/// Which companion, if any, is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompanionState {
    #[default]
    Dormant,
    Revived(Companion),
}

impl CompanionState {
    #[must_use]
    pub const fn active(self) -> Option<Companion> {
        match self {
            Self::Dormant => None,
            Self::Revived(companion) => Some(companion),
        }
    }
}

/// Active companion plus revival history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompanionRoster {
    state: CompanionState,
    ever_revived: BTreeSet<Companion>,
}

impl CompanionRoster {
    #[must_use]
    pub const fn state(&self) -> CompanionState {
        self.state
    }

    #[must_use]
    pub const fn active(&self) -> Option<Companion> {
        self.state.active()
    }

    #[must_use]
    pub fn is_active(&self, companion: Companion) -> bool {
        self.active() == Some(companion)
    }

    #[must_use]
    pub const fn ever_revived(&self) -> &BTreeSet<Companion> {
        &self.ever_revived
    }

    /// Crafts skip the success roll while Bem is active.
    #[must_use]
    pub fn guaranteed_craft(&self) -> bool {
        self.is_active(Companion::Bem)
    }

    /// Every companion has been revived at least once this session.
    #[must_use]
    pub fn all_revived(&self) -> bool {
        Companion::ALL
            .iter()
            .all(|companion| self.ever_revived.contains(companion))
    }

    /// Make `companion` the only active one and apply its arrival effects.
    pub fn revive(&mut self, companion: Companion, inventory: &mut Inventory) -> EventTags {
        let mut events = EventTags::new();
        self.state = CompanionState::Revived(companion);
        self.ever_revived.insert(companion);
        inventory.set_double_yield(companion == Companion::Kino);
        events.push(EventTag::new(companion.revive_log()));
        if companion == Companion::Akio {
            inventory.clear();
            events.push(EventTag::new(LOG_INVENTORY_CLEARED));
        }
        log::info!(
            "{companion} revived; {} of {} companions revived so far",
            self.ever_revived.len(),
            Companion::ALL.len()
        );
        events
    }
}

//! Narrative tags reported alongside every operation.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum tag capacity stored inline without additional allocations.
pub type EventTags = SmallVec<[EventTag; 4]>;

/// Log key describing something that happened, translated by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTag(pub String);

impl EventTag {
    /// Construct a tag from a string slice, trimming whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the tag has no visible characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Whether `events` carries the given log key.
#[must_use]
pub fn has_event(events: &[EventTag], key: &str) -> bool {
    events.iter().any(|tag| tag.as_str() == key)
}

//! Explorable places and their drop tables.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{GameError, LockReason};
use crate::material::Material;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Place {
    River,
    Forest,
    RockyBeach,
    Cave,
    DeepSeaShore,
}

impl Place {
    pub const ALL: [Self; 5] = [
        Self::River,
        Self::Forest,
        Self::RockyBeach,
        Self::Cave,
        Self::DeepSeaShore,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::River => "River",
            Self::Forest => "Forest",
            Self::RockyBeach => "Rocky Beach",
            Self::Cave => "Cave",
            Self::DeepSeaShore => "Deep Sea Shore",
        }
    }

    /// Number shown next to the place in a menu.
    #[must_use]
    pub const fn menu_number(self) -> u8 {
        match self {
            Self::River => 1,
            Self::Forest => 2,
            Self::RockyBeach => 3,
            Self::Cave => 4,
            Self::DeepSeaShore => 5,
        }
    }

    /// Resolve a player token (menu number or name, case-insensitive).
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        let normalized = token.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|place| {
            normalized == place.menu_number().to_string()
                || normalized == place.name().to_ascii_lowercase()
        })
    }

    /// Why this place cannot be explored right now, if anything.
    #[must_use]
    pub const fn lock_reason(
        self,
        current_day: u32,
        has_map_fragment: bool,
        deep_sea_unlock_day: u32,
    ) -> Option<LockReason> {
        match self {
            Self::Cave if !has_map_fragment => Some(LockReason::MapFragmentRequired),
            Self::DeepSeaShore if current_day < deep_sea_unlock_day => Some(LockReason::TooEarly {
                unlock_day: deep_sea_unlock_day,
                current_day,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Place {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s).ok_or_else(|| GameError::UnknownInput(s.to_string()))
    }
}

/// Drop weights for a single place.
///
/// Gacha places only use the keys of `common`; their chance comes from the
/// session configuration instead of the listed weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceDrops {
    pub place: Place,
    #[serde(default)]
    pub gacha: bool,
    #[serde(default)]
    pub common: BTreeMap<Material, u32>,
    #[serde(default)]
    pub rare: BTreeMap<Material, u32>,
}

/// Complete static catalog of places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCatalog {
    pub places: Vec<PlaceDrops>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("JSON parse error: {0}")]
    Parse(String),
    #[error("missing drop table for {0}")]
    MissingPlace(Place),
    #[error("duplicate drop table for {0}")]
    DuplicatePlace(Place),
    #[error("{0} has the wrong gacha flag")]
    GachaMismatch(Place),
    #[error("{0} has an empty common pool")]
    EmptyCommonPool(Place),
}

impl PlaceCatalog {
    /// Load the catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON string cannot be parsed or if validation fails.
    pub fn from_json(json_str: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_json::from_str(json_str).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every place appears exactly once, only the Deep Sea Shore runs the
    /// gacha, and every place can drop something common.
    fn validate(&self) -> Result<(), CatalogError> {
        for place in Place::ALL {
            let mut tables = self.places.iter().filter(|drops| drops.place == place);
            let Some(drops) = tables.next() else {
                return Err(CatalogError::MissingPlace(place));
            };
            if tables.next().is_some() {
                return Err(CatalogError::DuplicatePlace(place));
            }
            if drops.gacha != matches!(place, Place::DeepSeaShore) {
                return Err(CatalogError::GachaMismatch(place));
            }
            if drops.common.is_empty() {
                return Err(CatalogError::EmptyCommonPool(place));
            }
        }
        Ok(())
    }

    /// Embedded catalog shipped with the crate.
    #[must_use]
    pub fn default_catalog() -> Self {
        Self::from_json(include_str!("../assets/places.json")).unwrap_or_else(|err| {
            log::error!("embedded place catalog is invalid: {err}");
            Self { places: Vec::new() }
        })
    }

    /// Drop table for a place.
    #[must_use]
    pub fn drops(&self, place: Place) -> Option<&PlaceDrops> {
        self.places.iter().find(|drops| drops.place == place)
    }
}

impl Default for PlaceCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_resolve_by_number_or_name() {
        assert_eq!(Place::parse_token("1"), Some(Place::River));
        assert_eq!(Place::parse_token(" Rocky Beach "), Some(Place::RockyBeach));
        assert_eq!(Place::parse_token("DEEP SEA SHORE"), Some(Place::DeepSeaShore));
        assert_eq!(Place::parse_token("4"), Some(Place::Cave));
        assert_eq!(Place::parse_token("volcano"), None);
        assert_eq!(
            "6".parse::<Place>(),
            Err(GameError::UnknownInput("6".to_string()))
        );
    }

    #[test]
    fn gates_apply_to_cave_and_deep_sea() {
        assert_eq!(
            Place::Cave.lock_reason(1, false, 5),
            Some(LockReason::MapFragmentRequired)
        );
        assert_eq!(Place::Cave.lock_reason(1, true, 5), None);
        assert_eq!(
            Place::DeepSeaShore.lock_reason(4, true, 5),
            Some(LockReason::TooEarly {
                unlock_day: 5,
                current_day: 4
            })
        );
        assert_eq!(Place::DeepSeaShore.lock_reason(5, false, 5), None);
        assert_eq!(Place::River.lock_reason(1, false, 5), None);
    }

    #[test]
    fn embedded_catalog_is_complete() {
        let catalog = PlaceCatalog::default_catalog();
        assert_eq!(catalog.places.len(), Place::ALL.len());
        let deep = catalog.drops(Place::DeepSeaShore).unwrap();
        assert!(deep.gacha);
        assert!(deep.common.len() >= 3);
        let forest = catalog.drops(Place::Forest).unwrap();
        assert!(forest.rare.contains_key(&Material::MapFragment));
    }

    #[test]
    fn validation_catches_broken_catalogs() {
        let missing = r#"{ "places": [ { "place": "river", "common": { "stone": 10 } } ] }"#;
        assert_eq!(
            PlaceCatalog::from_json(missing),
            Err(CatalogError::MissingPlace(Place::Forest))
        );

        let mut catalog = PlaceCatalog::default_catalog();
        if let Some(river) = catalog.places.iter_mut().find(|d| d.place == Place::River) {
            river.gacha = true;
        }
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::GachaMismatch(Place::River))
        );

        let mut catalog = PlaceCatalog::default_catalog();
        let cave = catalog.drops(Place::Cave).cloned().unwrap();
        catalog.places.push(cave);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicatePlace(Place::Cave))
        );
    }
}

//! Raw materials gathered from places and spent by recipes.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Stone,
    Wood,
    Clay,
    Grapes,
    Coal,
    NitricAcid,
    Salt,
    Coral,
    Pearl,
    Sulfur,
    Painite,
    Platinum,
    Gold,
    RawMeat,
    CookedMeat,
    Alcohol,
    MapFragment,
}

impl Material {
    pub const ALL: [Self; 17] = [
        Self::Stone,
        Self::Wood,
        Self::Clay,
        Self::Grapes,
        Self::Coal,
        Self::NitricAcid,
        Self::Salt,
        Self::Coral,
        Self::Pearl,
        Self::Sulfur,
        Self::Painite,
        Self::Platinum,
        Self::Gold,
        Self::RawMeat,
        Self::CookedMeat,
        Self::Alcohol,
        Self::MapFragment,
    ];

    /// Display name used in narrative output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stone => "Stone",
            Self::Wood => "Wood",
            Self::Clay => "Clay",
            Self::Grapes => "Grapes",
            Self::Coal => "Coal",
            Self::NitricAcid => "Nitric Acid",
            Self::Salt => "Salt",
            Self::Coral => "Coral",
            Self::Pearl => "Pearl",
            Self::Sulfur => "Sulfur",
            Self::Painite => "Painite",
            Self::Platinum => "Platinum",
            Self::Gold => "Gold",
            Self::RawMeat => "Raw Meat",
            Self::CookedMeat => "Cooked Meat",
            Self::Alcohol => "Alcohol",
            Self::MapFragment => "Map Fragment",
        }
    }

    /// Key items unlock progress instead of stacking in the material store.
    #[must_use]
    pub const fn is_key_item(self) -> bool {
        matches!(self, Self::MapFragment)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|material| material.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| GameError::UnknownInput(s.to_string()))
    }
}

//! Player inventory: raw materials, crafted items, structures and fullness.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::constants::FULLNESS_MIN;
use crate::error::GameError;
use crate::material::Material;

/// One-time, non-consumable unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    Furnace,
    AlchemyTable,
}

impl Structure {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Furnace => "Furnace",
            Self::AlchemyTable => "Alchemy Table",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    WoodenBatea,
    Spear,
    RevivalPotion,
}

impl ItemKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WoodenBatea => "Wooden Batea",
            Self::Spear => "Spear",
            Self::RevivalPotion => "Revival Potion",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::WoodenBatea => "Reusable Tool for Gold Panning",
            Self::Spear => "Consumable Weapon for Hunting",
            Self::RevivalPotion => "Revives a character",
        }
    }

    /// Reusable tools survive being used.
    #[must_use]
    pub const fn is_reusable(self) -> bool {
        matches!(self, Self::WoodenBatea)
    }
}

/// Immutable crafted inventory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CraftedItem {
    kind: ItemKind,
}

impl CraftedItem {
    #[must_use]
    pub(crate) const fn new(kind: ItemKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub const fn kind(self) -> ItemKind {
        self.kind
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        self.kind.description()
    }
}

impl fmt::Display for CraftedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.description())
    }
}

/// A requested amount that the inventory cannot cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub material: Material,
    pub needed: u32,
    pub available: u32,
}

impl Shortfall {
    /// Attach the action that needed the materials.
    #[must_use]
    pub const fn into_error(self, action: &'static str) -> GameError {
        GameError::InsufficientMaterials {
            action,
            material: self.material,
            needed: self.needed,
            available: self.available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    materials: BTreeMap<Material, u32>,
    crafted_items: Vec<CraftedItem>,
    structures: BTreeSet<Structure>,
    fullness: u32,
    max_fullness: u32,
    double_yield: bool,
    deep_sea_finds: BTreeSet<Material>,
}

impl Inventory {
    #[must_use]
    pub fn new(starting_fullness: u32, max_fullness: u32) -> Self {
        Self {
            materials: BTreeMap::new(),
            crafted_items: Vec::new(),
            structures: BTreeSet::new(),
            fullness: starting_fullness.min(max_fullness),
            max_fullness,
            double_yield: false,
            deep_sea_finds: BTreeSet::new(),
        }
    }

    // Materials ------------------------------------------------------------

    #[must_use]
    pub fn material_count(&self, material: Material) -> u32 {
        self.materials.get(&material).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has_material(&self, material: Material) -> bool {
        self.material_count(material) > 0
    }

    /// Non-zero material counts.
    #[must_use]
    pub const fn materials(&self) -> &BTreeMap<Material, u32> {
        &self.materials
    }

    pub fn add_material(&mut self, material: Material, qty: u32) {
        if qty == 0 {
            return;
        }
        let count = self.materials.entry(material).or_insert(0);
        *count = count.saturating_add(qty);
    }

    /// Remove `qty` units, returning the remaining count.
    ///
    /// # Errors
    ///
    /// Returns the shortfall and leaves the count untouched when fewer than
    /// `qty` units are present.
    pub fn remove_material(&mut self, material: Material, qty: u32) -> Result<u32, Shortfall> {
        let available = self.material_count(material);
        if available < qty {
            return Err(Shortfall {
                material,
                needed: qty,
                available,
            });
        }
        let remaining = available - qty;
        if remaining == 0 {
            self.materials.remove(&material);
        } else {
            self.materials.insert(material, remaining);
        }
        Ok(remaining)
    }

    /// First requirement the inventory cannot cover.
    #[must_use]
    pub fn first_shortfall(&self, cost: &[(Material, u32)]) -> Option<Shortfall> {
        let mut totals: BTreeMap<Material, u32> = BTreeMap::new();
        for (material, qty) in cost {
            let total = totals.entry(*material).or_insert(0);
            *total = total.saturating_add(*qty);
        }
        totals.into_iter().find_map(|(material, needed)| {
            let available = self.material_count(material);
            (available < needed).then_some(Shortfall {
                material,
                needed,
                available,
            })
        })
    }

    /// Remove a whole cost at once, or nothing.
    ///
    /// # Errors
    ///
    /// Returns the first shortfall without touching any count.
    pub fn remove_all(&mut self, cost: &[(Material, u32)]) -> Result<(), Shortfall> {
        if let Some(shortfall) = self.first_shortfall(cost) {
            return Err(shortfall);
        }
        for (material, qty) in cost {
            self.remove_material(*material, *qty)?;
        }
        Ok(())
    }

    // Crafted items --------------------------------------------------------

    #[must_use]
    pub fn crafted_items(&self) -> &[CraftedItem] {
        &self.crafted_items
    }

    #[must_use]
    pub fn crafted_count(&self) -> usize {
        self.crafted_items.len()
    }

    #[must_use]
    pub fn count_items(&self, kind: ItemKind) -> usize {
        self.crafted_items
            .iter()
            .filter(|item| item.kind() == kind)
            .count()
    }

    #[must_use]
    pub fn position_of(&self, kind: ItemKind) -> Option<usize> {
        self.crafted_items.iter().position(|item| item.kind() == kind)
    }

    pub(crate) fn add_crafted_item(&mut self, item: CraftedItem) {
        self.crafted_items.push(item);
    }

    /// Remove the item at `index`, keeping the order of the rest.
    pub fn take_crafted_item(&mut self, index: usize) -> Option<CraftedItem> {
        (index < self.crafted_items.len()).then(|| self.crafted_items.remove(index))
    }

    /// Remove one crafted item chosen uniformly at random.
    pub fn remove_random_crafted_item<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<CraftedItem> {
        if self.crafted_items.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.crafted_items.len());
        self.take_crafted_item(index)
    }

    // Structures -----------------------------------------------------------

    #[must_use]
    pub const fn structures(&self) -> &BTreeSet<Structure> {
        &self.structures
    }

    #[must_use]
    pub fn has_structure(&self, structure: Structure) -> bool {
        self.structures.contains(&structure)
    }

    /// Returns false when the structure was already present.
    pub(crate) fn register_structure(&mut self, structure: Structure) -> bool {
        self.structures.insert(structure)
    }

    // Fullness -------------------------------------------------------------

    #[must_use]
    pub const fn fullness(&self) -> u32 {
        self.fullness
    }

    #[must_use]
    pub const fn max_fullness(&self) -> u32 {
        self.max_fullness
    }

    /// Lower fullness, never below the floor. Returns the new level.
    pub fn decrease_fullness(&mut self, amount: u32) -> u32 {
        self.fullness = self.fullness.saturating_sub(amount).max(FULLNESS_MIN);
        self.fullness
    }

    pub fn restore_fullness(&mut self) {
        self.fullness = self.max_fullness;
    }

    // Companion effects ----------------------------------------------------

    #[must_use]
    pub const fn double_yield(&self) -> bool {
        self.double_yield
    }

    pub(crate) const fn set_double_yield(&mut self, enabled: bool) {
        self.double_yield = enabled;
    }

    // Deep sea tracker -----------------------------------------------------

    #[must_use]
    pub const fn deep_sea_finds(&self) -> &BTreeSet<Material> {
        &self.deep_sea_finds
    }

    /// Record a deep sea find, returning the number of distinct finds so far.
    pub fn record_deep_sea_find(&mut self, material: Material) -> usize {
        self.deep_sea_finds.insert(material);
        self.deep_sea_finds.len()
    }

    pub fn reset_deep_sea_tracker(&mut self) {
        self.deep_sea_finds.clear();
    }

    /// Wipe everything the player carries. Fullness is a body stat and stays.
    pub fn clear(&mut self) {
        self.materials.clear();
        self.crafted_items.clear();
        self.structures.clear();
        self.deep_sea_finds.clear();
        self.double_yield = false;
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(crate::constants::FULLNESS_MAX, crate::constants::FULLNESS_MAX)
    }
}

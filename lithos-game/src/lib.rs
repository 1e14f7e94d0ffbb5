//! Project Lithos game core
//!
//! Resource economy for a turn-based survival and crafting game: daily
//! exploration budgets, weather-scaled drop tables, a deep sea gacha,
//! companion effects and crafting. The crate is a pure state-transition API
//! with no I/O; presentation layers translate the narrative tags it reports.

pub mod companion;
pub mod config;
pub mod constants;
pub mod crafting;
pub mod day;
pub mod drops;
pub mod error;
pub mod events;
pub mod explore;
pub mod inventory;
pub mod material;
pub mod numbers;
pub mod place;
pub mod rng;
pub mod seed;
pub mod session;
pub mod state;
pub mod tools;
pub mod weather;

// Re-export commonly used types
pub use companion::{Companion, CompanionRoster, CompanionState};
pub use config::{ConfigError, GameConfig};
pub use crafting::{
    CraftOptions, CraftReport, CraftResult, Product, Recipe, RecipeCost, craft_success,
    craftable_recipes, recipe_cost,
};
pub use day::{DayCycle, DaySummary};
pub use drops::{DropRoll, check_hazard, common_chance, gacha_chance, get_materials, rare_chance};
pub use error::{GameError, LockReason};
pub use events::{EventTag, EventTags, has_event};
pub use explore::{ExploreOutcome, ExploreReport, HazardLoss};
pub use inventory::{CraftedItem, Inventory, ItemKind, Shortfall, Structure};
pub use material::Material;
pub use place::{CatalogError, Place, PlaceCatalog, PlaceDrops};
pub use rng::{CountingRng, RngBundle};
pub use seed::{decode_to_seed, encode_friendly, parse_share_code};
pub use session::GameSession;
pub use state::GameState;
pub use tools::{ItemOutcome, ItemReport};
pub use weather::Weather;

//! Storage Layer - SQLite-backed persistence
//!
//! Tables:
//! - relic_craft_results(comp_*, result_*) - one row per observed craft
//! - relics(name, group, rarity, image, description) - name is unique

pub mod schema;
pub mod sqlite;

pub use sqlite::{RelicStore, CategoryCount, CompositionYield, DbStats};

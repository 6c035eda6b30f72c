//! # relicdb - Relic crafting database builder
//!
//! Loads a JSON document of relics and relic-crafting results into SQLite
//! and reports aggregate statistics over it.
//!
//! relicdb provides:
//! - A typed model of the source document, checked at parse time
//! - A loader that rebuilds the database atomically on every run
//! - A read-only reporter for rarity/group counts and best compositions

pub mod model;
pub mod storage;
pub mod loader;
pub mod report;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use model::{ConsistencyWarning, CraftResult, RarityMix, RarityTier, Relic, RelicDocument};
pub use storage::RelicStore;
pub use loader::{load, load_file, LoadSummary};
pub use report::{report, Report};

/// Result type alias for relicdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for relicdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown rarity tier: {0}")]
    UnknownRarity(String),
}

//! # skilldb - Skill catalog loader
//!
//! Rebuilds the skill catalog database from its JSON source.
//!
//! skilldb provides:
//! - Typed skill records with required-field validation
//! - A declared column list per schema variant (bilingual or monolingual)
//! - SQLite-backed storage rebuilt from scratch on every run
//! - Read-back and summary statistics for the generated catalog

pub mod record;
pub mod storage;
pub mod loader;
pub mod config;
pub mod ui;

use std::path::PathBuf;

// Re-exports for convenient access
pub use record::{SkillRecord, SkillRow};
pub use storage::{SchemaVariant, SkillStore};
pub use loader::{LoadOptions, LoadReport, Loader};

/// Result type alias for skilldb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for skilldb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot read input {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input {}: {source}", path.display())]
    InputMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Duplicate skill id: {0}")]
    DuplicateKey(String),

    #[error("Table not found: {0}")]
    TableNotFound(&'static str),

    #[error("Unknown schema variant: {0}")]
    UnknownVariant(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

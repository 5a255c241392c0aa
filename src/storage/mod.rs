//! Storage Layer - SQLite-backed persistence
//!
//! The catalog database holds a single table:
//! - skills(id, name, [name_zh,] short_description, ..., detail_url)
//!
//! `platforms` and `tags` are stored as JSON array text.

pub mod schema;
pub mod sqlite;

pub use schema::{Column, SchemaVariant};
pub use sqlite::{CatalogStats, SkillStore};

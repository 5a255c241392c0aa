//! Catalog loader - rebuilds the skills database from its JSON source
//!
//! A run reads and validates the whole input before touching the output, so
//! an unreadable or invalid source never costs the previous database. Once
//! validation passes the old file is removed and the table is rebuilt from
//! scratch in a single transaction.

use std::path::{Path, PathBuf};
use crate::config;
use crate::record::{self, SkillRecord};
use crate::storage::{SchemaVariant, SkillStore};
use crate::{Error, Result};

/// Where to read from, where to write to, and which columns to write
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub variant: SchemaVariant,
}

impl LoadOptions {
    /// Default locations under a deployment root
    pub fn in_root(root: &Path) -> Self {
        Self {
            input: config::default_input_path_in(root),
            output: config::default_database_path_in(root),
            variant: SchemaVariant::default(),
        }
    }

    /// Apply settings from a config file; relative paths resolve against `root`
    pub fn with_config(mut self, root: &Path, cfg: &config::SkilldbConfig) -> Self {
        if let Some(input) = &cfg.input {
            self.input = config::resolve_in(root, input);
        }
        if let Some(output) = &cfg.output {
            self.output = config::resolve_in(root, output);
        }
        if let Some(variant) = cfg.variant {
            self.variant = variant;
        }
        self
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Number of records written
    pub count: usize,
    pub output: PathBuf,
    /// Whether a previous database was removed
    pub replaced: bool,
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skills: {} -> {}", self.count, self.output.display())
    }
}

pub struct Loader {
    options: LoadOptions,
}

impl Loader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Rebuild the output database from the input file
    pub fn run(&self) -> Result<LoadReport> {
        let LoadOptions { input, output, variant } = &self.options;

        let records = read_records(input)?;
        let rows = record::prepare_rows(&records)?;
        tracing::debug!("Validated {} records from {}", rows.len(), input.display());

        config::ensure_db_dir(output)?;
        let replaced = remove_existing(output)?;
        if replaced {
            tracing::info!("Removed previous database {}", output.display());
        }

        let mut store = SkillStore::create(output, *variant)?;
        tracing::debug!("Created {} table in {}", variant, output.display());

        // On error the store is dropped here, which rolls back and closes.
        let count = store.insert_all(&rows)?;
        store.close()?;

        tracing::info!("Wrote {} skills to {}", count, output.display());
        Ok(LoadReport {
            count,
            output: output.clone(),
            replaced,
        })
    }
}

/// Parse the whole input file into records
pub fn read_records(path: &Path) -> Result<Vec<SkillRecord>> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&contents).map_err(|source| Error::InputMalformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON array of skill objects
pub fn parse_records(contents: &str) -> serde_json::Result<Vec<SkillRecord>> {
    serde_json::from_str(contents)
}

fn remove_existing(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let records = parse_records(
            r#"[{"id":"s1","name":"Sort","tags":["algo","cs"]},{"id":"s2","name":"Search","popularity":7}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tags, vec!["algo", "cs"]);
        assert_eq!(records[1].popularity, Some(7));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_records(r#"{"id":"s1","name":"Sort"}"#).is_err());
        assert!(parse_records(r#"[{"id":"s1","name":"Sort","tags":"algo"}]"#).is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_records(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::InputUnreadable { .. }));
    }

    #[test]
    fn test_report_line() {
        let report = LoadReport {
            count: 3,
            output: PathBuf::from("data/skills.db"),
            replaced: false,
        };
        assert_eq!(report.to_string(), "skills: 3 -> data/skills.db");
    }

    #[test]
    fn test_default_options() {
        let options = LoadOptions::in_root(Path::new("site"));
        assert_eq!(options.input, PathBuf::from("site/data/skills.json"));
        assert_eq!(options.output, PathBuf::from("site/data/skills.db"));
        assert_eq!(options.variant, SchemaVariant::Bilingual);
    }

    #[test]
    fn test_config_overrides_defaults() {
        let root = Path::new("site");
        let cfg = config::SkilldbConfig {
            input: None,
            output: Some("build/catalog.db".into()),
            variant: Some(SchemaVariant::Monolingual),
        };
        let options = LoadOptions::in_root(root).with_config(root, &cfg);
        assert_eq!(options.input, PathBuf::from("site/data/skills.json"));
        assert_eq!(options.output, PathBuf::from("site/build/catalog.db"));
        assert_eq!(options.variant, SchemaVariant::Monolingual);
    }
}

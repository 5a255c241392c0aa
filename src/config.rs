use crate::storage::SchemaVariant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional settings read from `skilldb.toml` in the deployment root
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SkilldbConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub variant: Option<SchemaVariant>,
}

pub fn default_config_path_in(root: &Path) -> PathBuf {
    root.join("skilldb.toml")
}

pub fn default_input_path_in(root: &Path) -> PathBuf {
    root.join("data").join("skills.json")
}

pub fn default_database_path_in(root: &Path) -> PathBuf {
    root.join("data").join("skills.db")
}

/// Resolve a configured path against the deployment root
pub fn resolve_in(root: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<Option<SkilldbConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let config: SkilldbConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn ensure_db_dir(db_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

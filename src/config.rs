use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "relics-infos.json";
pub const DEFAULT_DATABASE: &str = "relics.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RelicdbConfig {
    pub input: Option<PathBuf>,
    pub database: Option<PathBuf>,
}

impl RelicdbConfig {
    /// Input path: explicit value, then config file, then default
    pub fn resolve_input(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    /// Database path: explicit value, then config file, then default
    pub fn resolve_database(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("relicdb.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<RelicdbConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: RelicdbConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

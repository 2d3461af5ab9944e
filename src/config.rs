//! Matcher configuration file.
//!
//! CHANGELOG:
//! - 01/12/2026 - Engine construction from config
//! - 01/11/2026 - Initial implementation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::{connection, SqliteStore};
use crate::matcher::{ColumnMapping, MatchEngine, MatchOptions};
use crate::names::NameEquivalence;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "NAMEMATCH_CONFIG";

/// Default config file path.
///
/// Tries, in order:
/// 1. NAMEMATCH_CONFIG env var
/// 2. <config dir>/namematch/config.json
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("namematch")
        .join("config.json")
}

/// Settings for building a [`MatchEngine`] over a SQLite table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// SQLite database holding the people table.
    pub database: PathBuf,
    pub table: String,
    pub mapping: ColumnMapping,
    pub options: MatchOptions,
    /// Extra SQL condition ANDed into every query.
    pub condition: Option<String>,
    /// Equivalence groups file; the built-in table when absent.
    pub equivalence: Option<PathBuf>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            database: connection::default_db_path(),
            table: "people".to_string(),
            mapping: ColumnMapping::default(),
            options: MatchOptions::default(),
            condition: None,
            equivalence: None,
        }
    }
}

impl MatcherConfig {
    /// Load a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse config JSON")
    }

    /// Load from `path`, or from the default path when it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = default_config_path();
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_equivalence(&self) -> Result<NameEquivalence> {
        match &self.equivalence {
            Some(path) => NameEquivalence::load(path),
            None => Ok(NameEquivalence::builtin()),
        }
    }

    pub fn open_store(&self) -> Result<SqliteStore> {
        SqliteStore::open(&self.database, self.table.clone())
            .with_context(|| format!("Failed to open people database at {:?}", self.database))
    }

    /// Open the store and build the engine this config describes.
    pub fn build_engine(&self) -> Result<MatchEngine<SqliteStore>> {
        let store = self.open_store()?;
        Ok(MatchEngine::new(store)
            .with_mapping(self.mapping.clone())
            .with_options(self.options)
            .with_condition(self.condition.clone())
            .with_expander(self.load_equivalence()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: MatcherConfig = serde_json::from_str(
            r#"{"table": "members", "mapping": {"first": "firstname"}, "options": {"skip_match_suffix": true}}"#,
        )
        .unwrap();
        assert_eq!(config.table, "members");
        assert_eq!(config.mapping.first, "firstname");
        assert_eq!(config.mapping.last, "last");
        assert!(config.options.skip_match_suffix);
        assert_eq!(config.condition, None);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        assert!(MatcherConfig::load_or_default(Some(Path::new("/nonexistent/namematch.json"))).is_err());
    }

    #[test]
    fn test_build_engine() {
        let dir = std::env::temp_dir().join(format!("namematch-config-{}", std::process::id()));
        let config = MatcherConfig {
            database: dir.join("people.db"),
            condition: Some("1 = 1".to_string()),
            ..MatcherConfig::default()
        };
        let engine = config.build_engine().unwrap();
        assert_eq!(engine.condition(), Some("1 = 1"));
        assert_eq!(engine.store().table(), "people");
        let _ = std::fs::remove_dir_all(&dir);
    }
}

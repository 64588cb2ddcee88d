use crate::core::{DbKeepError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Database path used when no configuration file supplies one.
pub const DEFAULT_DATABASE_PATH: &str = "data.db";

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dbkeep.toml";

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
}

/// Database-related configuration.
#[derive(Debug, Default, Deserialize)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

/// Loads configuration from a TOML file at the given path.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(&path).map_err(|e| {
        DbKeepError::Config(format!("failed to read {}: {}", path.as_ref().display(), e))
    })?;
    toml::from_str(&content).map_err(|e| {
        DbKeepError::Config(format!("failed to parse {}: {}", path.as_ref().display(), e))
    })
}

fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("dbkeep").join("config.toml"));
    }
    candidates
}

/// Resolves the default database path: the first configuration file found
/// (working directory, then the user config directory) wins; without one
/// the built-in default applies.
///
/// Consumed by the entry point and by the lazy reconnect in table creation.
pub fn default_database_path() -> String {
    for candidate in config_file_candidates() {
        if !candidate.exists() {
            continue;
        }
        match load_config(&candidate) {
            Ok(config) => {
                if let Some(path) = config.database.and_then(|db| db.path) {
                    return path;
                }
            }
            Err(e) => warn!("Ignoring unreadable config {}: {}", candidate.display(), e),
        }
    }
    DEFAULT_DATABASE_PATH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONFIG: &str = r#"
[database]
path = "ledger.db"
"#;

    #[test]
    fn test_parse_sample_config() {
        let config: Config = toml::from_str(SAMPLE_CONFIG).expect("Failed to parse sample config");
        let database = config.database.expect("Database configuration not found");
        assert_eq!(database.path.as_deref(), Some("ledger.db"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").expect("Failed to parse empty config");
        assert!(config.database.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/dbkeep.toml");
        assert!(result.is_err());
        match result.unwrap_err() {
            DbKeepError::Config(_) => {}
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dbkeep.toml");
        fs::write(&path, SAMPLE_CONFIG).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.database.and_then(|db| db.path).as_deref(),
            Some("ledger.db")
        );
    }
}

//! Process configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database path and logging settings for entry points.
//!
//! # Invariants
//! - Missing or blank variables fall back to defaults.
//! - Values are trimmed before use.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "PLACEMENT_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "PLACEMENT_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "PLACEMENT_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "placement_cell.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "placement_cell_logs";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl PlacementConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let temp_dir = std::env::temp_dir();
        let db_path = non_blank(lookup(DB_PATH_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| temp_dir.join(DEFAULT_DB_FILE_NAME));
        let log_level =
            non_blank(lookup(LOG_LEVEL_VAR)).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = non_blank(lookup(LOG_DIR_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| temp_dir.join(DEFAULT_LOG_DIR_NAME));

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{PlacementConfig, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> PlacementConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        PlacementConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);
        let temp_dir = std::env::temp_dir();
        assert_eq!(config.db_path, temp_dir.join("placement_cell.sqlite3"));
        assert_eq!(config.log_dir, temp_dir.join("placement_cell_logs"));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn explicit_values_are_trimmed() {
        let config = config_from(&[
            (DB_PATH_VAR, "  /var/lib/placement/cell.db "),
            (LOG_LEVEL_VAR, " warn"),
            (LOG_DIR_VAR, "/var/log/placement"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/placement/cell.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/placement"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[(DB_PATH_VAR, "   "), (LOG_LEVEL_VAR, "")]);
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("placement_cell.sqlite3")
        );
        assert_eq!(config.log_level, default_log_level());
    }
}

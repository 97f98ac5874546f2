//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Resolve database path, storage key and logging options.
//!
//! # Invariants
//! - Precedence is explicit override, then environment, then default.
//! - Blank values count as unset at every level.

use crate::logging::default_log_level;
use crate::repo::collection_repo::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SNIPNOTE_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "SNIPNOTE_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "SNIPNOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SNIPNOTE_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "snipnote.sqlite3";

/// Values supplied by the caller (CLI flags, FFI arguments).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<String>,
    pub storage_key: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub log_level: String,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves against the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves with an injectable environment lookup.
    pub fn resolve_with(
        overrides: &ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |explicit: &Option<String>, key: &str| {
            non_blank(explicit.clone()).or_else(|| non_blank(env(key)))
        };

        Self {
            db_path: pick(&overrides.db_path, ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            storage_key: pick(&overrides.storage_key, ENV_STORAGE_KEY)
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            log_level: pick(&overrides.log_level, ENV_LOG_LEVEL)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: pick(&overrides.log_dir, ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

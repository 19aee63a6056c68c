//! Runtime configuration for catalog storage and logging.
//!
//! # Invariants
//! - Defaults need no environment: `books.json` in the working directory,
//!   build-mode log level, file logging disabled.
//! - Blank environment values are ignored.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DEFAULT_CATALOG_FILE: &str = "books.json";
pub const CATALOG_PATH_ENV: &str = "BOOKSHELF_CATALOG";
pub const LOG_LEVEL_ENV: &str = "BOOKSHELF_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BOOKSHELF_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog JSON file.
    pub storage_path: PathBuf,
    /// One of trace|debug|info|warn|error.
    pub log_level: String,
    /// Rolling log directory; `None` leaves file logging off.
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Defaults overlaid with `BOOKSHELF_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = value(CATALOG_PATH_ENV) {
            self.storage_path = PathBuf::from(path);
        }
        if let Some(level) = value(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        if let Some(dir) = value(LOG_DIR_ENV) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self
    }
}

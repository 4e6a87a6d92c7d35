// src/db/paths.rs
//! Default database location

use std::path::PathBuf;

/// Database path used when neither the CLI nor the config file names one
pub const DEFAULT_DB_PATH: &str = "/var/lib/cookbook/cookbook.db";

/// Environment variable that overrides [`DEFAULT_DB_PATH`]
pub const DB_PATH_ENV: &str = "COOKBOOK_DB_PATH";

/// Resolve the default database path, honouring `COOKBOOK_DB_PATH`
pub fn default_db_path() -> PathBuf {
    std::env::var(DB_PATH_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

// src/server/config.rs
//! Configuration file parsing for the cookbook server
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address, CORS origins
//! - [database] - SQLite database path
//! - [logging] - Default tracing filter

use crate::server::ServerConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct ServiceConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Database settings
    #[serde(default)]
    pub database: DatabaseSection,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// API bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// CORS allowed origins (empty = any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

/// Database configuration section
#[derive(Debug, Deserialize)]
pub struct DatabaseSection {
    /// Path to the SQLite database file
    #[serde(default = "crate::db::paths::default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: crate::db::paths::default_db_path(),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    /// Filter used when RUST_LOG is not set (e.g., "info", "cookbook=debug")
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl ServiceConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ServiceConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        if self.database.path.as_os_str().is_empty() {
            anyhow::bail!("database.path must not be empty");
        }

        EnvFilter::try_new(&self.logging.filter)
            .with_context(|| format!("Invalid logging.filter: {}", self.logging.filter))?;

        Ok(())
    }

    /// Convert to the internal ServerConfig structure
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let bind_addr = self
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        Ok(ServerConfig {
            bind_addr,
            db_path: self.database.path.clone(),
            cors_allowed_origins: self.server.cors_origins.clone(),
        })
    }
}

// src/commands.rs
//! Command handlers for the cookbook CLI

use anyhow::{Context, Result};
use cookbook::ServiceConfig;
use std::path::PathBuf;
use tracing::info;

/// Install the tracing subscriber; RUST_LOG wins over `default_filter`
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

/// Create or migrate the database
pub fn cmd_init(db_path: Option<PathBuf>) -> Result<()> {
    init_tracing("info");

    let db_path = db_path.unwrap_or_else(cookbook::db::paths::default_db_path);
    cookbook::db::init(&db_path)
        .with_context(|| format!("Failed to initialize database at {}", db_path.display()))?;

    info!("Database ready at {}", db_path.display());
    println!("Database initialized successfully at: {}", db_path.display());
    Ok(())
}

/// Run the HTTP server
pub async fn cmd_serve(
    config_path: Option<PathBuf>,
    bind: Option<String>,
    db_path: Option<PathBuf>,
) -> Result<()> {
    let file_config = match &config_path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    init_tracing(&file_config.logging.filter);

    if let Some(path) = &config_path {
        info!("Loaded configuration from {}", path.display());
    }

    let mut server_config = file_config.to_server_config()?;
    if let Some(bind) = bind {
        server_config.bind_addr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;
    }
    if let Some(db_path) = db_path {
        server_config.db_path = db_path;
    }

    cookbook::run_server(server_config).await
}

// src/server/mod.rs
//! HTTP server exposing the recipe API
//!
//! Handlers never hold a connection across an `.await`: each request opens
//! its own SQLite connection inside `spawn_blocking`, does its work, and
//! drops it. The only state shared between requests is the immutable
//! [`AppState`].

pub mod config;
mod error;
mod handlers;
mod routes;

pub use config::ServiceConfig;
pub use error::{ApiError, ApiResult, ProblemDetails};
pub use handlers::recipes::{
    CreateRecipeRequest, IngredientBody, RecipeBody, ReplaceRecipeRequest, UpdateRecipeRequest,
};
pub use routes::build_router;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// CORS allowed origins (empty = any origin)
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            db_path: crate::db::paths::default_db_path(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// State shared by all handlers
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Open a database connection
    ///
    /// Call this from within `spawn_blocking`.
    pub fn open_db(&self) -> crate::Result<rusqlite::Connection> {
        crate::db::open(&self.config.db_path)
    }
}

/// Shared state handle passed to the router
pub type SharedState = Arc<AppState>;

/// Migrate the database and serve the API until Ctrl-C
pub async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting cookbook server on {}", config.bind_addr);
    tracing::info!("Database: {}", config.db_path.display());

    crate::db::init(&config.db_path)
        .with_context(|| format!("Failed to initialize {}", config.db_path.display()))?;

    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!("Ready to serve");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

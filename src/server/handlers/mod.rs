// src/server/handlers/mod.rs
//! HTTP request handlers

pub mod recipes;

use crate::server::{ApiError, ApiResult, ProblemDetails, SharedState};
use rusqlite::Connection;
use std::sync::Arc;

/// Run blocking database work for a request on the blocking pool
async fn with_db<T, F>(state: &SharedState, f: F) -> ApiResult<T>
where
    F: FnOnce(&mut Connection) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);

    let result = tokio::task::spawn_blocking(move || {
        let mut conn = state.open_db()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| ApiError(ProblemDetails::internal(&format!("Task join error: {}", e))))?;

    result.map_err(ApiError::from)
}

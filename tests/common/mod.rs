// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use cookbook::db;
use cookbook::db::models::{Ingredient, Recipe};
use cookbook::server::{build_router, AppState, ServerConfig};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// A migrated database in a temp dir plus a router serving it.
///
/// Keep the struct alive for the duration of the test; dropping it removes
/// the database.
pub struct TestApp {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        db::init(&db_path).unwrap();

        let config = ServerConfig {
            db_path: db_path.clone(),
            ..ServerConfig::default()
        };
        let router = build_router(Arc::new(AppState::new(config)));

        Self {
            _temp_dir: temp_dir,
            db_path,
            router,
        }
    }

    pub fn conn(&self) -> rusqlite::Connection {
        db::open(&self.db_path).unwrap()
    }

    /// Send a request, returning the status, headers and the parsed JSON
    /// body (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, json) = self.send(method, uri, body).await;
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }
}

/// Insert a recipe row directly, bypassing the API
pub fn sample_recipe(conn: &rusqlite::Connection, name: &str) -> i64 {
    let mut recipe = Recipe::new(name.to_string(), "Description recipe".to_string());
    recipe.insert(conn).unwrap()
}

/// Insert an ingredient row directly, bypassing the API
pub fn sample_ingredient(conn: &rusqlite::Connection, recipe_id: i64, name: &str) -> i64 {
    let mut ingredient = Ingredient::new(recipe_id, name.to_string());
    ingredient.insert(conn).unwrap()
}

/// URL of a single recipe
pub fn detail_url(recipe_id: i64) -> String {
    format!("/recipes/{}", recipe_id)
}

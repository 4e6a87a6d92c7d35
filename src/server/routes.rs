// src/server/routes.rs
//! Axum router configuration
//!
//! - `/health` - liveness check
//! - `/version` - build and schema version
//! - `/recipes` - recipe collection (list, create)
//! - `/recipes/:id` - single recipe (get, patch, put, delete)

use crate::server::handlers::recipes;
use crate::server::SharedState;
use axum::{
    http::HeaderValue,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Version information response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    pub api_version: &'static str,
    pub schema_version: i32,
}

/// Build the application router
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version_handler))
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .put(recipes::replace_recipe)
                .delete(recipes::delete_recipe),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // tower-http panics on "*" inside an origin list
    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Health check endpoint
///
/// GET /health
async fn health_check() -> &'static str {
    "OK"
}

/// Version information endpoint
///
/// GET /version
async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        api_version: "1.0",
        schema_version: crate::db::schema::SCHEMA_VERSION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{AppState, ServerConfig};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (TempDir, Router) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("cookbook.db");
        crate::db::init(&db_path).unwrap();

        let config = ServerConfig {
            db_path,
            ..ServerConfig::default()
        };
        let app = build_router(Arc::new(AppState::new(config)));
        (temp_dir, app)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (_temp, app) = test_app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn test_version() {
        let (_temp, app) = test_app();
        let (status, body) = send(&app, Method::GET, "/version", None).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["schema_version"], crate::db::schema::SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_unknown_recipe_is_problem_json() {
        let (_temp, app) = test_app();
        let (status, body) = send(&app, Method::GET, "/recipes/12", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["type"], "urn:cookbook:error:not_found");
        assert_eq!(json["detail"], "recipe 12 not found");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let (_temp, app) = test_app();
        let (status, _) = send(&app, Method::GET, "/recipes/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_missing_field_is_bad_request() {
        let (_temp, app) = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/recipes",
            Some(r#"{"name": "Toast", "ingredients": []}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 400);
    }

    #[tokio::test]
    async fn test_create_malformed_json_is_bad_request() {
        let (_temp, app) = test_app();
        let (status, _) = send(&app, Method::POST, "/recipes", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_temp, app) = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/recipes",
            Some(r#"{"name": "Toast", "description": "Dry", "ingredients": [{"name": "Bread"}]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let created: recipes::RecipeBody = serde_json::from_slice(&body).unwrap();
        let (status, body) =
            send(&app, Method::GET, &format!("/recipes/{}", created.id), None).await;
        assert_eq!(status, StatusCode::OK);

        let fetched: recipes::RecipeBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_wildcard_cors_origin_allows_any() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig {
            db_path: temp_dir.path().join("cookbook.db"),
            cors_allowed_origins: vec!["https://ok.example".to_string(), "*".to_string()],
            ..ServerConfig::default()
        };
        let app = build_router(Arc::new(AppState::new(config)));

        let request = Request::builder()
            .uri("/health")
            .header("origin", "https://anywhere.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        // Building must not panic on a bad origin
        let _ = cors_layer(&["https://ok.example".to_string(), "bad\norigin".to_string()]);
    }
}

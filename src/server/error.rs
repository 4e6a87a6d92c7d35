// src/server/error.rs

//! RFC 7807 problem responses for the HTTP API

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Error response body (RFC 7807)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Error type URI
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable title
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Detailed description
    pub detail: String,
}

impl ProblemDetails {
    pub fn new(error_type: &str, title: &str, status: u16, detail: &str) -> Self {
        Self {
            error_type: format!("urn:cookbook:error:{}", error_type),
            title: title.to_string(),
            status,
            detail: detail.to_string(),
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new("not_found", "Not Found", 404, &format!("{} not found", resource))
    }

    pub fn bad_request(detail: &str) -> Self {
        Self::new("bad_request", "Bad Request", 400, detail)
    }

    pub fn internal(detail: &str) -> Self {
        Self::new("internal", "Internal Error", 500, detail)
    }
}

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError(pub ProblemDetails);

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl From<ProblemDetails> for ApiError {
    fn from(problem: ProblemDetails) -> Self {
        ApiError(problem)
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::NotFound(what) => ApiError(ProblemDetails::not_found(&what)),
            crate::Error::InvalidInput(detail) => ApiError(ProblemDetails::bad_request(&detail)),
            other => {
                tracing::error!("Request failed: {}", other);
                ApiError(ProblemDetails::internal(&other.to_string()))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ProblemDetails::bad_request(&rejection.body_text()))
    }
}

/// A recipe id that is not an integer can never match a recipe
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError(ProblemDetails::not_found("recipe"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [("content-type", "application/problem+json")],
            Json(self.0),
        )
            .into_response()
    }
}

//! HTTP mapping for core errors and lookup failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docs_core::DocsError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Bad caller input (400).
    BadRequest(String),
    /// Title lookup failed (404). Carries suggestions when there are any.
    NotFound { message: String, suggestions: Vec<String> },
    /// Missing or wrong admin token (401).
    Unauthorized(String),
    /// Corpus could not be (re)loaded (503).
    ServiceUnavailable(String),
}

impl From<DocsError> for ApiError {
    fn from(err: DocsError) -> Self {
        match err {
            DocsError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            other => ApiError::ServiceUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response(),
            ApiError::NotFound { message, suggestions } => {
                let status = if suggestions.is_empty() { "not_found" } else { "suggestions" };
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": message, "status": status, "suggestions": suggestions })),
                )
                    .into_response()
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg }))).into_response(),
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "corpus unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": msg }))).into_response()
            }
        }
    }
}

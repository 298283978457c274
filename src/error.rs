use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the API. Every variant renders as `{"error": "..."}`
/// with status 200, which is what the frontend expects.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    DataNotFound(String),
}

impl AppError {
    pub fn upstream(what: &str, cause: impl std::fmt::Display) -> Self {
        AppError::UpstreamUnavailable(format!("Failed to {what}: {cause}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::UpstreamUnavailable(msg) => tracing::warn!("upstream error: {}", msg),
            AppError::InvalidRequest(msg) | AppError::DataNotFound(msg) => {
                tracing::debug!("request rejected: {}", msg)
            }
        }

        (StatusCode::OK, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

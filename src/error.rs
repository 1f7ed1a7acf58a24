//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error Enum ==
/// Failure reported by the fetch collaborator.
///
/// The cache never stores these; they travel back to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Backend could not be reached (connect failure, timeout)
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// Backend answered with a body that could not be decoded
    #[error("Invalid backend response: {0}")]
    InvalidBody(String),
}

// == Cache Error Enum ==
/// Unified error type for the cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fetch collaborator failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Fetch(FetchError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            CacheError::Fetch(FetchError::Transport(_)) => StatusCode::BAD_GATEWAY,
            CacheError::Fetch(FetchError::InvalidBody(_)) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;

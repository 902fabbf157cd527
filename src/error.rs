//! Application error taxonomy.
//!
//! Every fallible operation in the service returns `Result<T, AppError>`.
//! `SequencingConflict` is the only variant callers may retry; `NotFound`
//! and `InvalidMutation` are terminal. Handlers surface errors through the
//! `IntoResponse` impl below.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown document or version identifier (HTTP 404).
    #[error("Resource not found")]
    NotFound,

    /// A changes payload that cannot be applied: no recognized fields,
    /// malformed content, or an empty title (HTTP 400).
    #[error("Invalid mutation: {0}")]
    InvalidMutation(String),

    /// The store could not guarantee a unique next version number even after
    /// retrying; the whole mutation was rolled back (HTTP 409).
    #[error("Version sequencing conflict")]
    SequencingConflict,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::InvalidMutation(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_mutation", msg.clone())
            }
            AppError::SequencingConflict => (
                StatusCode::CONFLICT,
                "sequencing_conflict",
                "Concurrent edit conflict, please retry".to_string(),
            ),
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

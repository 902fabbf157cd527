//! Caller identity extraction.
//!
//! Authentication itself is an upstream concern: the gateway in front of
//! this service verifies the session and forwards the authenticated user id
//! in the `x-user-id` header. This extractor only reads that header;
//! ownership of individual documents is enforced by owner-scoped queries in
//! the handlers.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::routes::documents::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingIdentity)?;

        Ok(AuthUser {
            user_id: user_id.to_string(),
        })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingIdentity,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingIdentity => (
                StatusCode::UNAUTHORIZED,
                "missing_identity",
                "Authenticated user identity is required",
            ),
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

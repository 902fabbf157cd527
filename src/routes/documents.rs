//! Document handlers.
//!
//! ## Endpoints
//! - `GET    /api/v1/documents`        → list the caller's documents
//! - `POST   /api/v1/documents`        → create (document + version 1)
//! - `GET    /api/v1/documents/{id}`   → full document
//! - `PATCH  /api/v1/documents/{id}`   → apply a mutation
//!
//! There is deliberately no delete endpoint: trash/soft-delete lives in a
//! separate service that owns document lifecycle end-of-life.

use crate::{db, error::AppError, middleware::auth::AuthUser, models::*, services};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// Shared state for all handlers, injected through Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

pub async fn list_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let documents = db::list_documents(&state.pool, &auth_user.user_id).await?;
    Ok(Json(json!({ "documents": documents })))
}

pub async fn create_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let document = services::mutation::create_document(&state.pool, &auth_user.user_id, req).await?;
    Ok(Json(document))
}

pub async fn get_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let document = db::get_document(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(document))
}

/// `PATCH /documents/{id}` — the one mutation entry point. Title/content
/// edits append a version; folder/tag/status-only edits do not.
pub async fn update_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    // Ownership check before the mutation is allowed anywhere near the
    // coordinator.
    db::get_document(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let (changes, is_auto_save, change_summary) = req.into_changes();
    let document = services::mutation::apply_mutation(
        &state.pool,
        &id,
        &auth_user.user_id,
        changes,
        is_auto_save,
        change_summary,
    )
    .await?;
    Ok(Json(document))
}

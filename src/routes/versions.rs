//! Version-history handlers: paginated history, single snapshots, the
//! current pseudo-version, restore, and line diffs.
//!
//! ## Endpoints
//! - `GET  /api/v1/documents/{id}/versions`                    → history page
//! - `GET  /api/v1/documents/{id}/versions/current`            → current state
//! - `GET  /api/v1/documents/{id}/versions/{number}`           → full snapshot
//! - `POST /api/v1/documents/{id}/versions/{number}/restore`   → restore
//! - `GET  /api/v1/documents/{id}/diff?from=&to=`              → line diff

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    services::{self, diff},
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::documents::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Normalized (page, per_page, offset). Saturating arithmetic: the page
/// number comes straight off the query string, so an absurd value must fall
/// off the end of the history, not overflow.
fn page_window(pagination: &PaginationQuery) -> (i64, i64, i64) {
    let page = pagination.page.unwrap_or(1).max(1);
    let per_page = pagination
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = page.saturating_sub(1).saturating_mul(per_page);
    (page, per_page, offset)
}

pub async fn list_document_versions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Value>, AppError> {
    db::get_document(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let (page, per_page, offset) = page_window(&pagination);

    let versions = db::list_versions(&state.pool, &id, per_page, offset).await?;
    let total = db::count_versions(&state.pool, &id).await?;

    Ok(Json(json!({
        "versions": versions,
        "page": page,
        "per_page": per_page,
        "total": total,
    })))
}

/// The document's state at its current version number, shaped like a stored
/// version so clients can diff it against any historical snapshot.
pub async fn get_current_version(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Version>, AppError> {
    let document = db::get_document(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let version = services::history::current_version(&state.pool, &document).await?;
    Ok(Json(version))
}

pub async fn get_document_version(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, number)): Path<(String, i64)>,
) -> Result<Json<Version>, AppError> {
    db::get_document(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let version = db::get_version(&state.pool, &id, number)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(version))
}

/// `POST /documents/{id}/versions/{number}/restore` — copy a snapshot back
/// onto the live document. Appends a new `restore` version; the target row
/// is untouched.
pub async fn restore_document_version(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, number)): Path<(String, i64)>,
    body: Bytes,
) -> Result<Json<Document>, AppError> {
    db::get_document(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    // The body is optional; an empty POST means "use the default summary".
    let change_summary = if body.is_empty() {
        None
    } else {
        let req: RestoreRequest = serde_json::from_slice(&body).map_err(|e| {
            AppError::InvalidMutation(format!("invalid restore body: {}", e))
        })?;
        req.change_summary
    };
    let document =
        services::restore::restore(&state.pool, &id, &auth_user.user_id, number, change_summary)
            .await?;
    Ok(Json(document))
}

#[derive(Debug, Deserialize)]
pub struct DiffQuery {
    pub from: String,
    pub to: String,
}

/// `GET /documents/{id}/diff?from=1&to=current` — line diff between two
/// versions; either endpoint may be a version number or the literal
/// `current`.
pub async fn diff_document_versions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<DiffQuery>,
) -> Result<Json<Value>, AppError> {
    let document = db::get_document(&state.pool, &id, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let from = resolve_diff_endpoint(&state, &document, &query.from).await?;
    let to = resolve_diff_endpoint(&state, &document, &query.to).await?;

    let result = diff::line_diff(&from.content, &to.content);
    Ok(Json(json!({
        "from": from.version_number,
        "to": to.version_number,
        "lines": result.lines,
        "stats": result.stats,
    })))
}

async fn resolve_diff_endpoint(
    state: &AppState,
    document: &Document,
    endpoint: &str,
) -> Result<Version, AppError> {
    if endpoint == "current" {
        return services::history::current_version(&state.pool, document).await;
    }

    let number: i64 = endpoint.parse().map_err(|_| {
        AppError::InvalidMutation("diff endpoints must be a version number or 'current'".into())
    })?;
    db::get_version(&state.pool, &document.id, number)
        .await?
        .ok_or(AppError::NotFound)
}

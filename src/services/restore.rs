//! Restore operator.
//!
//! A restore is a mutation, never a rewrite of history: it copies a stored
//! snapshot's title/content back onto the live document through the
//! coordinator, which appends a fresh `restore` version. The target row is
//! never touched, and restoring to the currently-active number still logs a
//! new version — history records actions, not just distinct states.

use crate::db;
use crate::error::AppError;
use crate::models::{Document, DocumentChanges, VersionOperation};
use crate::services::mutation;
use sqlx::SqlitePool;

pub async fn restore(
    pool: &SqlitePool,
    document_id: &str,
    author_id: &str,
    target_version_number: i64,
    change_summary: Option<String>,
) -> Result<Document, AppError> {
    let target = db::get_version(pool, document_id, target_version_number)
        .await?
        .ok_or(AppError::NotFound)?;

    let summary = change_summary
        .unwrap_or_else(|| format!("Restored from version {}", target_version_number));
    let changes = DocumentChanges {
        title: Some(target.title),
        content: Some(target.content),
        rendered_preview: Some(target.rendered_preview),
        ..Default::default()
    };

    mutation::apply_with_operation(
        pool,
        document_id,
        author_id,
        changes,
        VersionOperation::Restore,
        false,
        Some(summary),
    )
    .await
}

//! Read-only history helpers on top of the snapshot store.

use crate::db;
use crate::error::AppError;
use crate::models::{Document, Version, VersionOperation};
use sqlx::SqlitePool;

/// The document's state at its current version number, for comparison
/// against stored versions. Normally this is the real newest snapshot row;
/// if it cannot be fetched, a pseudo-version is synthesized from the live
/// document (same number, live content).
pub async fn current_version(pool: &SqlitePool, doc: &Document) -> Result<Version, AppError> {
    if let Some(version) = db::get_version(pool, &doc.id, doc.current_version).await? {
        return Ok(version);
    }

    Ok(Version {
        id: doc.id.clone(),
        document_id: doc.id.clone(),
        author_id: doc.owner_id.clone(),
        version_number: doc.current_version,
        title: doc.title.clone(),
        content: doc.content.clone(),
        rendered_preview: doc.rendered_preview.clone(),
        size_bytes: doc.size_bytes,
        word_count: doc.word_count,
        char_count: doc.char_count,
        change_summary: "Current state".to_string(),
        operation: VersionOperation::Update,
        is_auto_save: false,
        created_at: doc.updated_at.clone(),
    })
}

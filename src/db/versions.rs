//! Snapshot store and version sequencer.
//!
//! Version rows are append-only: nothing in this module updates or deletes
//! them. The sequencer derives the next number from the document row's
//! counter on the caller's transaction handle — never by counting version
//! rows, which is racy and breaks if old versions are ever trimmed.

use crate::error::AppError;
use crate::models::{Version, VersionOperation, VersionSummary};
use sqlx::{SqliteConnection, SqlitePool};

/// Advance the document's version counter and return the new value.
///
/// This must be the first statement of the mutation transaction: the UPDATE
/// takes the write lock immediately, so two concurrent mutations of the same
/// document serialize instead of both reading a stale counter. Two callers
/// can therefore never receive the same number.
pub async fn next_version_number(
    conn: &mut SqliteConnection,
    document_id: &str,
) -> Result<i64, AppError> {
    let row: Option<(i64,)> = sqlx::query_as(
        r#"
        UPDATE documents
        SET current_version = current_version + 1
        WHERE id = ?
        RETURNING current_version
        "#,
    )
    .bind(document_id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(|(n,)| n).ok_or(AppError::NotFound)
}

/// Everything needed to append one snapshot row.
pub struct NewVersion<'a> {
    pub document_id: &'a str,
    pub author_id: &'a str,
    pub version_number: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub rendered_preview: &'a str,
    pub size_bytes: i64,
    pub word_count: i64,
    pub char_count: i64,
    pub change_summary: &'a str,
    pub operation: VersionOperation,
    pub is_auto_save: bool,
}

/// Append a snapshot on the coordinator's transaction.
pub async fn insert_version(
    conn: &mut SqliteConnection,
    version: &NewVersion<'_>,
) -> Result<(), AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO document_versions (id, document_id, author_id,
            version_number, title, content, rendered_preview, size_bytes,
            word_count, char_count, change_summary, operation, is_auto_save)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(version.document_id)
    .bind(version.author_id)
    .bind(version.version_number)
    .bind(version.title)
    .bind(version.content)
    .bind(version.rendered_preview)
    .bind(version.size_bytes)
    .bind(version.word_count)
    .bind(version.char_count)
    .bind(version.change_summary)
    .bind(version.operation)
    .bind(version.is_auto_save)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// One page of a document's history, newest first. Content and preview are
/// omitted; fetch a single version for the full snapshot.
pub async fn list_versions(
    pool: &SqlitePool,
    document_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<VersionSummary>, AppError> {
    let versions = sqlx::query_as::<_, VersionSummary>(
        r#"
        SELECT id, document_id, author_id, version_number, title, size_bytes,
               word_count, char_count, change_summary, operation,
               is_auto_save, created_at
        FROM document_versions
        WHERE document_id = ?
        ORDER BY version_number DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(document_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

pub async fn count_versions(pool: &SqlitePool, document_id: &str) -> Result<i64, AppError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM document_versions WHERE document_id = ?")
            .bind(document_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Full snapshot by document and version number.
pub async fn get_version(
    pool: &SqlitePool,
    document_id: &str,
    version_number: i64,
) -> Result<Option<Version>, AppError> {
    let version = sqlx::query_as::<_, Version>(
        r#"
        SELECT id, document_id, author_id, version_number, title, content,
               rendered_preview, size_bytes, word_count, char_count,
               change_summary, operation, is_auto_save, created_at
        FROM document_versions
        WHERE document_id = ? AND version_number = ?
        "#,
    )
    .bind(document_id)
    .bind(version_number)
    .fetch_optional(pool)
    .await?;

    Ok(version)
}

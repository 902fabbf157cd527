//! Mutation coordinator: the single write path for documents.
//!
//! Every content- or title-affecting edit runs inside one transaction that
//! advances the version counter, rewrites the live document, and appends the
//! snapshot row. Either all three commit or none do — a document can never
//! drift from its history. This module (plus document creation and restore,
//! which both come through here) is the only code that inserts version rows.

use crate::db;
use crate::db::versions::NewVersion;
use crate::error::AppError;
use crate::models::*;
use crate::services::text;
use sqlx::SqlitePool;
use std::time::Duration;

/// Whole-transaction retries on a busy store before failing closed.
const SEQUENCE_RETRY_ATTEMPTS: u32 = 3;

const DEFAULT_UPDATE_SUMMARY: &str = "Document updated";
const CREATE_SUMMARY: &str = "Document created";

/// Create a document born together with version 1, atomically.
pub async fn create_document(
    pool: &SqlitePool,
    owner_id: &str,
    req: CreateDocumentRequest,
) -> Result<Document, AppError> {
    let title = match req.title {
        Some(t) if t.trim().is_empty() => {
            return Err(AppError::InvalidMutation("title cannot be empty".into()))
        }
        Some(t) => t,
        None => "Untitled".to_string(),
    };
    let content = req.content.unwrap_or_default();
    validate_content(&content)?;

    let rendered_preview = req.rendered_preview.unwrap_or_default();
    let tags = req.tags.unwrap_or_default();
    let status = req.status.unwrap_or_else(|| "draft".to_string());
    let size_bytes = text::byte_size(&content) as i64;
    let word_count = text::count_words(&content) as i64;
    let char_count = text::count_chars(&content) as i64;

    let id = uuid::Uuid::now_v7().to_string();
    let mut tx = pool.begin().await?;
    db::insert_document(
        &mut tx,
        &id,
        owner_id,
        req.folder_id.as_deref(),
        &title,
        &content,
        &rendered_preview,
        size_bytes,
        word_count,
        char_count,
        &tags,
        &status,
    )
    .await?;
    db::insert_version(
        &mut tx,
        &NewVersion {
            document_id: &id,
            author_id: owner_id,
            version_number: 1,
            title: &title,
            content: &content,
            rendered_preview: &rendered_preview,
            size_bytes,
            word_count,
            char_count,
            change_summary: CREATE_SUMMARY,
            operation: VersionOperation::Create,
            is_auto_save: false,
        },
    )
    .await?;
    tx.commit().await?;

    db::get_document_by_id(pool, &id)
        .await?
        .ok_or_else(|| AppError::Internal("failed to re-read created document".into()))
}

/// Apply a caller-initiated mutation. Folder/tag/status-only changes update
/// the live row without touching history; anything involving title or
/// content appends a version.
pub async fn apply_mutation(
    pool: &SqlitePool,
    document_id: &str,
    author_id: &str,
    changes: DocumentChanges,
    is_auto_save: bool,
    change_summary: Option<String>,
) -> Result<Document, AppError> {
    apply_with_operation(
        pool,
        document_id,
        author_id,
        changes,
        VersionOperation::Update,
        is_auto_save,
        change_summary,
    )
    .await
}

/// Shared entry for updates and restores; restore forces its own operation
/// tag and summary.
pub(crate) async fn apply_with_operation(
    pool: &SqlitePool,
    document_id: &str,
    author_id: &str,
    changes: DocumentChanges,
    operation: VersionOperation,
    is_auto_save: bool,
    change_summary: Option<String>,
) -> Result<Document, AppError> {
    validate_changes(&changes)?;

    if !changes.touches_history() {
        let found = db::update_unversioned_fields(pool, document_id, &changes).await?;
        if !found {
            return Err(AppError::NotFound);
        }
        return db::get_document_by_id(pool, document_id)
            .await?
            .ok_or(AppError::NotFound);
    }

    let summary = change_summary.unwrap_or_else(|| DEFAULT_UPDATE_SUMMARY.to_string());

    let mut attempt = 0;
    loop {
        attempt += 1;
        match apply_versioned(
            pool,
            document_id,
            author_id,
            &changes,
            operation,
            is_auto_save,
            &summary,
        )
        .await
        {
            Ok(doc) => return Ok(doc),
            Err(err) if is_busy(&err) => {
                if attempt >= SEQUENCE_RETRY_ATTEMPTS {
                    return Err(AppError::SequencingConflict);
                }
                tracing::warn!(
                    document_id,
                    attempt,
                    "version sequencing contention, retrying mutation"
                );
                tokio::time::sleep(Duration::from_millis(20 * u64::from(attempt))).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// One attempt at the atomic counter + document + snapshot write.
async fn apply_versioned(
    pool: &SqlitePool,
    document_id: &str,
    author_id: &str,
    changes: &DocumentChanges,
    operation: VersionOperation,
    is_auto_save: bool,
    summary: &str,
) -> Result<Document, AppError> {
    let mut tx = pool.begin().await?;

    // The sequencer's counter UPDATE goes first so the transaction holds the
    // write lock before anything is read; concurrent mutations of the same
    // document serialize here.
    let version_number = db::next_version_number(&mut tx, document_id).await?;
    let doc = db::get_document_tx(&mut tx, document_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let title = changes.title.clone().unwrap_or(doc.title);
    let content = changes.content.clone().unwrap_or(doc.content);
    let rendered_preview = changes
        .rendered_preview
        .clone()
        .unwrap_or(doc.rendered_preview);
    let folder_id = match &changes.folder_id {
        Some(assignment) => assignment.clone(),
        None => doc.folder_id,
    };
    let tags = changes.tags.clone().unwrap_or_else(|| doc.tags.0.clone());
    let status = changes.status.clone().unwrap_or(doc.status);

    let size_bytes = text::byte_size(&content) as i64;
    let word_count = text::count_words(&content) as i64;
    let char_count = text::count_chars(&content) as i64;

    db::update_document_state(
        &mut tx,
        document_id,
        folder_id.as_deref(),
        &title,
        &content,
        &rendered_preview,
        size_bytes,
        word_count,
        char_count,
        &tags,
        &status,
    )
    .await?;
    db::insert_version(
        &mut tx,
        &NewVersion {
            document_id,
            author_id,
            version_number,
            title: &title,
            content: &content,
            rendered_preview: &rendered_preview,
            size_bytes,
            word_count,
            char_count,
            change_summary: summary,
            operation,
            is_auto_save,
        },
    )
    .await?;
    tx.commit().await?;

    db::get_document_by_id(pool, document_id)
        .await?
        .ok_or_else(|| AppError::Internal("failed to re-read mutated document".into()))
}

fn validate_changes(changes: &DocumentChanges) -> Result<(), AppError> {
    if changes.is_empty() {
        return Err(AppError::InvalidMutation(
            "changes payload has no recognized fields".into(),
        ));
    }
    if changes.rendered_preview.is_some() && !changes.touches_history() {
        return Err(AppError::InvalidMutation(
            "rendered_preview can only accompany a title or content change".into(),
        ));
    }
    if let Some(title) = &changes.title {
        if title.trim().is_empty() {
            return Err(AppError::InvalidMutation("title cannot be empty".into()));
        }
    }
    if let Some(content) = &changes.content {
        validate_content(content)?;
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), AppError> {
    if content.contains('\0') {
        return Err(AppError::InvalidMutation(
            "content must not contain NUL bytes".into(),
        ));
    }
    Ok(())
}

/// SQLite busy/locked conditions: the only errors worth re-attempting the
/// whole transaction for.
fn is_busy(err: &AppError) -> bool {
    match err {
        AppError::Database(sqlx::Error::Database(db_err)) => {
            matches!(
                db_err.code().as_deref(),
                Some("5") | Some("6") | Some("261") | Some("517")
            ) || db_err.message().contains("database is locked")
        }
        _ => false,
    }
}

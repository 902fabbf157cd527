use crate::error::AppError;
use crate::models::*;
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

/// All documents owned by a user, most recently edited first. Content and
/// preview are omitted to keep list payloads bounded.
pub async fn list_documents(
    pool: &SqlitePool,
    owner_id: &str,
) -> Result<Vec<DocumentSummary>, AppError> {
    let docs = sqlx::query_as::<_, DocumentSummary>(
        r#"
        SELECT id, owner_id, folder_id, title, current_version,
               size_bytes, word_count, char_count, tags, status,
               created_at, updated_at
        FROM documents
        WHERE owner_id = ?
        ORDER BY updated_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(docs)
}

/// Owner-scoped lookup. Returns `None` both for unknown ids and for
/// documents the caller does not own, so handlers can treat either as 404.
pub async fn get_document(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, owner_id, folder_id, title, content, rendered_preview,
               current_version, size_bytes, word_count, char_count, tags,
               status, created_at, updated_at
        FROM documents
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(doc)
}

/// Unscoped fetch, used by the services after ownership has already been
/// checked by the route layer.
pub async fn get_document_by_id(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, owner_id, folder_id, title, content, rendered_preview,
               current_version, size_bytes, word_count, char_count, tags,
               status, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doc)
}

/// Unscoped fetch on the coordinator's transaction handle.
pub async fn get_document_tx(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, owner_id, folder_id, title, content, rendered_preview,
               current_version, size_bytes, word_count, char_count, tags,
               status, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(doc)
}

/// Insert the live row for a brand-new document, already at version 1.
/// Runs on the creation transaction together with the version-1 insert.
#[allow(clippy::too_many_arguments)]
pub async fn insert_document(
    conn: &mut SqliteConnection,
    id: &str,
    owner_id: &str,
    folder_id: Option<&str>,
    title: &str,
    content: &str,
    rendered_preview: &str,
    size_bytes: i64,
    word_count: i64,
    char_count: i64,
    tags: &[String],
    status: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO documents (id, owner_id, folder_id, title, content,
                               rendered_preview, current_version, size_bytes,
                               word_count, char_count, tags, status)
        VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(folder_id)
    .bind(title)
    .bind(content)
    .bind(rendered_preview)
    .bind(size_bytes)
    .bind(word_count)
    .bind(char_count)
    .bind(Json(tags))
    .bind(status)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Write the full post-mutation document state on the coordinator's
/// transaction. The counter itself was already advanced by the sequencer.
#[allow(clippy::too_many_arguments)]
pub async fn update_document_state(
    conn: &mut SqliteConnection,
    id: &str,
    folder_id: Option<&str>,
    title: &str,
    content: &str,
    rendered_preview: &str,
    size_bytes: i64,
    word_count: i64,
    char_count: i64,
    tags: &[String],
    status: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE documents
        SET folder_id = ?, title = ?, content = ?, rendered_preview = ?,
            size_bytes = ?, word_count = ?, char_count = ?, tags = ?,
            status = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(folder_id)
    .bind(title)
    .bind(content)
    .bind(rendered_preview)
    .bind(size_bytes)
    .bind(word_count)
    .bind(char_count)
    .bind(Json(tags))
    .bind(status)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Partial update of the non-versioned fields only (folder/tags/status).
/// Builds the SET clause dynamically from the fields that are present; a
/// single statement, so no transaction is needed.
pub async fn update_unversioned_fields(
    pool: &SqlitePool,
    id: &str,
    changes: &DocumentChanges,
) -> Result<bool, AppError> {
    let mut sql =
        String::from("UPDATE documents SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')");
    if changes.folder_id.is_some() {
        sql.push_str(", folder_id = ?");
    }
    if changes.tags.is_some() {
        sql.push_str(", tags = ?");
    }
    if changes.status.is_some() {
        sql.push_str(", status = ?");
    }
    sql.push_str(" WHERE id = ?");

    let mut query = sqlx::query(&sql);
    if let Some(folder_id) = &changes.folder_id {
        query = query.bind(folder_id.as_deref());
    }
    if let Some(tags) = &changes.tags {
        query = query.bind(Json(tags));
    }
    if let Some(status) = &changes.status {
        query = query.bind(status);
    }
    query = query.bind(id);

    let result = query.execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

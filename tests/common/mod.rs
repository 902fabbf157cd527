//! Shared test harness: a throwaway SQLite database per test.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;
use verso::models::{CreateDocumentRequest, Document};
use verso::services::mutation;

/// Fresh migrated pool backed by a tempdir. Keep the `TempDir` alive for the
/// duration of the test; dropping it deletes the database file.
pub async fn setup() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("verso-test.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
        .expect("connect to test database");
    verso::MIGRATOR.run(&pool).await.expect("run migrations");
    (pool, dir)
}

#[allow(dead_code)]
pub async fn create_doc(
    pool: &SqlitePool,
    owner_id: &str,
    title: &str,
    content: &str,
) -> Document {
    mutation::create_document(
        pool,
        owner_id,
        CreateDocumentRequest {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("create document")
}

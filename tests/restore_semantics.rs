//! Restore is append-only: it copies a snapshot forward as a new version and
//! never rewrites history.

mod common;

use verso::db;
use verso::error::AppError;
use verso::models::{DocumentChanges, VersionOperation};
use verso::services::{mutation, restore};

async fn update_content(pool: &sqlx::SqlitePool, id: &str, content: &str) {
    mutation::apply_mutation(
        pool,
        id,
        "user-1",
        DocumentChanges {
            content: Some(content.to_string()),
            ..Default::default()
        },
        false,
        None,
    )
    .await
    .expect("update content");
}

#[tokio::test]
async fn restore_appends_a_version_with_the_target_content() {
    let (pool, _dir) = common::setup().await;
    let doc = common::create_doc(&pool, "user-1", "Notes", "original body").await;
    update_content(&pool, &doc.id, "revised body").await;

    let restored = restore::restore(&pool, &doc.id, "user-1", 1, None)
        .await
        .unwrap();

    assert_eq!(restored.current_version, 3);
    assert_eq!(restored.content, "original body");

    let v3 = db::get_version(&pool, &doc.id, 3).await.unwrap().unwrap();
    assert_eq!(v3.operation, VersionOperation::Restore);
    assert_eq!(v3.content, "original body");
    assert_eq!(v3.change_summary, "Restored from version 1");
    assert!(!v3.is_auto_save);
}

#[tokio::test]
async fn restore_never_mutates_the_target_version() {
    let (pool, _dir) = common::setup().await;
    let doc = common::create_doc(&pool, "user-1", "Notes", "original body").await;
    update_content(&pool, &doc.id, "revised body").await;

    let before = db::get_version(&pool, &doc.id, 1).await.unwrap().unwrap();
    restore::restore(&pool, &doc.id, "user-1", 1, None)
        .await
        .unwrap();
    let after = db::get_version(&pool, &doc.id, 1).await.unwrap().unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn restore_to_current_version_still_appends() {
    let (pool, _dir) = common::setup().await;
    let doc = common::create_doc(&pool, "user-1", "Notes", "original body").await;
    update_content(&pool, &doc.id, "revised body").await;

    // Content is already at version 2's state; the act of restoring is
    // still logged and still advances the counter.
    let restored = restore::restore(&pool, &doc.id, "user-1", 2, None)
        .await
        .unwrap();

    assert_eq!(restored.current_version, 3);
    assert_eq!(restored.content, "revised body");
    let v3 = db::get_version(&pool, &doc.id, 3).await.unwrap().unwrap();
    assert_eq!(v3.operation, VersionOperation::Restore);
    assert_eq!(v3.change_summary, "Restored from version 2");
}

#[tokio::test]
async fn restore_carries_the_target_title() {
    let (pool, _dir) = common::setup().await;
    let doc = common::create_doc(&pool, "user-1", "First title", "body").await;
    mutation::apply_mutation(
        &pool,
        &doc.id,
        "user-1",
        DocumentChanges {
            title: Some("Second title".to_string()),
            content: Some("new body".to_string()),
            ..Default::default()
        },
        false,
        None,
    )
    .await
    .unwrap();

    let restored = restore::restore(&pool, &doc.id, "user-1", 1, None)
        .await
        .unwrap();
    assert_eq!(restored.title, "First title");
    assert_eq!(restored.content, "body");
}

#[tokio::test]
async fn custom_restore_summary_is_kept() {
    let (pool, _dir) = common::setup().await;
    let doc = common::create_doc(&pool, "user-1", "Notes", "body").await;
    update_content(&pool, &doc.id, "other").await;

    let restored = restore::restore(
        &pool,
        &doc.id,
        "user-1",
        1,
        Some("Undo the experiment".to_string()),
    )
    .await
    .unwrap();

    let newest = db::get_version(&pool, &doc.id, restored.current_version)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(newest.change_summary, "Undo the experiment");
}

#[tokio::test]
async fn restore_to_missing_version_is_not_found() {
    let (pool, _dir) = common::setup().await;
    let doc = common::create_doc(&pool, "user-1", "Notes", "body").await;

    let err = restore::restore(&pool, &doc.id, "user-1", 99, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert_eq!(db::count_versions(&pool, &doc.id).await.unwrap(), 1);
}

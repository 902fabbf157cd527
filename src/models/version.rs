use serde::{Deserialize, Serialize};

/// How a version came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VersionOperation {
    Create,
    Update,
    Restore,
}

/// Immutable snapshot of a document at one version number. Self-contained:
/// the content is stored verbatim, never derived from a diff chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Version {
    pub id: String,
    pub document_id: String,
    pub author_id: String,
    pub version_number: i64,
    pub title: String,
    pub content: String,
    pub rendered_preview: String,
    pub size_bytes: i64,
    pub word_count: i64,
    pub char_count: i64,
    pub change_summary: String,
    pub operation: VersionOperation,
    pub is_auto_save: bool,
    pub created_at: String,
}

/// History-list projection without content/preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VersionSummary {
    pub id: String,
    pub document_id: String,
    pub author_id: String,
    pub version_number: i64,
    pub title: String,
    pub size_bytes: i64,
    pub word_count: i64,
    pub char_count: i64,
    pub change_summary: String,
    pub operation: VersionOperation,
    pub is_auto_save: bool,
    pub created_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RestoreRequest {
    pub change_summary: Option<String>,
}

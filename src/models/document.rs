use serde::{Deserialize, Deserializer, Serialize};
use sqlx::types::Json;

/// Keeps "field absent" and "field explicitly null" distinguishable: a bare
/// `Option<Option<T>>` folds JSON `null` into the outer `None`, which would
/// make clearing the folder unreachable through a PATCH body.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Live document state. Mutated in place by the mutation coordinator; its
/// `current_version` always matches the newest row in `document_versions`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Document {
    pub id: String,
    pub owner_id: String,
    pub folder_id: Option<String>,
    pub title: String,
    pub content: String,
    pub rendered_preview: String,
    pub current_version: i64,
    pub size_bytes: i64,
    pub word_count: i64,
    pub char_count: i64,
    pub tags: Json<Vec<String>>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// List-view projection: everything except the content body and preview, so
/// list payloads stay bounded.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DocumentSummary {
    pub id: String,
    pub owner_id: String,
    pub folder_id: Option<String>,
    pub title: String,
    pub current_version: i64,
    pub size_bytes: i64,
    pub word_count: i64,
    pub char_count: i64,
    pub tags: Json<Vec<String>>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub rendered_preview: Option<String>,
    pub folder_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

/// The mutation payload. Each field is an explicit optional so the
/// coordinator's "does this touch history" branch is compiler-checked.
///
/// `rendered_preview` is supplied by the rendering collaborator alongside a
/// content change and is stored verbatim, never recomputed here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub rendered_preview: Option<String>,
    /// None = field absent (keep), Some(None) = null (move to root),
    /// Some(Some(id)) = assign folder.
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

impl DocumentChanges {
    /// True when no recognized field is present at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.rendered_preview.is_none()
            && self.folder_id.is_none()
            && self.tags.is_none()
            && self.status.is_none()
    }

    /// Versioning triggers only on title- or content-affecting edits.
    pub fn touches_history(&self) -> bool {
        self.title.is_some() || self.content.is_some()
    }
}

/// Flat PATCH body: the changes plus the version metadata that rides along.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub rendered_preview: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    #[serde(default)]
    pub is_auto_save: bool,
    pub change_summary: Option<String>,
}

impl UpdateDocumentRequest {
    pub fn into_changes(self) -> (DocumentChanges, bool, Option<String>) {
        let changes = DocumentChanges {
            title: self.title,
            content: self.content,
            rendered_preview: self.rendered_preview,
            folder_id: self.folder_id,
            tags: self.tags,
            status: self.status,
        };
        (changes, self.is_auto_save, self.change_summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_folder_field_means_keep() {
        let req: UpdateDocumentRequest = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        assert_eq!(req.folder_id, None);
    }

    #[test]
    fn null_folder_field_means_move_to_root() {
        let req: UpdateDocumentRequest =
            serde_json::from_str(r#"{"folder_id": null}"#).unwrap();
        assert_eq!(req.folder_id, Some(None));
    }

    #[test]
    fn folder_field_with_value_assigns() {
        let req: UpdateDocumentRequest =
            serde_json::from_str(r#"{"folder_id": "folder-7"}"#).unwrap();
        assert_eq!(req.folder_id, Some(Some("folder-7".to_string())));
    }
}

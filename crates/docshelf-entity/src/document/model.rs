//! Document aggregate model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docshelf_core::AppResult;
use docshelf_core::types::{DocumentId, UserId};

use super::content;
use super::metadata::MetadataValue;
use super::tag::{Tag, TagCollection};

/// Data required to create a new document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// The owning user.
    pub owner_id: UserId,
    /// File name (without extension).
    pub file_name: String,
    /// File extension, checked against the allow-list.
    pub file_extension: String,
    /// Content type, checked against the allow-list.
    pub content_type: String,
    /// Text payload.
    pub content: String,
    /// Initial tags; duplicated keys collapse, first occurrence wins.
    pub tags: Vec<Tag>,
    /// Optional metadata tree.
    pub metadata: Option<MetadataValue>,
}

/// Full replacement of a document's mutable fields.
#[derive(Debug, Clone)]
pub struct DocumentUpdate {
    /// New file name.
    pub file_name: String,
    /// New file extension.
    pub file_extension: String,
    /// New content type.
    pub content_type: String,
    /// New text payload.
    pub content: String,
    /// The replacement tag set; the previous set is discarded, not merged.
    pub tags: Vec<Tag>,
}

/// A managed file's metadata record.
///
/// The aggregate owns its tag collection and metadata tree exclusively;
/// both are destroyed with it. Construction and every mutation re-check
/// the structural invariants, so an invalid `Document` is never
/// observable. Every mutation advances `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    owner_id: UserId,
    file_name: String,
    file_extension: String,
    content_type: String,
    content: String,
    tags: TagCollection,
    metadata: Option<MetadataValue>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a document with a fresh id and timestamp pair.
    ///
    /// Fails with a validation error when any field violates the schema;
    /// no partially constructed aggregate exists on failure.
    pub fn create(new: NewDocument) -> AppResult<Self> {
        validate_fields(&new.file_name, &new.file_extension, &new.content_type)?;
        let now = Utc::now();
        Ok(Self {
            id: DocumentId::new(),
            owner_id: new.owner_id,
            file_name: new.file_name,
            file_extension: new.file_extension,
            content_type: new.content_type,
            content: new.content,
            tags: TagCollection::from_tags(new.tags),
            metadata: new.metadata,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reassemble a document from already-validated parts (mapper use).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: DocumentId,
        owner_id: UserId,
        file_name: String,
        file_extension: String,
        content_type: String,
        content: String,
        tags: TagCollection,
        metadata: Option<MetadataValue>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            file_name,
            file_extension,
            content_type,
            content,
            tags,
            metadata,
            created_at,
            updated_at,
        }
    }

    /// Re-check all structural invariants. Called by the mapper before
    /// every write.
    pub fn validate(&self) -> AppResult<()> {
        validate_fields(&self.file_name, &self.file_extension, &self.content_type)
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &TagCollection {
        &self.tags
    }

    pub fn metadata(&self) -> Option<&MetadataValue> {
        self.metadata.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Insert a tag if its key is absent; an existing key is untouched.
    ///
    /// `updated_at` advances even when nothing was inserted; every tag
    /// call is observable as a write.
    pub fn add_tag(&mut self, tag: Tag) -> bool {
        let inserted = self.tags.add(tag);
        self.touch();
        inserted
    }

    /// Replace an existing tag's name; an absent key inserts nothing.
    /// `updated_at` advances regardless.
    pub fn update_tag(&mut self, tag: Tag) -> bool {
        let changed = self.tags.update(tag);
        self.touch();
        changed
    }

    /// Remove a tag by key, idempotently. `updated_at` advances
    /// regardless.
    pub fn delete_tag(&mut self, key: &str) -> bool {
        let removed = self.tags.remove(key);
        self.touch();
        removed
    }

    /// Replace all mutable fields and rebuild the tag set from scratch.
    ///
    /// Validates the replacement first; on failure the aggregate is left
    /// exactly as it was (no partial apply).
    pub fn update(&mut self, update: DocumentUpdate) -> AppResult<()> {
        validate_fields(
            &update.file_name,
            &update.file_extension,
            &update.content_type,
        )?;
        self.file_name = update.file_name;
        self.file_extension = update.file_extension;
        self.content_type = update.content_type;
        self.content = update.content;
        self.tags = TagCollection::from_tags(update.tags);
        self.touch();
        Ok(())
    }

    /// Replace the metadata tree.
    pub fn update_meta(&mut self, metadata: MetadataValue) {
        self.metadata = Some(metadata);
        self.touch();
    }

    /// Clear the metadata tree.
    pub fn delete_meta(&mut self) {
        self.metadata = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_fields(file_name: &str, file_extension: &str, content_type: &str) -> AppResult<()> {
    if file_name.trim().is_empty() {
        return Err(docshelf_core::AppError::validation(
            "File name must not be empty",
        ));
    }
    content::validate_extension(file_extension)?;
    content::validate_content_type(content_type)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tag(key: &str, name: &str) -> Tag {
        Tag::new(key, name).expect("valid tag")
    }

    fn new_document() -> NewDocument {
        NewDocument {
            owner_id: UserId::new(),
            file_name: "report".to_string(),
            file_extension: "md".to_string(),
            content_type: "text/markdown".to_string(),
            content: "# Q3".to_string(),
            tags: vec![tag("1", "a")],
            metadata: None,
        }
    }

    #[test]
    fn test_create_dedupes_tags_by_key() {
        let mut new = new_document();
        new.tags = vec![tag("1", "a"), tag("1", "b"), tag("2", "c")];
        let doc = Document::create(new).expect("valid document");
        assert_eq!(doc.tags().len(), 2);
        assert_eq!(doc.tags().get("1").unwrap().name, "a");
    }

    #[test]
    fn test_create_rejects_bad_fields() {
        let mut new = new_document();
        new.file_name = "  ".to_string();
        assert!(Document::create(new).is_err());

        let mut new = new_document();
        new.file_extension = "exe".to_string();
        assert!(Document::create(new).is_err());

        let mut new = new_document();
        new.content_type = "application/octet-stream".to_string();
        assert!(Document::create(new).is_err());
    }

    #[test]
    fn test_add_tag_idempotent_but_always_touches() {
        let mut doc = Document::create(new_document()).expect("valid document");
        let before = doc.updated_at();
        assert!(!doc.add_tag(tag("1", "other")));
        assert_eq!(doc.tags().len(), 1);
        assert_eq!(doc.tags().get("1").unwrap().name, "a");
        assert!(doc.updated_at() >= before);

        let after_noop = doc.updated_at();
        assert!(doc.add_tag(tag("2", "b")));
        assert!(doc.updated_at() >= after_noop);
        assert_eq!(doc.tags().len(), 2);
    }

    #[test]
    fn test_update_tag_absent_key_is_noop_with_touch() {
        let mut doc = Document::create(new_document()).expect("valid document");
        let before = doc.updated_at();
        assert!(!doc.update_tag(tag("missing", "x")));
        assert_eq!(doc.tags().len(), 1);
        assert!(doc.updated_at() >= before);
    }

    #[test]
    fn test_delete_tag_idempotent() {
        let mut doc = Document::create(new_document()).expect("valid document");
        assert!(doc.delete_tag("1"));
        assert!(!doc.delete_tag("1"));
        assert!(doc.tags().is_empty());
    }

    #[test]
    fn test_update_replaces_tag_set_entirely() {
        let mut doc = Document::create(new_document()).expect("valid document");
        doc.update(DocumentUpdate {
            file_name: "summary".to_string(),
            file_extension: "txt".to_string(),
            content_type: "text/plain".to_string(),
            content: "done".to_string(),
            tags: vec![tag("2", "b")],
        })
        .expect("valid update");

        assert_eq!(doc.file_name(), "summary");
        assert_eq!(doc.tags().len(), 1);
        assert!(!doc.tags().includes("1"));
        assert!(doc.tags().includes("2"));
    }

    #[test]
    fn test_invalid_update_leaves_aggregate_untouched() {
        let mut doc = Document::create(new_document()).expect("valid document");
        let before = doc.clone();
        let result = doc.update(DocumentUpdate {
            file_name: "summary".to_string(),
            file_extension: "exe".to_string(),
            content_type: "text/plain".to_string(),
            content: "x".to_string(),
            tags: vec![],
        });
        assert!(result.is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_meta_update_and_delete() {
        let mut doc = Document::create(new_document()).expect("valid document");
        let meta = MetadataValue::from_json(&json!({"phase": 2})).unwrap();
        doc.update_meta(meta.clone());
        assert_eq!(doc.metadata(), Some(&meta));
        doc.delete_meta();
        assert!(doc.metadata().is_none());
    }
}

//! Persistence mapping for the document aggregate.
//!
//! The aggregate is not row-shaped: tags live in their own table and the
//! metadata tree is stored as JSONB. `to_record` flattens, re-validating
//! first; `from_record` reconstructs without re-running creation-time
//! side effects (no new id, no new timestamps, no re-hashing).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use docshelf_core::AppResult;
use docshelf_core::types::{DocumentId, UserId};

use super::metadata::MetadataValue;
use super::model::Document;
use super::tag::{Tag, TagCollection};

/// One row of the `documents` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentRecord {
    /// Primary key.
    pub id: DocumentId,
    /// Owning user (foreign key).
    pub owner_id: UserId,
    /// File name.
    pub file_name: String,
    /// File extension.
    pub file_extension: String,
    /// Content type.
    pub content_type: String,
    /// Text payload.
    pub content: String,
    /// Metadata tree as JSONB, if any.
    pub metadata: Option<serde_json::Value>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

/// One row of the `tags` table. Composite key `(document_id, key)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TagRecord {
    /// Owning document (foreign key).
    pub document_id: DocumentId,
    /// Tag key.
    pub key: String,
    /// Tag name.
    pub name: String,
}

/// Flatten a document to its persisted shape.
pub fn to_record(document: &Document) -> AppResult<(DocumentRecord, Vec<TagRecord>)> {
    document.validate()?;

    let record = DocumentRecord {
        id: document.id(),
        owner_id: document.owner_id(),
        file_name: document.file_name().to_string(),
        file_extension: document.file_extension().to_string(),
        content_type: document.content_type().to_string(),
        content: document.content().to_string(),
        metadata: document.metadata().map(MetadataValue::to_json),
        created_at: document.created_at(),
        updated_at: document.updated_at(),
    };

    let tags = document
        .tags()
        .iter()
        .map(|tag| TagRecord {
            document_id: document.id(),
            key: tag.key.clone(),
            name: tag.name.clone(),
        })
        .collect();

    Ok((record, tags))
}

/// Reconstruct a document from its persisted rows.
pub fn from_record(record: DocumentRecord, tag_rows: Vec<TagRecord>) -> AppResult<Document> {
    let metadata = record
        .metadata
        .as_ref()
        .map(MetadataValue::from_json)
        .transpose()?;

    let tags = tag_rows
        .into_iter()
        .map(|row| Tag::new(row.key, row.name))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Document::from_parts(
        record.id,
        record.owner_id,
        record.file_name,
        record.file_extension,
        record.content_type,
        record.content,
        TagCollection::from_tags(tags),
        metadata,
        record.created_at,
        record.updated_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::NewDocument;
    use serde_json::json;

    fn sample() -> Document {
        Document::create(NewDocument {
            owner_id: UserId::new(),
            file_name: "report".to_string(),
            file_extension: "pdf".to_string(),
            content_type: "application/pdf".to_string(),
            content: "body".to_string(),
            tags: vec![
                Tag::new("1", "quarterly").unwrap(),
                Tag::new("2", "finance").unwrap(),
            ],
            metadata: Some(
                MetadataValue::from_json(&json!({
                    "department": "accounting",
                    "reviewed": true,
                    "scores": [1, 2, 3],
                }))
                .unwrap(),
            ),
        })
        .expect("valid document")
    }

    #[test]
    fn test_round_trip_is_field_wise_equal() {
        let document = sample();
        let (record, tag_rows) = to_record(&document).expect("flatten");
        let restored = from_record(record, tag_rows).expect("reconstruct");
        assert_eq!(restored, document);
    }

    #[test]
    fn test_round_trip_without_metadata_or_tags() {
        let document = Document::create(NewDocument {
            owner_id: UserId::new(),
            file_name: "empty".to_string(),
            file_extension: "txt".to_string(),
            content_type: "text/plain".to_string(),
            content: String::new(),
            tags: vec![],
            metadata: None,
        })
        .expect("valid document");

        let (record, tag_rows) = to_record(&document).expect("flatten");
        assert!(record.metadata.is_none());
        assert!(tag_rows.is_empty());
        let restored = from_record(record, tag_rows).expect("reconstruct");
        assert_eq!(restored, document);
    }

    #[test]
    fn test_tag_rows_carry_document_id() {
        let document = sample();
        let (_, tag_rows) = to_record(&document).expect("flatten");
        assert_eq!(tag_rows.len(), 2);
        assert!(tag_rows.iter().all(|t| t.document_id == document.id()));
    }

    #[test]
    fn test_from_record_rejects_null_metadata_leaf() {
        let document = sample();
        let (mut record, tag_rows) = to_record(&document).expect("flatten");
        record.metadata = Some(json!({"bad": null}));
        assert!(from_record(record, tag_rows).is_err());
    }
}

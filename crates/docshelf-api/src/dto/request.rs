//! Request DTOs with validation.
//!
//! These checks reject obviously malformed input at the HTTP boundary;
//! the aggregates re-validate the domain invariants (allow-lists,
//! metadata shape) on construction.

use serde::{Deserialize, Serialize};
use validator::Validate;

use docshelf_core::{AppError, AppResult};
use docshelf_entity::document::{DocumentFilter, MetadataValue, Tag};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub user_name: String,
    /// Plaintext password (hashed before it reaches the domain).
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub user_name: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// New plaintext password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// One tag in a request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    /// Tag key.
    #[validate(length(min = 1, message = "Tag key is required"))]
    pub key: String,
    /// Tag name.
    #[validate(length(min = 1, message = "Tag name is required"))]
    pub name: String,
}

impl TagRequest {
    /// Convert into a domain tag.
    pub fn into_tag(self) -> AppResult<Tag> {
        Tag::new(self.key, self.name)
    }
}

/// Document creation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    /// File name.
    #[validate(length(min = 1, max = 255, message = "File name is required"))]
    pub file_name: String,
    /// File extension.
    #[validate(length(min = 1, message = "File extension is required"))]
    pub file_extension: String,
    /// Content type.
    #[validate(length(min = 1, message = "Content type is required"))]
    pub content_type: String,
    /// Text payload.
    #[serde(default)]
    pub content: String,
    /// Initial tags.
    #[serde(default)]
    pub tags: Vec<TagRequest>,
    /// Optional metadata tree (validated into the closed shape).
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Full document update request body. Tags replace the existing set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    /// New file name.
    #[validate(length(min = 1, max = 255, message = "File name is required"))]
    pub file_name: String,
    /// New file extension.
    #[validate(length(min = 1, message = "File extension is required"))]
    pub file_extension: String,
    /// New content type.
    #[validate(length(min = 1, message = "Content type is required"))]
    pub content_type: String,
    /// New text payload.
    #[serde(default)]
    pub content: String,
    /// Replacement tag set.
    #[serde(default)]
    pub tags: Vec<TagRequest>,
}

/// Convert a list of request tags into domain tags.
pub fn into_tags(tags: Vec<TagRequest>) -> AppResult<Vec<Tag>> {
    tags.into_iter().map(TagRequest::into_tag).collect()
}

/// Parse an optional raw metadata body into the closed tree shape.
pub fn parse_metadata(raw: Option<&serde_json::Value>) -> AppResult<Option<MetadataValue>> {
    raw.map(MetadataValue::from_json).transpose()
}

/// Query parameters for the document list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListQuery {
    /// Tag keys to match (comma-separated, any-of).
    pub tag_key: Option<String>,
    /// Tag names to match (comma-separated, any-of).
    pub tag_name: Option<String>,
    /// Metadata subtree to match, JSON-encoded.
    pub metadata: Option<String>,
}

impl DocumentListQuery {
    /// Build the domain filter from the raw query parameters.
    pub fn into_filter(self) -> AppResult<DocumentFilter> {
        let metadata = self
            .metadata
            .as_deref()
            .map(|raw| {
                let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
                    AppError::validation(format!("Metadata filter is not valid JSON: {e}"))
                })?;
                MetadataValue::from_json(&value)
            })
            .transpose()?;

        Ok(DocumentFilter {
            tag_keys: split_list(self.tag_key),
            tag_names: split_list(self.tag_name),
            metadata,
        })
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_names() {
        let req: RegisterUserRequest =
            serde_json::from_str(r#"{"userName": "alice", "password": "Secret-99x"}"#)
                .expect("deserialize");
        assert_eq!(req.user_name, "alice");
    }

    #[test]
    fn test_list_query_splits_comma_lists() {
        let query = DocumentListQuery {
            tag_key: Some("1, 2,,3".to_string()),
            tag_name: None,
            metadata: None,
        };
        let filter = query.into_filter().expect("filter");
        assert_eq!(filter.tag_keys, vec!["1", "2", "3"]);
        assert!(filter.tag_names.is_empty());
    }

    #[test]
    fn test_list_query_rejects_bad_metadata_json() {
        let query = DocumentListQuery {
            tag_key: None,
            tag_name: None,
            metadata: Some("{not json".to_string()),
        };
        assert!(query.into_filter().is_err());
    }

    #[test]
    fn test_list_query_rejects_null_metadata_leaf() {
        let query = DocumentListQuery {
            tag_key: None,
            tag_name: None,
            metadata: Some(r#"{"a": null}"#.to_string()),
        };
        assert!(query.into_filter().is_err());
    }
}

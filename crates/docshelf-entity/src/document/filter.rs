//! In-memory document list filter.
//!
//! The filter is a pure predicate over the aggregate, applied after the
//! full set is fetched. It is independent of the storage adapter so it
//! can be tested without a database.

use serde::{Deserialize, Serialize};

use super::metadata::MetadataValue;
use super::model::Document;

/// Predicate over tags and metadata.
///
/// Within each list the semantics are "any of"; across the populated
/// dimensions the semantics are "all of".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Match documents carrying any of these tag keys.
    #[serde(default)]
    pub tag_keys: Vec<String>,
    /// Match documents carrying any tag with one of these names.
    #[serde(default)]
    pub tag_names: Vec<String>,
    /// Match documents whose metadata contains this subtree exactly.
    #[serde(default)]
    pub metadata: Option<MetadataValue>,
}

impl DocumentFilter {
    /// Whether the filter constrains anything at all.
    pub fn is_empty(&self) -> bool {
        self.tag_keys.is_empty() && self.tag_names.is_empty() && self.metadata.is_none()
    }

    /// Evaluate the predicate against one document.
    pub fn matches(&self, document: &Document) -> bool {
        if !self.tag_keys.is_empty()
            && !self.tag_keys.iter().any(|k| document.tags().includes(k))
        {
            return false;
        }

        if !self.tag_names.is_empty()
            && !document
                .tags()
                .iter()
                .any(|tag| self.tag_names.iter().any(|n| *n == tag.name))
        {
            return false;
        }

        if let Some(expected) = &self.metadata {
            match document.metadata() {
                Some(meta) => {
                    if !meta.contains(expected) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        true
    }

    /// Apply the predicate to a fetched set.
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        if self.is_empty() {
            return documents;
        }
        documents.into_iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::NewDocument;
    use crate::document::tag::Tag;
    use docshelf_core::types::UserId;
    use serde_json::json;

    fn doc(tags: Vec<(&str, &str)>, metadata: Option<serde_json::Value>) -> Document {
        Document::create(NewDocument {
            owner_id: UserId::new(),
            file_name: "f".to_string(),
            file_extension: "txt".to_string(),
            content_type: "text/plain".to_string(),
            content: String::new(),
            tags: tags
                .into_iter()
                .map(|(k, n)| Tag::new(k, n).unwrap())
                .collect(),
            metadata: metadata.map(|m| MetadataValue::from_json(&m).unwrap()),
        })
        .expect("valid document")
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = DocumentFilter::default();
        assert!(filter.matches(&doc(vec![], None)));
    }

    #[test]
    fn test_tag_key_any_of() {
        let filter = DocumentFilter {
            tag_keys: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&doc(vec![("b", "x")], None)));
        assert!(!filter.matches(&doc(vec![("c", "x")], None)));
    }

    #[test]
    fn test_tag_name_any_of() {
        let filter = DocumentFilter {
            tag_names: vec!["invoice".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&doc(vec![("1", "invoice")], None)));
        assert!(!filter.matches(&doc(vec![("1", "receipt")], None)));
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let filter = DocumentFilter {
            tag_keys: vec!["1".to_string()],
            tag_names: vec!["invoice".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&doc(vec![("1", "invoice")], None)));
        // Key matches but no tag carries the wanted name.
        assert!(!filter.matches(&doc(vec![("1", "receipt")], None)));
    }

    #[test]
    fn test_metadata_nested_match() {
        let filter = DocumentFilter {
            metadata: Some(MetadataValue::from_json(&json!({"project": {"phase": 2}})).unwrap()),
            ..Default::default()
        };
        assert!(filter.matches(&doc(
            vec![],
            Some(json!({"project": {"phase": 2, "name": "alpha"}}))
        )));
        assert!(!filter.matches(&doc(vec![], Some(json!({"project": {"phase": 3}})))));
        assert!(!filter.matches(&doc(vec![], None)));
    }

    #[test]
    fn test_apply_keeps_only_matches() {
        let filter = DocumentFilter {
            tag_keys: vec!["keep".to_string()],
            ..Default::default()
        };
        let docs = vec![
            doc(vec![("keep", "x")], None),
            doc(vec![("drop", "x")], None),
            doc(vec![("keep", "y")], None),
        ];
        assert_eq!(filter.apply(docs).len(), 2);
    }
}

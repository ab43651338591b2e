//! Tags and the deduplicated tag collection owned by a document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use docshelf_core::{AppError, AppResult};

/// One `{key, name}` label. The key is the tag's identity within its
/// owning document; the name is a mutable display value. Tag lifecycle is
/// tracked through the owning document's `updated_at`, so tags carry no
/// timestamps of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Identity within the owning collection.
    pub key: String,
    /// Display name.
    pub name: String,
}

impl Tag {
    /// Create a tag, rejecting empty key or name.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> AppResult<Self> {
        let key = key.into();
        let name = name.into();
        if key.trim().is_empty() {
            return Err(AppError::validation("Tag key must not be empty"));
        }
        if name.trim().is_empty() {
            return Err(AppError::validation("Tag name must not be empty"));
        }
        Ok(Self { key, name })
    }
}

/// A document's set of tags, keyed by tag key.
///
/// Insertion order is not preserved and snapshots carry no ordering
/// guarantee. All operations are O(1) average.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCollection {
    tags: HashMap<String, Tag>,
}

impl TagCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a list, deduplicating by key.
    /// The first occurrence of a key wins.
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        let mut collection = Self::new();
        for tag in tags {
            collection.add(tag);
        }
        collection
    }

    /// Insert a tag if its key is absent. Returns whether it was inserted;
    /// an existing key leaves the collection unchanged (first write wins).
    pub fn add(&mut self, tag: Tag) -> bool {
        if self.tags.contains_key(&tag.key) {
            return false;
        }
        self.tags.insert(tag.key.clone(), tag);
        true
    }

    /// Replace the name of an existing tag. Returns whether anything
    /// changed; an absent key is a no-op, never an insert.
    pub fn update(&mut self, tag: Tag) -> bool {
        match self.tags.get_mut(&tag.key) {
            Some(existing) => {
                existing.name = tag.name;
                true
            }
            None => false,
        }
    }

    /// Remove a tag by key. Idempotent; returns whether a tag was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.tags.remove(key).is_some()
    }

    /// Whether a tag with this key exists.
    pub fn includes(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// Look up a tag by key.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.get(key)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Snapshot of the tags, in no particular order.
    pub fn snapshot(&self) -> Vec<Tag> {
        self.tags.values().cloned().collect()
    }

    /// Iterate over the tags.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(key: &str, name: &str) -> Tag {
        Tag::new(key, name).expect("valid tag")
    }

    #[test]
    fn test_tag_rejects_empty_parts() {
        assert!(Tag::new("", "a").is_err());
        assert!(Tag::new("k", "").is_err());
        assert!(Tag::new("  ", "a").is_err());
    }

    #[test]
    fn test_add_is_first_write_wins() {
        let mut tags = TagCollection::new();
        assert!(tags.add(tag("1", "first")));
        assert!(!tags.add(tag("1", "second")));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("1").unwrap().name, "first");
    }

    #[test]
    fn test_update_absent_key_inserts_nothing() {
        let mut tags = TagCollection::new();
        assert!(!tags.update(tag("missing", "x")));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_update_replaces_name() {
        let mut tags = TagCollection::from_tags(vec![tag("1", "old")]);
        assert!(tags.update(tag("1", "new")));
        assert_eq!(tags.get("1").unwrap().name, "new");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut tags = TagCollection::from_tags(vec![tag("1", "a")]);
        assert!(tags.remove("1"));
        assert!(!tags.remove("1"));
        assert!(!tags.includes("1"));
    }

    #[test]
    fn test_from_tags_dedupes_by_key() {
        let tags = TagCollection::from_tags(vec![tag("1", "a"), tag("2", "b"), tag("1", "c")]);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("1").unwrap().name, "a");
    }
}

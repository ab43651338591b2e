//! User-defined metadata as a closed recursive tree.
//!
//! Leaves are strings, numbers, or booleans; branches are arrays or
//! string-keyed objects of the same shape. Anything else (`null` in
//! particular) is rejected at the boundary, so a held `MetadataValue`
//! is valid by construction and traversals can match exhaustively.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use docshelf_core::{AppError, AppResult};

/// One node of a metadata tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Boolean leaf.
    Bool(bool),
    /// Numeric leaf.
    Number(f64),
    /// String leaf.
    String(String),
    /// Ordered list of nodes.
    Array(Vec<MetadataValue>),
    /// String-keyed map of nodes.
    Object(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    /// Build a metadata tree from arbitrary JSON, rejecting values the
    /// tree cannot represent.
    pub fn from_json(value: &serde_json::Value) -> AppResult<Self> {
        match value {
            serde_json::Value::Null => Err(AppError::validation(
                "Metadata must not contain null values",
            )),
            serde_json::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| AppError::validation("Metadata number is out of range")),
            serde_json::Value::String(s) => Ok(Self::String(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<AppResult<Vec<_>>>()
                .map(Self::Array),
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), Self::from_json(v)?)))
                .collect::<AppResult<BTreeMap<_, _>>>()
                .map(Self::Object),
        }
    }

    /// Render the tree back to JSON (for JSONB storage and responses).
    /// Whole numbers render as JSON integers so a stored `2` does not
    /// come back as `2.0`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 =>
            {
                serde_json::Value::Number(serde_json::Number::from(*n as i64))
            }
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// Deep containment check used by the document filter.
    ///
    /// Objects match when every key of `expected` exists here with a
    /// matching value; leaves and arrays must be exactly equal. This is
    /// the "exact nested match" semantic of the list filter.
    pub fn contains(&self, expected: &MetadataValue) -> bool {
        match (self, expected) {
            (Self::Object(have), Self::Object(want)) => want
                .iter()
                .all(|(k, v)| have.get(k).is_some_and(|h| h.contains(v))),
            (have, want) => have == want,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_primitive_leaves() {
        for value in [json!("a"), json!(42), json!(1.5), json!(true)] {
            assert!(MetadataValue::from_json(&value).is_ok(), "{value}");
        }
    }

    #[test]
    fn test_accepts_deep_nesting() {
        let value = json!({
            "project": {"name": "alpha", "phase": 2},
            "reviewers": ["ann", "bo"],
            "flags": [{"draft": true}, {"draft": false}],
        });
        let tree = MetadataValue::from_json(&value).expect("valid tree");
        assert_eq!(tree.to_json(), value);
    }

    #[test]
    fn test_rejects_null_anywhere() {
        assert!(MetadataValue::from_json(&json!(null)).is_err());
        assert!(MetadataValue::from_json(&json!({"a": null})).is_err());
        assert!(MetadataValue::from_json(&json!([1, null])).is_err());
        assert!(MetadataValue::from_json(&json!({"a": {"b": [null]}})).is_err());
    }

    #[test]
    fn test_untagged_deserialize_rejects_null() {
        assert!(serde_json::from_str::<MetadataValue>("null").is_err());
    }

    #[test]
    fn test_contains_object_subset() {
        let have = MetadataValue::from_json(&json!({
            "a": 1, "b": {"c": "x", "d": "y"}, "e": [1, 2]
        }))
        .unwrap();
        let want = MetadataValue::from_json(&json!({"b": {"c": "x"}})).unwrap();
        assert!(have.contains(&want));

        let miss = MetadataValue::from_json(&json!({"b": {"c": "z"}})).unwrap();
        assert!(!have.contains(&miss));
    }

    #[test]
    fn test_contains_arrays_compare_exactly() {
        let have = MetadataValue::from_json(&json!({"e": [1, 2]})).unwrap();
        let exact = MetadataValue::from_json(&json!({"e": [1, 2]})).unwrap();
        let partial = MetadataValue::from_json(&json!({"e": [1]})).unwrap();
        assert!(have.contains(&exact));
        assert!(!have.contains(&partial));
    }
}

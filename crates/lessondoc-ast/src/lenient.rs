//! Lenient deserialization helpers
//!
//! Stored documents are loose JSON written by an editor. A field holding a
//! value of the wrong JSON type is narrowed to "absent" instead of failing
//! the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional field, treating a value of the wrong type as absent.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize an optional sequence, skipping elements of the wrong type.
///
/// A value that is not an array at all is treated as absent.
pub fn optional_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(collect_valid(items))),
        _ => Ok(None),
    }
}

/// Deserialize a sequence, using an empty one for `null` or a non-array.
///
/// Elements of the wrong type are skipped.
pub fn seq_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(optional_seq(deserializer)?.unwrap_or_default())
}

/// Deserialize a field, using its default for `null` or the wrong type.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(optional(deserializer)?.unwrap_or_default())
}

/// Deserialize a string field, using the empty string for anything else.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = optional(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Convert every element that fits `T`, dropping the rest in order.
pub fn collect_valid<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "optional")]
        name: Option<String>,
        #[serde(default, deserialize_with = "optional_seq")]
        tags: Option<Vec<String>>,
        #[serde(default, deserialize_with = "string_or_empty")]
        kind: String,
        #[serde(default, deserialize_with = "seq_or_empty")]
        items: Vec<u32>,
        #[serde(default, deserialize_with = "or_default")]
        nested: Nested,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Nested {
        #[serde(default)]
        depth: u32,
    }

    #[test]
    fn test_wrong_type_is_absent() {
        let fields: Fields = serde_json::from_value(json!({"name": 42, "kind": false})).unwrap();
        assert!(fields.name.is_none());
        assert_eq!(fields.kind, "");
    }

    #[test]
    fn test_null_is_absent() {
        let fields: Fields = serde_json::from_value(json!({"name": null})).unwrap();
        assert!(fields.name.is_none());
        assert!(fields.tags.is_none());
    }

    #[test]
    fn test_sequence_skips_bad_elements() {
        let fields: Fields =
            serde_json::from_value(json!({"tags": ["a", 1, "b", null]})).unwrap();
        assert_eq!(fields.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_non_array_sequence_is_absent() {
        let fields: Fields = serde_json::from_value(json!({"tags": "a"})).unwrap();
        assert!(fields.tags.is_none());
    }

    #[test]
    fn test_null_collections_are_empty() {
        let fields: Fields =
            serde_json::from_value(json!({"items": null, "nested": null})).unwrap();
        assert!(fields.items.is_empty());
        assert_eq!(fields.nested, Nested::default());

        let fields: Fields =
            serde_json::from_value(json!({"items": [1, "two", 3], "nested": "flat"})).unwrap();
        assert_eq!(fields.items, vec![1, 3]);
        assert_eq!(fields.nested, Nested::default());

        let fields: Fields = serde_json::from_value(json!({"nested": {"depth": 2}})).unwrap();
        assert_eq!(fields.nested.depth, 2);
    }
}

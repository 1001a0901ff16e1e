//! Vocabulary entries
//!
//! Lessons ship with a flat list of vocabulary records pre-joined by the
//! exporter. Reference nodes in the document tree point at these records by
//! `(table, key)`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;
use crate::node::Attrs;

/// One vocabulary record with its origin
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Where the record came from
    #[serde(
        rename = "ref",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<EntryRef>,

    /// Flat field data (field name to value)
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Attrs>,
}

/// Table and record key of a vocabulary entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntryRef {
    /// Source table name
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub table: Option<String>,

    /// Record key, a string or a number in practice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
}

impl VocabularyEntry {
    /// Create an entry for `table`/`key` carrying `data`
    pub fn new(table: impl Into<String>, key: impl Into<Value>, data: Attrs) -> Self {
        Self {
            origin: Some(EntryRef {
                table: Some(table.into()),
                key: Some(key.into()),
            }),
            data: Some(data),
        }
    }

    /// Source table name, if any
    pub fn table(&self) -> Option<&str> {
        self.origin.as_ref()?.table.as_deref()
    }

    /// Raw record key, if any (JSON `null` counts as absent)
    pub fn key(&self) -> Option<&Value> {
        self.origin
            .as_ref()?
            .key
            .as_ref()
            .filter(|key| !key.is_null())
    }
}

//! Reference map construction and lookup
//!
//! Vocabulary entries arrive as a flat, ordered list. They are indexed once
//! per render pass into `table -> record key -> field data`, and reference
//! nodes resolve against that index.
//!
//! Record keys are normalized to strings both when the map is built and when
//! it is queried, so a document pointing at key `1` finds an entry stored
//! under `"1"` and vice versa.

use std::collections::HashMap;

use lessondoc_ast::{Attrs, VocabularyEntry};
use serde_json::Value;
use tracing::debug;

/// Field data of one vocabulary record
pub type FieldData = Attrs;

/// Two-level lookup: table name, then normalized record key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMap {
    tables: HashMap<String, HashMap<String, FieldData>>,
}

impl ReferenceMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a list of vocabulary entries
    ///
    /// Entries without a table name, a usable key or data are skipped.
    /// When two entries share a table and key, the later one wins.
    pub fn from_entries(entries: &[VocabularyEntry]) -> Self {
        let mut map = Self::new();

        for (index, entry) in entries.iter().enumerate() {
            let table = entry.table().filter(|table| !table.is_empty());
            let key = entry.key().and_then(normalize_key);

            match (table, key, &entry.data) {
                (Some(table), Some(key), Some(data)) => map.insert(table, key, data.clone()),
                _ => debug!(index, "skipping vocabulary entry without table, key or data"),
            }
        }

        map
    }

    /// Insert a record, replacing any previous record under the same key
    pub fn insert(&mut self, table: impl Into<String>, key: impl Into<String>, data: FieldData) {
        self.tables
            .entry(table.into())
            .or_default()
            .insert(key.into(), data);
    }

    /// Look up a record by table and already-normalized key
    pub fn get(&self, table: &str, key: &str) -> Option<&FieldData> {
        self.tables.get(table)?.get(key)
    }

    /// Look up a record by table and raw key, as found on a reference node
    ///
    /// A missing table name, a missing or `null` key, an unknown table or an
    /// unknown key all yield `None`.
    pub fn lookup(&self, table: Option<&str>, key: Option<&Value>) -> Option<&FieldData> {
        let key = normalize_key(key?)?;
        self.get(table?, &key)
    }

    /// Check whether a table has any records
    pub fn contains_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Number of indexed records across all tables
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    /// Check if no record is indexed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build a reference map from vocabulary entries
pub fn build_reference_map(entries: &[VocabularyEntry]) -> ReferenceMap {
    ReferenceMap::from_entries(entries)
}

/// Normalize a record key to its lookup form
///
/// Strings are used unchanged. Integers, and floats holding an integral
/// value, become their decimal digits; other floats use the shortest
/// round-trip form. Booleans become `"true"`/`"false"`. `null`, arrays and
/// objects are not keys.
pub fn normalize_key(key: &Value) -> Option<String> {
    match key {
        Value::String(key) => Some(key.clone()),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(int.to_string())
            } else if let Some(uint) = number.as_u64() {
                Some(uint.to_string())
            } else {
                number.as_f64().map(format_float)
            }
        }
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn format_float(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

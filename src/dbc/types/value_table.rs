use serde::Serialize;
use std::collections::BTreeMap;

/// Enumeration of raw integer values to human readable labels.
///
/// Named tables come from `VAL_TABLE_` lines; the descriptions attached to a
/// single signal by `VAL_` lines use an empty name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValueTable {
    /// Table name (empty for inline signal descriptions).
    pub name: String,
    /// Raw value → label, ordered by raw value.
    pub entries: BTreeMap<i64, String>,
}

impl ValueTable {
    pub fn new(name: &str) -> Self {
        ValueTable {
            name: name.to_string(),
            entries: BTreeMap::new(),
        }
    }

    /// Returns the label for a raw value.
    pub fn get(&self, raw: i64) -> Option<&str> {
        self.entries.get(&raw).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

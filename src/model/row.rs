//! A single record: ordered column name to text value mapping

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A row of string cells keyed by column header.
///
/// Keys keep insertion order. Reading a key the row does not hold yields an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, String>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from key/value pairs; later duplicates overwrite earlier ones
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Build a row by pairing headers with field values.
    ///
    /// Fields past the last header are dropped; headers past the last field
    /// get no entry. Colliding headers are made unique with trailing spaces.
    pub fn from_fields<H, F>(headers: &[H], fields: impl IntoIterator<Item = F>) -> Self
    where
        H: AsRef<str>,
        F: Into<String>,
    {
        let mut row = Row::new();
        for (header, value) in headers.iter().zip(fields) {
            row.insert_unique(header.as_ref(), value);
        }
        row
    }

    /// Value under `key`, or `""` when the row has no such key
    pub fn get_or_default(&self, key: &str) -> &str {
        self.cells.get(key).map(String::as_str).unwrap_or("")
    }

    /// Value under `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    /// Insert a new key or overwrite the value of an existing one
    pub fn insert_or_overwrite(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(key.into(), value.into());
    }

    /// Insert under `key`, appending spaces to the key until it is unused.
    /// Returns the key actually used.
    pub fn insert_unique(&mut self, key: &str, value: impl Into<String>) -> String {
        let mut key = key.to_string();
        while self.cells.contains_key(&key) {
            key.push(' ');
        }
        self.cells.insert(key.clone(), value.into());
        key
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.cells.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Column names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every key of `predicate` is present here with an equal value.
    /// A row missing a predicate key does not match.
    pub fn matches(&self, predicate: &Row) -> bool {
        predicate
            .iter()
            .all(|(key, expected)| self.get(key) == Some(expected))
    }

    /// Sub-row over `keys`; keys this row lacks are filled with `""`
    pub fn project<K: AsRef<str>>(&self, keys: &[K]) -> Row {
        keys.iter()
            .map(|k| {
                let k = k.as_ref();
                (k.to_string(), self.get_or_default(k).to_string())
            })
            .collect()
    }

    /// Render this row as a single JSON object
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Mutable access to an existing value
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        self.cells.get_mut(key)
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

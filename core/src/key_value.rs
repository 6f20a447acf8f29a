//! Ordered string-keyed container used for headers and parameters.
//!
//! # Design
//! Backed by an `IndexMap` so iteration and serialization follow insertion
//! order. Overwriting an existing key keeps its original position; removing
//! a key shifts the later entries down so the remaining order is preserved.

use indexmap::IndexMap;

/// An ordered mapping of string keys to values.
///
/// Lookups of absent keys return `None`, never panic.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue<V = String> {
    entries: IndexMap<String, V>,
}

impl<V> KeyValue<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Insert `value` under `key`, replacing any previous value in place.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.entries.iter()
    }

    /// Snapshot of the current entries.
    pub fn to_map(&self) -> IndexMap<String, V>
    where
        V: Clone,
    {
        self.entries.clone()
    }
}

impl<V> Default for KeyValue<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<IndexMap<String, V>> for KeyValue<V> {
    fn from(entries: IndexMap<String, V>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for KeyValue<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a, V> IntoIterator for &'a KeyValue<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

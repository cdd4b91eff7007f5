//! FILENAME: pivot-stage/src/unique_values.rs
//! PURPOSE: The recursive set of distinct pivot values seen per level.
//! CONTEXT: One structure accumulates across all leaf groups of a single
//! execution. Nesting depth equals the number of active pivot columns; the
//! last level holds empty maps. Equality is structural over the nested
//! mapping, so the order in which keys were discovered cannot influence
//! change detection.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Distinct pivot-column values, nested by pivot level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueValues {
    children: FxHashMap<String, UniqueValues>,
}

impl UniqueValues {
    pub fn new() -> Self {
        UniqueValues::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of distinct keys at this level.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// The nested level for a key, if the key has been recorded.
    pub fn child(&self, key: &str) -> Option<&UniqueValues> {
        self.children.get(key)
    }

    /// Records a key at this level and returns its nested level, creating
    /// an empty one on first sight.
    pub fn ensure(&mut self, key: &str) -> &mut UniqueValues {
        self.children.entry(key.to_string()).or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.children.keys()
    }

    /// Keys at this level in sorted order, for deterministic downstream
    /// generation regardless of discovery order.
    pub fn sorted_keys(&self) -> Vec<&String> {
        let mut keys: Vec<&String> = self.children.keys().collect();
        keys.sort();
        keys
    }

    /// Maximum nesting depth below this level. Empty structure has depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }
}

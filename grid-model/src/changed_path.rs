//! FILENAME: grid-model/src/changed_path.rs
//! PURPOSE: Re-aggregation scope tracker for incremental aggregation.
//! CONTEXT: When a recomputation only touches part of the row tree, the
//! aggregation stage can limit its pass to the changed paths. A stage that
//! invalidates path-based bookkeeping (e.g. pivoting changed the secondary
//! column set) marks the tracker inactive, which tells aggregation to visit
//! the whole tree.

use serde::{Deserialize, Serialize};

/// Tracks whether path-limited aggregation is still valid for the current
/// recomputation cycle. Starts active; once inactive it stays inactive for
/// the rest of the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedPath {
    active: bool,
}

impl ChangedPath {
    pub fn new() -> Self {
        ChangedPath { active: true }
    }

    /// Forces the next aggregation pass to visit all paths.
    pub fn set_inactive(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for ChangedPath {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_active() {
        assert!(ChangedPath::new().is_active());
    }

    #[test]
    fn test_set_inactive_is_sticky() {
        let mut path = ChangedPath::new();
        path.set_inactive();
        assert!(!path.is_active());
        path.set_inactive();
        assert!(!path.is_active());
    }
}

//! Dense/sparse set with O(1) insert, remove, membership and indexed reads.
//!
//! INVARIANTS:
//! - `index[dense[i]] == i` for every `i`
//! - `dense` holds no duplicates
//!
//! Removal swaps the last element into the freed slot, so iteration order is
//! insertion order only until the first removal.

use std::collections::HashMap;
use std::hash::Hash as StdHash;

/// Enumerable set of active keys.
#[derive(Clone, Debug)]
pub struct ActiveSet<K> {
    dense: Vec<K>,
    index: HashMap<K, usize>,
}

impl<K: Copy + Eq + StdHash> ActiveSet<K> {
    /// Empty set.
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add `key`. Returns false if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.dense.len());
        self.dense.push(key);
        true
    }

    /// Remove `key`. Returns false if it was not present.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(position) = self.index.remove(key) else {
            return false;
        };
        self.dense.swap_remove(position);
        if let Some(moved) = self.dense.get(position) {
            self.index.insert(*moved, position);
        }
        true
    }

    /// Membership test.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Key at dense position `position`.
    pub fn get(&self, position: usize) -> Option<K> {
        self.dense.get(position).copied()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// True if no key is present.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Keys in dense order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.dense.iter()
    }
}

impl<K: Copy + Eq + StdHash> Default for ActiveSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

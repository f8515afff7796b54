//! Memo table for Collatz chain lengths.
//!
//! Keys are any value reached by a Collatz walk, not only the starts the
//! driver asks about. Every stored length is final: entries are never removed
//! and never rewritten with a different length.
//!
//! # Iteration Order
//! Entries iterate in insertion order. The driver relies on this to report
//! the first-inserted start when several share the longest chain.

use crate::{ChainLength, ChainRecord, Value};
use indexmap::IndexMap;

/// Insertion-ordered map from a sequence value to its chain length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainCache {
    entries: IndexMap<Value, ChainLength>,
}

impl ChainCache {
    /// A cache seeded with the base case `1 -> 1`.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// A seeded cache with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut entries = IndexMap::with_capacity(capacity.max(1));
        entries.insert(1, 1);
        Self { entries }
    }

    /// A cache holding nothing, not even the base case.
    pub fn unseeded() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, value: Value) -> Option<ChainLength> {
        self.entries.get(&value).copied()
    }

    pub fn contains(&self, value: Value) -> bool {
        self.entries.contains_key(&value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = (Value, ChainLength)> + '_ {
        self.entries.iter().map(|(&value, &length)| (value, length))
    }

    /// Store a computed length. A value that is already present keeps its
    /// original entry and position.
    pub(crate) fn record(&mut self, value: Value, length: ChainLength) {
        let stored = *self.entries.entry(value).or_insert(length);
        debug_assert_eq!(
            stored, length,
            "chain length for {} recorded twice with different values",
            value
        );
    }

    /// The first entry, in insertion order, holding the maximum length.
    pub fn longest(&self) -> Option<ChainRecord> {
        let mut best: Option<ChainRecord> = None;
        for (start, length) in self.iter() {
            match best {
                Some(ref record) if record.length >= length => {}
                _ => best = Some(ChainRecord { start, length }),
            }
        }
        best
    }
}

impl Default for ChainCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cache_holds_only_the_base_case() {
        let cache = ChainCache::new();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(1), Some(1));
        assert!(!cache.contains(2));
    }

    #[test]
    fn unseeded_cache_is_empty() {
        let cache = ChainCache::unseeded();
        assert!(cache.is_empty());
        assert_eq!(cache.longest(), None);
    }

    #[test]
    fn record_keeps_first_position() {
        let mut cache = ChainCache::new();
        cache.record(2, 2);
        cache.record(4, 3);
        cache.record(2, 2);
        let keys: Vec<Value> = cache.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 2, 4]);
    }

    #[test]
    fn longest_prefers_first_inserted_on_ties() {
        let mut cache = ChainCache::new();
        cache.record(13, 10);
        cache.record(12, 10);
        cache.record(3, 8);
        assert_eq!(
            cache.longest(),
            Some(ChainRecord {
                start: 13,
                length: 10
            })
        );
    }
}

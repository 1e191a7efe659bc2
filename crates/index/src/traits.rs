//! Index trait definitions for Arbor.
//!
//! This module defines the `KeyIndex` trait: the operation set an ordered
//! key index exposes to its callers.

/// Trait for ordered sets of scalar keys.
///
/// Every operation is total: absent keys and empty indexes are normal
/// states, never errors.
pub trait KeyIndex<K> {
    /// Inserts a key. Returns false if it was already present.
    fn insert(&mut self, key: K) -> bool;

    /// Removes a key. Returns false if it was not present.
    fn delete(&mut self, key: &K) -> bool;

    /// Checks if the index contains the given key.
    fn find(&self, key: &K) -> bool;

    /// Returns the smallest key.
    fn find_min(&self) -> Option<K>;

    /// Returns the largest key.
    fn find_max(&self) -> Option<K>;

    /// Returns the number of keys in the index.
    fn len(&self) -> usize;

    /// Returns true if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

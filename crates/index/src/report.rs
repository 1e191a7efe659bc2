//! Batch membership queries.
//!
//! A report records, for each queried key, whether the index holds it, and
//! renders one `<key> yes` or `<key> no` line per key.

use crate::traits::KeyIndex;
use alloc::vec::Vec;
use core::fmt;

/// Per-key membership results, in query order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MembershipReport<K> {
    entries: Vec<(K, bool)>,
}

impl<K: Copy> MembershipReport<K> {
    /// Queries every key against the index.
    pub fn query<I, Q>(index: &I, keys: Q) -> Self
    where
        I: KeyIndex<K> + ?Sized,
        Q: IntoIterator<Item = K>,
    {
        let entries = keys.into_iter().map(|key| (key, index.find(&key))).collect();
        Self { entries }
    }

    /// Returns the `(key, found)` pairs.
    pub fn entries(&self) -> &[(K, bool)] {
        &self.entries
    }

    /// Number of keys that were found.
    pub fn hits(&self) -> usize {
        self.entries.iter().filter(|(_, found)| *found).count()
    }

    /// Number of keys that were not found.
    pub fn misses(&self) -> usize {
        self.entries.len() - self.hits()
    }

    /// Number of keys queried.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys were queried.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: fmt::Display> fmt::Display for MembershipReport<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, found) in &self.entries {
            writeln!(f, "{} {}", key, if *found { "yes" } else { "no" })?;
        }
        Ok(())
    }
}

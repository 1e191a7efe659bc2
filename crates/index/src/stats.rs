//! Index statistics for the Arbor B-tree.
//!
//! Counters for the key population and for every structural change the
//! tree performs while rebalancing.

use core::sync::atomic::{AtomicUsize, Ordering};

/// Statistics for an index.
#[derive(Debug)]
pub struct IndexStats {
    /// Number of keys in the index.
    total_keys: AtomicUsize,
    /// Node splits, including root splits.
    splits: AtomicUsize,
    /// Splits of the root, each of which grew the tree by one level.
    root_splits: AtomicUsize,
    /// Keys borrowed from a left sibling.
    left_rotations: AtomicUsize,
    /// Keys borrowed from a right sibling.
    right_rotations: AtomicUsize,
    /// Sibling merges.
    merges: AtomicUsize,
    /// Times an empty root was replaced by its only child.
    root_collapses: AtomicUsize,
}

impl IndexStats {
    /// Creates a new empty stats instance.
    pub fn new() -> Self {
        Self {
            total_keys: AtomicUsize::new(0),
            splits: AtomicUsize::new(0),
            root_splits: AtomicUsize::new(0),
            left_rotations: AtomicUsize::new(0),
            right_rotations: AtomicUsize::new(0),
            merges: AtomicUsize::new(0),
            root_collapses: AtomicUsize::new(0),
        }
    }

    /// Returns the number of keys.
    pub fn total_keys(&self) -> usize {
        self.total_keys.load(Ordering::Relaxed)
    }

    /// Returns the number of node splits.
    pub fn splits(&self) -> usize {
        self.splits.load(Ordering::Relaxed)
    }

    /// Returns the number of root splits.
    pub fn root_splits(&self) -> usize {
        self.root_splits.load(Ordering::Relaxed)
    }

    /// Returns the number of borrows from a left sibling.
    pub fn left_rotations(&self) -> usize {
        self.left_rotations.load(Ordering::Relaxed)
    }

    /// Returns the number of borrows from a right sibling.
    pub fn right_rotations(&self) -> usize {
        self.right_rotations.load(Ordering::Relaxed)
    }

    /// Returns the number of sibling merges.
    pub fn merges(&self) -> usize {
        self.merges.load(Ordering::Relaxed)
    }

    /// Returns the number of root collapses.
    pub fn root_collapses(&self) -> usize {
        self.root_collapses.load(Ordering::Relaxed)
    }

    /// Increments the key count.
    pub fn add_key(&self) {
        self.total_keys.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrements the key count.
    pub fn remove_key(&self) {
        self.total_keys.fetch_sub(1, Ordering::Relaxed);
    }

    /// Records a split; `at_root` marks a split that grew the tree.
    pub fn record_split(&self, at_root: bool) {
        self.splits.fetch_add(1, Ordering::Relaxed);
        if at_root {
            self.root_splits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records a borrow from a left sibling.
    pub fn record_left_rotation(&self) {
        self.left_rotations.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a borrow from a right sibling.
    pub fn record_right_rotation(&self) {
        self.right_rotations.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a merge.
    pub fn record_merge(&self) {
        self.merges.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a root collapse.
    pub fn record_root_collapse(&self) {
        self.root_collapses.fetch_add(1, Ordering::Relaxed);
    }

    /// Resets the key count to zero. Structural counters are kept.
    pub fn clear(&self) {
        self.total_keys.store(0, Ordering::Relaxed);
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for IndexStats {
    fn clone(&self) -> Self {
        Self {
            total_keys: AtomicUsize::new(self.total_keys()),
            splits: AtomicUsize::new(self.splits()),
            root_splits: AtomicUsize::new(self.root_splits()),
            left_rotations: AtomicUsize::new(self.left_rotations()),
            right_rotations: AtomicUsize::new(self.right_rotations()),
            merges: AtomicUsize::new(self.merges()),
            root_collapses: AtomicUsize::new(self.root_collapses()),
        }
    }
}

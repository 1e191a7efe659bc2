//! Tree configuration.
//!
//! The order of a B-tree is the maximum number of children an internal node
//! may have. It is fixed when the tree is built and drives both occupancy
//! bounds:
//!
//! - maximum keys per node: `order - 1`
//! - minimum keys per non-root node: `ceil(order / 2) - 1`

use crate::error::{Error, Result};

/// Smallest order a B-tree can be built with.
pub const MIN_ORDER: usize = 3;

/// Order used when none is given.
pub const DEFAULT_ORDER: usize = 4;

/// Construction parameters for a B-tree index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    order: usize,
}

impl TreeConfig {
    /// Creates a config with the given order. The order is not checked until
    /// [`validate`](Self::validate) is called.
    pub const fn new(order: usize) -> Self {
        Self { order }
    }

    /// Returns the configured order.
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Returns a copy of this config with a different order.
    pub const fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Maximum number of keys a node may hold.
    pub const fn max_keys(&self) -> usize {
        self.order - 1
    }

    /// Minimum number of keys a non-root node must hold.
    pub const fn min_keys(&self) -> usize {
        self.order.div_ceil(2) - 1
    }

    /// Checks that the order is usable.
    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(Error::invalid_order(self.order, MIN_ORDER));
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}

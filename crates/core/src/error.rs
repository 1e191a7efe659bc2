//! Error types for the Arbor index.

use alloc::string::String;
use thiserror::Error;

/// Result type alias for Arbor operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for Arbor index operations.
///
/// Lookups and mutations never fail; the only errors come from building a
/// tree with a bad configuration or from an explicit invariant check.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The tree order is below the supported minimum.
    #[error("Invalid order {order}: a B-tree needs an order of at least {min}")]
    InvalidOrder {
        order: usize,
        min: usize,
    },
    /// A structural invariant does not hold for a node.
    #[error("Invariant violated at node {node}: {reason}")]
    InvariantViolation {
        node: usize,
        reason: String,
    },
}

impl Error {
    /// Creates an invalid order error.
    pub fn invalid_order(order: usize, min: usize) -> Self {
        Error::InvalidOrder { order, min }
    }

    /// Creates an invariant violation error.
    pub fn invariant_violation(node: usize, reason: impl Into<String>) -> Self {
        Error::InvariantViolation {
            node,
            reason: reason.into(),
        }
    }
}

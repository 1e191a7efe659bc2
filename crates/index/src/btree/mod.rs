//! B-tree index implementation for Arbor.
//!
//! This module provides an arena-backed B-tree whose nodes hold keys at
//! every level, rebalanced by splits on insert and by borrows and merges
//! on delete.

mod check;
mod iter;
mod node;
mod tree;

pub use check::TreeShape;
pub use iter::BTreeIterator;
pub use node::{Node, NodeId};
pub use tree::BTreeIndex;

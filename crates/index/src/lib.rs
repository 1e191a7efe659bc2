//! Arbor Index - In-memory B-tree index.
//!
//! This crate provides:
//!
//! - `BTreeIndex`: an ordered set of scalar keys kept in a B-tree of fixed
//!   order, with split, borrow and merge rebalancing
//! - `KeyIndex`: the operation set shared by ordered key indexes
//! - `MembershipReport`: batch `<key> yes|no` membership queries
//! - `IndexStats`: counters for keys and structural changes
//!
//! # Example
//!
//! ```rust
//! use arbor_index::{BTreeIndex, MembershipReport};
//!
//! let mut tree: BTreeIndex = BTreeIndex::new(4);
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.find(&12));
//! assert_eq!(tree.find_min(), Some(5));
//! assert_eq!(tree.find_max(), Some(30));
//!
//! tree.delete(&12);
//! assert!(!tree.find(&12));
//! assert!(tree.check_invariants().is_ok());
//!
//! let report = MembershipReport::query(&tree, [5, 12]);
//! assert_eq!(report.to_string(), "5 yes\n12 no\n");
//! ```

#![no_std]

extern crate alloc;

pub mod btree;
pub mod report;
pub mod stats;
pub mod traits;

pub use arbor_core::{Error, Key, Result, TreeConfig};
pub use btree::{BTreeIndex, TreeShape};
pub use report::MembershipReport;
pub use stats::IndexStats;
pub use traits::KeyIndex;

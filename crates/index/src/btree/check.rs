//! Structural validation for the B-tree.

use super::node::NodeId;
use super::tree::BTreeIndex;
use alloc::format;
use alloc::vec::Vec;
use arbor_core::{Error, Result};
use core::fmt::Debug;
use hashbrown::HashSet;

/// Shape of a tree that passed validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeShape {
    /// Number of levels; 0 for an empty tree.
    pub height: usize,
    /// Number of reachable nodes.
    pub nodes: usize,
    /// Number of keys across all nodes.
    pub keys: usize,
}

/// A node waiting to be checked, with the exclusive key bounds its parent
/// imposes on it.
struct Pending<K> {
    id: NodeId,
    depth: usize,
    parent: Option<NodeId>,
    lower: Option<K>,
    upper: Option<K>,
}

impl<K: Copy + Ord + Debug> BTreeIndex<K> {
    /// Validates every structural invariant of the tree.
    ///
    /// Checks key ordering and separation, node occupancy against the
    /// order, child counts, parent back-references, equal leaf depth, and
    /// that the live node and key counts match what is reachable from the
    /// root.
    pub fn check_invariants(&self) -> Result<TreeShape> {
        let Some(root) = self.root_id() else {
            if self.len() != 0 {
                return Err(Error::invariant_violation(
                    0,
                    format!("empty tree reports {} keys", self.len()),
                ));
            }
            return Ok(TreeShape::default());
        };

        let max_keys = self.config().max_keys();
        let min_keys = self.config().min_keys();

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut leaf_depth: Option<usize> = None;
        let mut key_total = 0;
        let mut stack = Vec::new();
        stack.push(Pending {
            id: root,
            depth: 0,
            parent: None,
            lower: None,
            upper: None,
        });

        while let Some(Pending { id, depth, parent, lower, upper }) = stack.pop() {
            if !visited.insert(id) {
                return Err(Error::invariant_violation(id, "node reachable twice"));
            }
            let node = self.node(id);

            if node.parent != parent {
                return Err(Error::invariant_violation(
                    id,
                    format!("parent is {:?}, expected {:?}", node.parent, parent),
                ));
            }

            let count = node.key_count();
            let floor = if id == root { 1 } else { min_keys };
            if count < floor || count > max_keys {
                return Err(Error::invariant_violation(
                    id,
                    format!("holds {} keys, allowed {}..={}", count, floor, max_keys),
                ));
            }
            key_total += count;

            if node.keys.windows(2).any(|w| w[0] >= w[1]) {
                return Err(Error::invariant_violation(
                    id,
                    format!("keys not strictly ascending: {:?}", node.keys),
                ));
            }
            let first = node.keys[0];
            let last = node.keys[count - 1];
            if lower.is_some_and(|l| first <= l) || upper.is_some_and(|u| last >= u) {
                return Err(Error::invariant_violation(
                    id,
                    format!("keys {:?} escape bounds ({:?}, {:?})", node.keys, lower, upper),
                ));
            }

            if node.is_leaf {
                if !node.children.is_empty() {
                    return Err(Error::invariant_violation(id, "leaf owns children"));
                }
                match leaf_depth {
                    None => leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return Err(Error::invariant_violation(
                            id,
                            format!("leaf at depth {}, expected {}", depth, expected),
                        ));
                    }
                    Some(_) => {}
                }
                continue;
            }

            if node.children.len() != count + 1 {
                return Err(Error::invariant_violation(
                    id,
                    format!("{} keys but {} children", count, node.children.len()),
                ));
            }
            for (i, &child) in node.children.iter().enumerate() {
                stack.push(Pending {
                    id: child,
                    depth: depth + 1,
                    parent: Some(id),
                    lower: if i == 0 { lower } else { Some(node.keys[i - 1]) },
                    upper: if i == count { upper } else { Some(node.keys[i]) },
                });
            }
        }

        if visited.len() != self.node_count() {
            return Err(Error::invariant_violation(
                root,
                format!("{} nodes reachable, {} live", visited.len(), self.node_count()),
            ));
        }
        if key_total != self.len() {
            return Err(Error::invariant_violation(
                root,
                format!("{} keys reachable, {} counted", key_total, self.len()),
            ));
        }

        Ok(TreeShape {
            height: leaf_depth.map_or(0, |d| d + 1),
            nodes: visited.len(),
            keys: key_total,
        })
    }
}

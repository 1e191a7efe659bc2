//! B-tree iterator implementation.

use super::node::{Node, NodeId};
use alloc::vec::Vec;

/// In-order iterator over the keys of a B-tree.
///
/// Keys in internal nodes sit between their neighbouring subtrees, so the
/// iterator keeps an explicit stack of `(node, next key position)` frames
/// instead of following leaf links.
pub struct BTreeIterator<'a, K> {
    /// Reference to the arena of nodes.
    arena: &'a [Node<K>],
    /// Path from the root to the node being visited.
    stack: Vec<(NodeId, usize)>,
    /// Keys not yet yielded.
    remaining: usize,
}

impl<'a, K: Copy + Ord> BTreeIterator<'a, K> {
    /// Creates a new iterator over the subtree rooted at `root`.
    pub fn new(arena: &'a [Node<K>], root: Option<NodeId>, len: usize) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend_left(root);
        }
        iter
    }

    /// Pushes the leftmost path starting at `node_id`.
    fn descend_left(&mut self, node_id: NodeId) {
        let arena = self.arena;
        let mut current = node_id;
        loop {
            self.stack.push((current, 0));
            let node = &arena[current];
            if node.is_leaf {
                break;
            }
            current = node.children[0];
        }
    }
}

impl<'a, K: Copy + Ord> Iterator for BTreeIterator<'a, K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        loop {
            let (node_id, pos) = *self.stack.last()?;
            let node = &arena[node_id];

            if pos < node.keys.len() {
                let key = node.keys[pos];
                if let Some(frame) = self.stack.last_mut() {
                    frame.1 = pos + 1;
                }
                if !node.is_leaf {
                    self.descend_left(node.children[pos + 1]);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some(key);
            }

            // Node exhausted, resume in the parent
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: Copy + Ord> ExactSizeIterator for BTreeIterator<'a, K> {}

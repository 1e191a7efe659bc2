//! B-tree implementation.

use super::iter::BTreeIterator;
use super::node::{Node, NodeId};
use crate::stats::IndexStats;
use crate::traits::KeyIndex;
use alloc::vec::Vec;
use arbor_core::{Key, Result, TreeConfig};
use core::fmt::Debug;
use log::{debug, trace};

/// A B-tree index over scalar keys.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. Children
/// are owned through their parent's `children` list; the `parent` field is a
/// plain back-reference used to find siblings while rebalancing.
#[derive(Debug)]
pub struct BTreeIndex<K = Key> {
    /// Arena of all nodes, live and released.
    arena: Vec<Node<K>>,
    /// Released arena slots, reused before the arena grows.
    free: Vec<NodeId>,
    /// Root node ID, `None` for an empty tree.
    root: Option<NodeId>,
    /// Order and occupancy bounds.
    config: TreeConfig,
    /// Statistics for this index.
    stats: IndexStats,
}

impl<K: Copy + Ord + Debug> BTreeIndex<K> {
    /// Creates a new empty B-tree with the given order.
    ///
    /// # Panics
    ///
    /// Panics if `order` is below [`arbor_core::MIN_ORDER`]. Use
    /// [`try_new`](Self::try_new) to get the error instead.
    pub fn new(order: usize) -> Self {
        match Self::try_new(order) {
            Ok(tree) => tree,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a new empty B-tree, rejecting orders below the minimum.
    pub fn try_new(order: usize) -> Result<Self> {
        Self::with_config(TreeConfig::new(order))
    }

    /// Creates a new empty B-tree from a config.
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            config,
            stats: IndexStats::new(),
        })
    }

    /// Returns the order of this tree.
    pub fn order(&self) -> usize {
        self.config.order()
    }

    /// Returns the config this tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Returns the statistics for this index.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.stats.total_keys()
    }

    /// Returns true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of levels: 0 for an empty tree, 1 for a lone leaf.
    pub fn height(&self) -> usize {
        let Some(mut current) = self.root else {
            return 0;
        };
        let mut height = 1;
        while !self.arena[current].is_leaf {
            current = self.arena[current].children[0];
            height += 1;
        }
        height
    }

    /// Returns the number of live nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len() - self.free.len()
    }

    /// Returns an in-order iterator over all keys.
    pub fn iter(&self) -> BTreeIterator<'_, K> {
        BTreeIterator::new(&self.arena, self.root, self.len())
    }

    /// Collects all keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.iter().collect()
    }

    /// Removes every key and node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.replace_root(None);
        self.stats.clear();
    }

    pub(super) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(super) fn node(&self, id: NodeId) -> &Node<K> {
        &self.arena[id]
    }

    /// Allocates a node, reusing a released slot when one is available.
    fn alloc_node(&mut self, node: Node<K>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.arena[id] = node;
                id
            }
            None => {
                let id = self.arena.len();
                self.arena.push(node);
                id
            }
        }
    }

    /// Releases a node's slot back to the arena.
    fn release_node(&mut self, id: NodeId) {
        self.arena[id].reset();
        self.free.push(id);
    }

    /// Installs a new root. The only place the root is reassigned.
    fn replace_root(&mut self, root: Option<NodeId>) {
        if let Some(id) = root {
            self.arena[id].parent = None;
        }
        self.root = root;
    }

    /// Points every child of `parent_id` back at it.
    fn adopt_children(&mut self, parent_id: NodeId) {
        for i in 0..self.arena[parent_id].children.len() {
            let child_id = self.arena[parent_id].children[i];
            self.arena[child_id].parent = Some(parent_id);
        }
    }

    /// Finds the node holding `key` and the key's position in it.
    fn find_node(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut current = self.root?;

        loop {
            let node = &self.arena[current];
            match node.search(key) {
                Ok(pos) => return Some((current, pos)),
                Err(_) if node.is_leaf => return None,
                Err(pos) => current = node.children[pos],
            }
        }
    }

    /// Returns the leftmost leaf under `from`.
    fn leftmost_leaf(&self, from: NodeId) -> NodeId {
        let mut current = from;
        while !self.arena[current].is_leaf {
            current = self.arena[current].children[0];
        }
        current
    }

    /// Returns the rightmost leaf under `from`.
    fn rightmost_leaf(&self, from: NodeId) -> NodeId {
        let mut current = from;
        while !self.arena[current].is_leaf {
            let children = &self.arena[current].children;
            current = children[children.len() - 1];
        }
        current
    }

    /// Checks if the tree contains the given key.
    pub fn find(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Returns the smallest key, or `None` for an empty tree.
    pub fn find_min(&self) -> Option<K> {
        let leaf_id = self.leftmost_leaf(self.root?);
        self.arena[leaf_id].keys.first().copied()
    }

    /// Returns the largest key, or `None` for an empty tree.
    pub fn find_max(&self) -> Option<K> {
        let leaf_id = self.rightmost_leaf(self.root?);
        self.arena[leaf_id].keys.last().copied()
    }

    /// Inserts a key into the tree.
    ///
    /// Returns false, leaving the tree untouched, if the key is already
    /// present in any node.
    pub fn insert(&mut self, key: K) -> bool {
        let Some(root_id) = self.root else {
            let mut leaf = Node::new_leaf();
            leaf.keys.push(key);
            let leaf_id = self.alloc_node(leaf);
            self.replace_root(Some(leaf_id));
            self.stats.add_key();
            trace!("insert {:?}: new root leaf {}", key, leaf_id);
            return true;
        };

        // Descend to the target leaf
        let mut current = root_id;
        let pos = loop {
            let node = &self.arena[current];
            match node.search(&key) {
                Ok(_) => {
                    trace!("insert {:?}: already present in node {}", key, current);
                    return false;
                }
                Err(pos) if node.is_leaf => break pos,
                Err(pos) => current = node.children[pos],
            }
        };

        self.arena[current].keys.insert(pos, key);
        self.stats.add_key();
        trace!("insert {:?}: leaf {} position {}", key, current, pos);

        if self.arena[current].key_count() > self.config.max_keys() {
            self.split(current);
        }

        true
    }

    /// Splits an overflowing node, then every ancestor the promotion
    /// overflows in turn.
    fn split(&mut self, node_id: NodeId) {
        let max_keys = self.config.max_keys();
        let mut current = node_id;

        while self.arena[current].key_count() > max_keys {
            match self.split_node(current) {
                Some(parent_id) => current = parent_id,
                None => break,
            }
        }
    }

    /// Splits one node at its median key and promotes the median.
    ///
    /// Returns the parent that received the median, or `None` when the root
    /// was split and a new root was created.
    fn split_node(&mut self, node_id: NodeId) -> Option<NodeId> {
        let node = &mut self.arena[node_id];
        let mid = node.key_count() / 2;
        let median = node.keys[mid];

        // Right half goes to a new sibling
        let mut sibling = if node.is_leaf {
            Node::new_leaf()
        } else {
            Node::new_internal()
        };
        sibling.keys = node.keys.split_off(mid + 1);
        if !node.is_leaf {
            sibling.children = node.children.split_off(mid + 1);
        }
        sibling.parent = node.parent;
        node.keys.truncate(mid);

        let parent_id = node.parent;
        let sibling_id = self.alloc_node(sibling);
        self.adopt_children(sibling_id);

        match parent_id {
            None => {
                let mut new_root = Node::new_internal();
                new_root.keys.push(median);
                new_root.children.push(node_id);
                new_root.children.push(sibling_id);

                let new_root_id = self.alloc_node(new_root);
                self.adopt_children(new_root_id);
                self.replace_root(Some(new_root_id));
                self.stats.record_split(true);
                debug!(
                    "root split: node {} promoted {:?} into new root {}",
                    node_id, median, new_root_id
                );
                None
            }
            Some(parent_id) => {
                let pos = self.arena[parent_id].find_key_position(&median);
                self.arena[parent_id].insert_child_at(pos, median, sibling_id);
                self.stats.record_split(false);
                debug!(
                    "split: node {} promoted {:?} into parent {}, new sibling {}",
                    node_id, median, parent_id, sibling_id
                );
                Some(parent_id)
            }
        }
    }

    /// Removes a key from the tree.
    ///
    /// Returns false, leaving the tree untouched, if the key is absent.
    pub fn delete(&mut self, key: &K) -> bool {
        let Some((mut node_id, mut pos)) = self.find_node(key) else {
            trace!("delete {:?}: not present", key);
            return false;
        };
        trace!("delete {:?}: found in node {} position {}", key, node_id, pos);

        let min_keys = self.config.min_keys();
        // Last node built by merging around the key; with an odd order it
        // can hold one key too many until the delete completes.
        let mut merged = None;

        loop {
            if self.arena[node_id].is_leaf {
                self.arena[node_id].keys.remove(pos);
                self.settle_leaf(node_id);
                break;
            }

            let left_id = self.arena[node_id].children[pos];
            let right_id = self.arena[node_id].children[pos + 1];

            if self.arena[left_id].key_count() > min_keys {
                // Replace with the predecessor
                let leaf_id = self.rightmost_leaf(left_id);
                let last = self.arena[leaf_id].key_count() - 1;
                let predecessor = self.arena[leaf_id].keys.remove(last);
                self.arena[node_id].keys[pos] = predecessor;
                self.settle_leaf(leaf_id);
                break;
            }

            if self.arena[right_id].key_count() > min_keys {
                // Replace with the successor
                let leaf_id = self.leftmost_leaf(right_id);
                let successor = self.arena[leaf_id].keys.remove(0);
                self.arena[node_id].keys[pos] = successor;
                self.settle_leaf(leaf_id);
                break;
            }

            // Neither side can spare a key: pull the key down into the
            // merged child and keep deleting from there
            let merged_id = self.merge_children(node_id, pos);
            if let Some(parent_id) = self.settle_merge(node_id, merged_id) {
                self.rebalance(parent_id);
            }
            merged = Some(merged_id);
            node_id = merged_id;
            pos = self.arena[merged_id].find_key_position(key);
        }

        self.stats.remove_key();

        if let Some(merged_id) = merged {
            if self.arena[merged_id].key_count() > self.config.max_keys() {
                self.split(merged_id);
            }
        }

        true
    }

    /// Restores the tree after a key was taken out of a leaf.
    fn settle_leaf(&mut self, leaf_id: NodeId) {
        if self.root == Some(leaf_id) {
            if self.arena[leaf_id].is_empty() {
                self.release_node(leaf_id);
                self.replace_root(None);
                debug!("tree emptied: released root leaf {}", leaf_id);
            }
        } else if self.arena[leaf_id].key_count() < self.config.min_keys() {
            self.rebalance(leaf_id);
        }
    }

    /// Fixes an underflowing non-root node by borrowing from a sibling or
    /// merging with one, walking up while parents underflow in turn.
    fn rebalance(&mut self, node_id: NodeId) {
        let min_keys = self.config.min_keys();
        let mut current = node_id;

        loop {
            if self.root == Some(current) || self.arena[current].key_count() >= min_keys {
                return;
            }
            let Some(parent_id) = self.arena[current].parent else {
                return;
            };

            let pos = self.arena[parent_id]
                .child_index(current)
                .expect("parent links each of its children");
            let sibling_count = self.arena[parent_id].children.len();

            // Try to borrow from left sibling
            if pos > 0 {
                let left_id = self.arena[parent_id].children[pos - 1];
                if self.arena[left_id].key_count() > min_keys {
                    self.borrow_from_left(current, left_id, parent_id, pos);
                    return;
                }
            }

            // Try to borrow from right sibling
            if pos + 1 < sibling_count {
                let right_id = self.arena[parent_id].children[pos + 1];
                if self.arena[right_id].key_count() > min_keys {
                    self.borrow_from_right(current, right_id, parent_id, pos);
                    return;
                }
            }

            // Merge with a sibling
            let merged_id = if pos > 0 {
                self.merge_children(parent_id, pos - 1)
            } else {
                self.merge_children(parent_id, pos)
            };

            match self.settle_merge(parent_id, merged_id) {
                Some(next) => current = next,
                None => return,
            }
        }
    }

    /// Rotates through the parent: the separator before `node_id` moves down
    /// to its front and the left sibling's largest key replaces it.
    fn borrow_from_left(&mut self, node_id: NodeId, left_id: NodeId, parent_id: NodeId, pos: usize) {
        let left = &mut self.arena[left_id];
        let Some(borrowed) = left.keys.pop() else {
            return;
        };
        let moved_child = if left.is_leaf {
            None
        } else {
            left.children.pop()
        };

        let separator = core::mem::replace(&mut self.arena[parent_id].keys[pos - 1], borrowed);

        let node = &mut self.arena[node_id];
        node.keys.insert(0, separator);
        if let Some(child_id) = moved_child {
            node.children.insert(0, child_id);
            self.arena[child_id].parent = Some(node_id);
        }

        self.stats.record_left_rotation();
        debug!(
            "borrow: node {} took {:?} from parent {}, left sibling {} gave {:?}",
            node_id, separator, parent_id, left_id, borrowed
        );
    }

    /// Rotates through the parent: the separator after `node_id` moves down
    /// to its end and the right sibling's smallest key replaces it.
    fn borrow_from_right(&mut self, node_id: NodeId, right_id: NodeId, parent_id: NodeId, pos: usize) {
        let right = &mut self.arena[right_id];
        if right.is_empty() {
            return;
        }
        let borrowed = right.keys.remove(0);
        let moved_child = if right.is_leaf {
            None
        } else {
            Some(right.children.remove(0))
        };

        let separator = core::mem::replace(&mut self.arena[parent_id].keys[pos], borrowed);

        let node = &mut self.arena[node_id];
        node.keys.push(separator);
        if let Some(child_id) = moved_child {
            node.children.push(child_id);
            self.arena[child_id].parent = Some(node_id);
        }

        self.stats.record_right_rotation();
        debug!(
            "borrow: node {} took {:?} from parent {}, right sibling {} gave {:?}",
            node_id, separator, parent_id, right_id, borrowed
        );
    }

    /// Merges child `pos + 1` of `parent_id` into child `pos`, absorbing the
    /// separator between them. Returns the surviving (left) child.
    fn merge_children(&mut self, parent_id: NodeId, pos: usize) -> NodeId {
        let left_id = self.arena[parent_id].children[pos];
        let right_id = self.arena[parent_id].children[pos + 1];

        // Remove separator and right child from parent
        let separator = self.arena[parent_id].keys.remove(pos);
        self.arena[parent_id].children.remove(pos + 1);

        let right_keys = core::mem::take(&mut self.arena[right_id].keys);
        let right_children = core::mem::take(&mut self.arena[right_id].children);

        // Update parent pointers before extending
        for &child_id in &right_children {
            self.arena[child_id].parent = Some(left_id);
        }

        let left = &mut self.arena[left_id];
        left.keys.push(separator);
        left.keys.extend(right_keys);
        left.children.extend(right_children);

        self.release_node(right_id);
        self.stats.record_merge();
        debug!(
            "merge: node {} absorbed {:?} and sibling {} under parent {}",
            left_id, separator, right_id, parent_id
        );

        left_id
    }

    /// Handles the parent after one of its merges.
    ///
    /// An emptied root is replaced by the merged child. Returns the parent
    /// when it is a non-root node that now underflows.
    fn settle_merge(&mut self, parent_id: NodeId, merged_id: NodeId) -> Option<NodeId> {
        if self.root == Some(parent_id) {
            if self.arena[parent_id].is_empty() {
                self.release_node(parent_id);
                self.replace_root(Some(merged_id));
                self.stats.record_root_collapse();
                debug!("root collapse: node {} is the new root", merged_id);
            }
            None
        } else if self.arena[parent_id].key_count() < self.config.min_keys() {
            Some(parent_id)
        } else {
            None
        }
    }
}

impl<K: Copy + Ord + Debug> KeyIndex<K> for BTreeIndex<K> {
    fn insert(&mut self, key: K) -> bool {
        BTreeIndex::insert(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        BTreeIndex::delete(self, key)
    }

    fn find(&self, key: &K) -> bool {
        BTreeIndex::find(self, key)
    }

    fn find_min(&self) -> Option<K> {
        BTreeIndex::find_min(self)
    }

    fn find_max(&self) -> Option<K> {
        BTreeIndex::find_max(self)
    }

    fn len(&self) -> usize {
        BTreeIndex::len(self)
    }

    fn is_empty(&self) -> bool {
        BTreeIndex::is_empty(self)
    }
}

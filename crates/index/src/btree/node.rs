//! B-tree node definitions.

use alloc::vec::Vec;

/// Node identifier in the B-tree arena.
pub type NodeId = usize;

/// A node in the B-tree.
///
/// Unlike a B+Tree, every key lives in exactly one node and internal nodes
/// hold real keys, not copies of leaf keys.
#[derive(Clone, Debug)]
pub struct Node<K> {
    /// Keys stored in this node, ascending and unique.
    pub keys: Vec<K>,
    /// For internal nodes: child node IDs, one more than `keys`.
    /// For leaf nodes: empty.
    pub children: Vec<NodeId>,
    /// Whether this is a leaf node.
    pub is_leaf: bool,
    /// Parent node ID. Never owning; only used to find siblings.
    pub parent: Option<NodeId>,
}

impl<K: Copy + Ord> Node<K> {
    /// Creates a new leaf node.
    pub fn new_leaf() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
            is_leaf: true,
            parent: None,
        }
    }

    /// Creates a new internal node.
    pub fn new_internal() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
            is_leaf: false,
            parent: None,
        }
    }

    /// Returns the number of keys in this node.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if this node is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Finds the position of the first key that is not less than `key`.
    ///
    /// For an internal node this is also the index of the child to descend
    /// into when the key is not stored here.
    pub fn find_key_position(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k < key)
    }

    /// Finds the exact position of a key, or `Err` with the descent position.
    pub fn search(&self, key: &K) -> Result<usize, usize> {
        let pos = self.find_key_position(key);
        if pos < self.keys.len() && &self.keys[pos] == key {
            Ok(pos)
        } else {
            Err(pos)
        }
    }

    /// Finds the position of a child ID among this node's children.
    pub fn child_index(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }

    /// Inserts a key and its right-hand child at the given position in an
    /// internal node.
    pub fn insert_child_at(&mut self, pos: usize, key: K, child: NodeId) {
        debug_assert!(!self.is_leaf);
        self.keys.insert(pos, key);
        self.children.insert(pos + 1, child);
    }

    /// Resets this node so its arena slot can be reused.
    pub fn reset(&mut self) {
        self.keys.clear();
        self.children.clear();
        self.is_leaf = true;
        self.parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_find_key_position() {
        let mut node: Node<i64> = Node::new_leaf();
        node.keys = vec![10, 20, 30];

        assert_eq!(node.find_key_position(&5), 0);
        assert_eq!(node.find_key_position(&10), 0);
        assert_eq!(node.find_key_position(&15), 1);
        assert_eq!(node.find_key_position(&30), 2);
        assert_eq!(node.find_key_position(&35), 3);
    }

    #[test]
    fn test_search() {
        let mut node: Node<i64> = Node::new_leaf();
        node.keys = vec![10, 20, 30];

        assert_eq!(node.search(&20), Ok(1));
        assert_eq!(node.search(&25), Err(2));
        assert_eq!(node.search(&1), Err(0));
    }

    #[test]
    fn test_insert_child_at() {
        let mut node: Node<i64> = Node::new_internal();
        node.keys = vec![10];
        node.children = vec![1, 2];

        node.insert_child_at(1, 20, 3);
        assert_eq!(node.keys, vec![10, 20]);
        assert_eq!(node.children, vec![1, 2, 3]);
        assert_eq!(node.child_index(3), Some(2));
        assert_eq!(node.child_index(9), None);
    }

    #[test]
    fn test_reset() {
        let mut node: Node<i64> = Node::new_internal();
        node.keys = vec![1];
        node.children = vec![4, 5];
        node.parent = Some(0);

        node.reset();
        assert!(node.is_empty());
        assert!(node.children.is_empty());
        assert!(node.is_leaf);
        assert_eq!(node.parent, None);
    }
}

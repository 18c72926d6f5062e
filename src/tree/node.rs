//! Tree node model
//!
//! A `TreeNode` is an ordered mapping from key to child node. Leaves have no
//! children. Once built, a tree is only read.

use indexmap::map::Entry;
use indexmap::IndexMap;

/// Deepest tree, in key levels below the root, that a snapshot may hold.
///
/// Kept under serde_json's nesting limit so every stored snapshot loads.
pub const MAX_DEPTH: usize = 100;

/// Ordered key → child mapping; the unit of both the snapshot and search.
///
/// Keys are unique per level and the first child inserted under a key wins:
/// `insert` hands back a rejected duplicate and `collect` drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    children: IndexMap<String, TreeNode>,
}

impl TreeNode {
    /// Create an empty (leaf) node
    pub fn new() -> Self {
        Self {
            children: IndexMap::new(),
        }
    }

    /// Insert a child under `key`, keeping insertion order.
    ///
    /// Keys are unique per level: if `key` is already present the existing
    /// child is kept and the rejected node is returned.
    pub fn insert(&mut self, key: String, child: TreeNode) -> Result<(), TreeNode> {
        match self.children.entry(key) {
            Entry::Occupied(_) => Err(child),
            Entry::Vacant(slot) => {
                slot.insert(child);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&TreeNode> {
        self.children.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// Child at a position in insertion order
    pub fn get_index(&self, index: usize) -> Option<(&str, &TreeNode)> {
        self.children
            .get_index(index)
            .map(|(key, child)| (key.as_str(), child))
    }

    /// Iterate over `(key, child)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.children.iter().map(|(key, child)| (key.as_str(), child))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Key levels below this node; a leaf has depth 0
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes below this one (not counting itself)
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

impl<K: Into<String>> FromIterator<(K, TreeNode)> for TreeNode {
    /// Collects pairs into a node; a repeated key keeps its first child
    /// and the later one is discarded.
    fn from_iter<I: IntoIterator<Item = (K, TreeNode)>>(iter: I) -> Self {
        let mut node = TreeNode::new();
        for (key, child) in iter {
            // first wins; the rejected duplicate is dropped
            let _ = node.insert(key.into(), child);
        }
        node
    }
}

//! The cell a [`Tree`][crate::tree::Tree] is made of.
//!
//! A `Node` owns its two children outright. There are no parent pointers: everything that needs
//! to know about a parent (deleting, computing depth) walks down from the root instead.

use std::fmt;

/// An owned, possibly empty, subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A single key with up to two children. The key never changes once the node exists - only the
/// child links are rewired by the owning tree.
///
/// Nodes are only ever handed out by reference. Owned nodes live inside a
/// [`Tree`][crate::tree::Tree], which copies and drops them without recursing.
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    // Only the keys of the children, so a long chain doesn't recurse once per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<K> Node<K> {
    pub(crate) fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, if there is one.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if there is one.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has a left child.
    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    /// Whether this node has a right child.
    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    /// Whether this node has no children at all.
    pub fn is_leaf(&self) -> bool {
        !self.has_left() && !self.has_right()
    }

    /// Whether exactly one of the two children is present.
    pub fn has_single_child(&self) -> bool {
        self.has_left() != self.has_right()
    }

    /// Whether both children are present.
    pub fn has_both_children(&self) -> bool {
        self.has_left() && self.has_right()
    }

    /// The children that are present, left before right.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let tree: Tree<_> = [1, 2, 3].into_iter().collect();
    /// let root = tree.root().unwrap();
    ///
    /// let children: Vec<_> = root.children().iter().map(|n| *n.key()).collect();
    /// assert_eq!(children, [1, 3]);
    /// ```
    pub fn children(&self) -> Vec<&Self> {
        self.left().into_iter().chain(self.right()).collect()
    }

    /// The number of edges on the longest path from this node down to a leaf. A leaf has a
    /// height of 0.
    pub fn height(&self) -> usize {
        // Counting levels breadth first keeps this off the call stack for skewed subtrees.
        let mut frontier = vec![self];
        let mut levels = 0;
        loop {
            frontier = frontier.into_iter().flat_map(Node::children).collect();
            if frontier.is_empty() {
                return levels;
            }
            levels += 1;
        }
    }
}

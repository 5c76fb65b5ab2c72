//! An unbalanced BST that can be put back into shape on request.
//!
//! Inserts and deletes never rotate anything, so feeding the tree sorted keys one at a time
//! builds what is effectively a linked list. [`Tree::rebalance`] flattens the tree in order and
//! rebuilds it by repeatedly splitting the keys at their midpoint.
//!
//! # Examples
//!
//! ```
//! use rebalance_bst::tree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.build([5, 3, 1, 3, 4, 2]);
//!
//! // Duplicates are collapsed and the result is balanced.
//! assert_eq!(tree.inorder(), [&1, &2, &3, &4, &5]);
//! assert!(tree.is_balanced());
//!
//! // Keys can only be stored once.
//! assert!(tree.insert(6));
//! assert!(!tree.insert(6));
//!
//! // Keep going to the right and the tree leans over.
//! for key in 7..12 {
//!     tree.insert(key);
//! }
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.len(), 11);
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::error::TreeError;
use crate::node::{Link, Node};

/// A Binary Search Tree over unique keys. It does not balance itself - see
/// [`rebalance`][Tree::rebalance].
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
    /// Set when the shape came out of `build`. Inserts and deletes leave it alone, so it can go
    /// stale. [`Tree::is_balanced`] is the real check.
    balanced: bool,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        // Each source node is paired with the empty slot its copy goes into.
        let mut root = None;
        let mut pending: Vec<(&Node<K>, &mut Link<K>)> = Vec::new();
        if let Some(source) = self.root() {
            pending.push((source, &mut root));
        }

        while let Some((source, slot)) = pending.pop() {
            let copy: &mut Node<K> = slot.insert(Node::new_boxed(source.key.clone()));
            let Node { left, right, .. } = copy;
            if let Some(source_left) = source.left() {
                pending.push((source_left, left));
            }
            if let Some(source_right) = source.right() {
                pending.push((source_right, right));
            }
        }

        Self {
            root,
            len: self.len,
            balanced: self.balanced,
        }
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("keys", &self.inorder())
            .finish()
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.build(iter);
        tree
    }
}

/// Which depth first order to emit keys in.
#[derive(Clone, Copy, Debug)]
enum DepthFirst {
    Pre,
    In,
    Post,
}

/// Work item for the depth first walk. `Enter` expands a node into its children and itself,
/// `Visit` emits the node.
enum Step<'a, K> {
    Enter(&'a Node<K>),
    Visit(&'a Node<K>),
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            balanced: false,
        }
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// How many keys are stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Whether the current shape was produced by [`build`][Tree::build] or
    /// [`rebalance`][Tree::rebalance]. This is not updated by inserts or deletes so it is only a
    /// hint. Use [`is_balanced`][Tree::is_balanced] to actually check.
    pub fn balanced_hint(&self) -> bool {
        self.balanced
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        // Unlinking children before each node is dropped keeps `Box`'s recursive drop shallow.
        let mut pending: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
        self.balanced = false;
    }

    /// Replaces the contents of the tree with the given keys. The keys may come in any order and
    /// may repeat. Returns the new root.
    ///
    /// The sorted, deduplicated keys are split at index `len / 2`. That key becomes the root, the
    /// keys before it make up the left subtree and the keys after it the right subtree, and so on
    /// down. At every node the two subtrees differ in size by at most one.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.build([7, 1, 2, 6, 3, 5, 4]);
    ///
    /// assert_eq!(root.map(|n| *n.key()), Some(4));
    /// assert_eq!(tree.level_order(), [&4, &2, &6, &1, &3, &5, &7]);
    /// ```
    pub fn build<I>(&mut self, keys: I) -> Option<&Node<K>>
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        self.clear();

        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        self.len = keys.len();
        self.root = Self::build_subtree(keys);
        self.balanced = true;
        debug!(len = self.len, "built tree");

        self.root()
    }

    /// Builds a subtree out of sorted, unique keys.
    fn build_subtree(mut keys: Vec<K>) -> Link<K> {
        if keys.is_empty() {
            return None;
        }
        let pivot = keys.len() / 2;
        let upper = keys.split_off(pivot + 1);
        let key = keys.pop()?;

        Some(Box::new(Node {
            key,
            left: Self::build_subtree(keys),
            right: Self::build_subtree(upper),
        }))
    }

    /// Adds `key` as a new leaf. Returns `false`, leaving the tree as it was, when the key is
    /// already present. Nothing is rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(tree.find(&1).is_some());
    ///
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        self.try_insert(key).is_ok()
    }

    /// Like [`insert`][Tree::insert] but says why nothing happened.
    ///
    /// # Errors
    ///
    /// [`TreeError::DuplicateKey`] if `key` is already stored.
    pub fn try_insert(&mut self, key: K) -> Result<(), TreeError>
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        let mut depth = 0usize;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => {
                    trace!(depth, "insert rejected duplicate key");
                    return Err(TreeError::DuplicateKey);
                }
                Ordering::Greater => &mut node.right,
            };
            depth += 1;
        }

        *link = Some(Node::new_boxed(key));
        self.len += 1;
        trace!(depth, len = self.len, "inserted leaf");
        Ok(())
    }

    /// Removes the node holding `key`. Returns `false`, leaving the tree as it was, when the key
    /// isn't present.
    ///
    /// A node with two children is replaced by its right child. Its left subtree is hung off the
    /// left of its in-order successor, which by construction has no left child.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    ///
    /// assert!(tree.delete(&4));
    /// assert!(tree.find(&4).is_none());
    /// assert_eq!(tree.inorder(), [&1, &2, &3, &5, &6, &7]);
    ///
    /// assert!(!tree.delete(&4));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        self.try_delete(key).is_ok()
    }

    /// Like [`delete`][Tree::delete] but says why nothing happened.
    ///
    /// # Errors
    ///
    /// [`TreeError::KeyNotFound`] if `key` isn't stored.
    pub fn try_delete(&mut self, key: &K) -> Result<(), TreeError>
    where
        K: Ord,
    {
        // Walk down to the slot in the parent (or the root slot) that owns the node.
        let mut link = &mut self.root;
        loop {
            match link {
                None => {
                    trace!("delete found no matching key");
                    return Err(TreeError::KeyNotFound);
                }
                Some(node) if node.key == *key => break,
                Some(node) => {
                    link = if *key < node.key {
                        &mut node.left
                    } else {
                        &mut node.right
                    };
                }
            }
        }

        let Some(mut node) = link.take() else {
            return Err(TreeError::KeyNotFound);
        };
        *link = match (node.left.take(), node.right.take()) {
            (None, None) => {
                trace!("deleted leaf");
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("deleted node with a single child");
                Some(child)
            }
            (Some(left), Some(mut right)) => {
                let mut successor = &mut right;
                while let Some(ref mut next) = successor.left {
                    successor = next;
                }
                successor.left = Some(left);
                trace!("deleted node with two children");
                Some(right)
            }
        };

        self.len -= 1;
        Ok(())
    }

    /// The node holding `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let tree: Tree<_> = [1, 2, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&3).map(|n| *n.key()), Some(3));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Whether `key` is stored in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Keys breadth first: the root, then its children left to right, then theirs.
    pub fn level_order(&self) -> Vec<&K> {
        self.level_order_with(|_| {})
    }

    /// [`level_order`][Tree::level_order], calling `visit` on each node as it's reached.
    pub fn level_order_with<F>(&self, mut visit: F) -> Vec<&K>
    where
        F: FnMut(&Node<K>),
    {
        let mut keys = Vec::with_capacity(self.len);
        let mut frontier: Vec<&Node<K>> = self.root().into_iter().collect();
        while !frontier.is_empty() {
            let mut next = Vec::with_capacity(frontier.len() * 2);
            for node in frontier {
                visit(node);
                keys.push(node.key());
                next.extend(node.children());
            }
            frontier = next;
        }
        keys
    }

    /// Keys in node, left, right order.
    pub fn preorder(&self) -> Vec<&K> {
        self.preorder_with(|_| {})
    }

    /// [`preorder`][Tree::preorder], calling `visit` on each node as it's reached.
    pub fn preorder_with<F>(&self, visit: F) -> Vec<&K>
    where
        F: FnMut(&Node<K>),
    {
        self.depth_first(DepthFirst::Pre, visit)
    }

    /// Keys in left, node, right order - which is ascending.
    pub fn inorder(&self) -> Vec<&K> {
        self.inorder_with(|_| {})
    }

    /// [`inorder`][Tree::inorder], calling `visit` on each node as it's reached.
    pub fn inorder_with<F>(&self, visit: F) -> Vec<&K>
    where
        F: FnMut(&Node<K>),
    {
        self.depth_first(DepthFirst::In, visit)
    }

    /// Keys in left, right, node order.
    pub fn postorder(&self) -> Vec<&K> {
        self.postorder_with(|_| {})
    }

    /// [`postorder`][Tree::postorder], calling `visit` on each node as it's reached.
    pub fn postorder_with<F>(&self, visit: F) -> Vec<&K>
    where
        F: FnMut(&Node<K>),
    {
        self.depth_first(DepthFirst::Post, visit)
    }

    fn depth_first<F>(&self, order: DepthFirst, mut visit: F) -> Vec<&K>
    where
        F: FnMut(&Node<K>),
    {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack: Vec<Step<'_, K>> = self.root().map(Step::Enter).into_iter().collect();

        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(node) => {
                    visit(node);
                    keys.push(node.key());
                }
                Step::Enter(node) => {
                    // Pushed in the reverse of the order they should come back off.
                    let left = node.left().map(Step::Enter);
                    let right = node.right().map(Step::Enter);
                    match order {
                        DepthFirst::Pre => {
                            stack.extend(right);
                            stack.extend(left);
                            stack.push(Step::Visit(node));
                        }
                        DepthFirst::In => {
                            stack.extend(right);
                            stack.push(Step::Visit(node));
                            stack.extend(left);
                        }
                        DepthFirst::Post => {
                            stack.push(Step::Visit(node));
                            stack.extend(right);
                            stack.extend(left);
                        }
                    }
                }
            }
        }
        keys
    }

    /// Height of the whole tree: 0 for a single node, -1 when empty.
    pub fn height(&self) -> isize {
        Self::subtree_height(self.root())
    }

    /// Height of a possibly absent subtree, with an absent one counting as -1 so that a leaf
    /// comes out as 0.
    pub fn subtree_height(node: Option<&Node<K>>) -> isize {
        node.map_or(-1, |n| isize::try_from(n.height()).unwrap_or(isize::MAX))
    }

    /// Number of edges between the root and `node`, found by searching for its key from the
    /// root. `None` if the key isn't in this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let tree: Tree<_> = (1..=7).collect();
    /// let leaf = tree.find(&7).unwrap();
    ///
    /// assert_eq!(tree.depth(leaf), Some(2));
    /// assert_eq!(tree.root().and_then(|root| tree.depth(root)), Some(0));
    /// ```
    pub fn depth(&self, node: &Node<K>) -> Option<usize>
    where
        K: Ord,
    {
        let mut current = self.root();
        let mut edges = 0;
        while let Some(candidate) = current {
            current = match node.key.cmp(&candidate.key) {
                Ordering::Less => candidate.left(),
                Ordering::Equal => return Some(edges),
                Ordering::Greater => candidate.right(),
            };
            edges += 1;
        }
        None
    }

    /// Whether the root's two subtrees differ in height by at most one. Only the root is
    /// checked; subtrees further down may be lopsided. An empty tree is balanced.
    pub fn is_balanced(&self) -> bool {
        self.root().map_or(true, |root| {
            let left = Self::subtree_height(root.left());
            let right = Self::subtree_height(root.right());
            left.abs_diff(right) <= 1
        })
    }

    /// Rebuilds the tree from its own keys so that it is balanced again. The keys themselves
    /// don't change.
    pub fn rebalance(&mut self)
    where
        K: Ord,
    {
        let keys = Self::into_sorted_keys(self.root.take());
        self.build(keys);
        debug!(len = self.len, "rebalanced tree");
    }

    /// Takes a subtree apart in order, handing back its keys.
    fn into_sorted_keys(root: Link<K>) -> Vec<K> {
        let mut keys = Vec::new();
        let mut pending: Vec<Box<Node<K>>> = Vec::new();
        let mut current = root;
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                pending.push(node);
            }
            match pending.pop() {
                Some(node) => {
                    let Node { key, right, .. } = *node;
                    current = right;
                    keys.push(key);
                }
                None => return keys,
            }
        }
    }
}

//! This crate exposes a plain Binary Search Tree (BST) that only balances itself when asked to.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)`, where `height` is the longest path from the root
//! `Node` down to a leaf `Node`. Inserting keys in sorted order without ever rebalancing makes
//! the height grow linearly, so this tree can rebuild itself from its sorted keys to get back
//! down to `O(lg N)` height. Sorted iteration comes for free by visiting the left subtree, then
//! the subtree root, then the right subtree.
//!
//! ## Modules
//!
//! - [`tree`] - the [`Tree`][tree::Tree] and all of its algorithms.
//! - [`node`] - the [`Node`][node::Node] cells a tree is made of.
//! - [`pretty`] - renders a tree as a sideways diagram.
//! - [`error`] - why a mutation was refused.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod node;
pub mod pretty;
pub mod tree;

pub use error::TreeError;
pub use node::Node;
pub use tree::Tree;

#[cfg(test)]
mod test;

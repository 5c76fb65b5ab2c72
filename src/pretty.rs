//! Renders a tree sideways, like a directory listing turned on its side: the right subtree
//! above its parent and the left one below.
//!
//! ```text
//! │       ┌── 7
//! │   ┌── 6
//! │   │   └── 5
//! └── 4
//!     │   ┌── 3
//!     └── 2
//!         └── 1
//! ```

use std::fmt::{self, Display, Write};

use crate::node::Node;
use crate::tree::Tree;

/// Renders the subtree rooted at `node`, one key per line.
///
/// # Examples
///
/// ```
/// use rebalance_bst::{pretty, tree::Tree};
///
/// let tree: Tree<_> = [1, 2, 3].into_iter().collect();
/// let rendered = pretty::render(tree.root().unwrap());
///
/// assert_eq!(rendered, "│   ┌── 3\n└── 2\n    └── 1\n");
/// ```
pub fn render<K>(node: &Node<K>) -> String
where
    K: Display,
{
    let mut out = String::new();
    // Writing to a `String` can't fail.
    let _ = write_subtree(&mut out, node, "", true);
    out
}

/// Writes `node` and everything under it. `is_left` is true for the root and for left children.
fn write_subtree<K, W>(out: &mut W, node: &Node<K>, prefix: &str, is_left: bool) -> fmt::Result
where
    K: Display,
    W: Write,
{
    if let Some(right) = node.right() {
        let bar = if is_left { "│   " } else { "    " };
        write_subtree(out, right, &format!("{prefix}{bar}"), false)?;
    }

    let branch = if is_left { "└── " } else { "┌── " };
    writeln!(out, "{prefix}{branch}{}", node.key())?;

    if let Some(left) = node.left() {
        let bar = if is_left { "    " } else { "│   " };
        write_subtree(out, left, &format!("{prefix}{bar}"), true)?;
    }
    Ok(())
}

impl<K> Display for Tree<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write_subtree(f, root, "", true),
            None => Ok(()),
        }
    }
}

//! Errors reported by the fallible [`Tree`][crate::tree::Tree] operations.

use thiserror::Error;

/// Why a mutation of a [`Tree`][crate::tree::Tree] was refused. A refused mutation leaves the
/// tree untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The key being inserted is already stored in the tree.
    #[error("key is already present in the tree")]
    DuplicateKey,

    /// The key being deleted is not stored in the tree.
    #[error("key was not found in the tree")]
    KeyNotFound,
}

//! Property tests against the public API.

mod tree;

//! Helpers shared by the crate's tests.

pub(crate) mod quick;

//! Error types returned by the list and map layers.

use thiserror::Error;

/// Failures raised by `ChainedHashMap` operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// `set`, `get` and `get_mut` reject keys that yield no code units.
    #[error("no key provided: keys must be non-empty")]
    InvalidKey,
}

/// Failures raised by `ChainedList` positional inserts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    #[error("index {index} out of range for insert into list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

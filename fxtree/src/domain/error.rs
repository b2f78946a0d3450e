//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural rule violations on the tree.
/// A tree operation that returns one of these has not mutated anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("index {index} out of range for {count} children")]
    OutOfRange { index: usize, count: usize },

    #[error("node is full (capacity {capacity})")]
    Full { capacity: usize },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

impl TreeError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidOperation(reason.into())
    }
}

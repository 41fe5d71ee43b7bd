//! Error types for tree queries

use std::fmt;

/// Errors that can occur when resolving a row/column position in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionLookupError {
    /// The position does not exist in the source buffer.
    NotFound { row: usize, column: usize },
}

impl fmt::Display for PositionLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionLookupError::NotFound { row, column } => {
                write!(f, "No node found at position {}:{}", row, column)
            }
        }
    }
}

impl std::error::Error for PositionLookupError {}

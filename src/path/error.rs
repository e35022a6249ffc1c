//! Error types for wall path data

use thiserror::Error;

/// Errors that can occur while reading a wall's `d` attribute
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path data is empty or whitespace only
    #[error("Empty path data")]
    Empty,

    /// Something other than whitespace precedes the first command letter
    #[error("Path data must start with a command, found {found:?} at offset {offset}")]
    LeadingData { offset: usize, found: String },
}

/// Result type alias for path operations
pub type PathResult<T> = Result<T, PathError>;

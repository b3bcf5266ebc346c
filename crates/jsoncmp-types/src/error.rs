//! Error types for the types crate.

use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("empty path segment at position {position} in `{path}`")]
    EmptySegment { path: String, position: usize },
}

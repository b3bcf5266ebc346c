//! Error types for the diff crate.
//!
//! Comparison itself never fails; these cover configuration and replaying
//! differences onto a value.

use jsoncmp_types::JsonPath;

/// Errors that can occur around diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A key-exclusion pattern could not be compiled.
    #[error("invalid exclusion pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration text could not be parsed.
    #[error("invalid comparison config: {0}")]
    Config(#[from] toml::de::Error),

    /// A difference addresses a location that does not exist.
    #[error("path not found: {0}")]
    PathNotFound(JsonPath),

    /// A difference descends into a value that is not an object or array.
    #[error("cannot descend into non-container value at {0}")]
    NotAContainer(JsonPath),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

//! Error types for the validate crate.
//!
//! Findings about a document are [`ValidationIssue`](crate::ValidationIssue)s,
//! not errors; these cover setting up the validator itself.

/// Errors from validator setup.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Configuration text could not be parsed.
    #[error("invalid validator config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias for validator results.
pub type ValidateResult<T> = Result<T, ValidateError>;

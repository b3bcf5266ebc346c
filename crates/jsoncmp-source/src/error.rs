//! Error types for the source crate.

use std::path::PathBuf;

/// Errors from loading a JSON source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file or directory does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A folder comparison root that is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Reading the file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not valid JSON.
    #[error("failed to parse {origin}: {message}")]
    Parse {
        origin: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// Directory traversal failed.
    #[error("directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result alias for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

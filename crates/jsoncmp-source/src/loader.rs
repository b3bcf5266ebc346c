//! Loading JSON values from files and inline text.

use std::io;
use std::path::{Path, PathBuf};

use jsoncmp_types::JsonValue;

use crate::error::{SourceError, SourceResult};

/// Anything that can produce a JSON value to compare.
///
/// Implementations must report unreadable or malformed input as an error;
/// they never substitute a placeholder value.
pub trait SourceLoader: Send + Sync {
    /// Human-readable origin used in logs and error messages.
    fn describe(&self) -> String;

    /// Load and parse the value.
    fn load(&self) -> SourceResult<JsonValue>;
}

/// Parse JSON text, attributing failures to `origin`.
pub fn parse_json(origin: &str, text: &str) -> SourceResult<JsonValue> {
    serde_json::from_str(text).map_err(|e| SourceError::Parse {
        origin: origin.to_string(),
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })
}

/// A JSON document on the local filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceLoader for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> SourceResult<JsonValue> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(self.path.clone())
            } else {
                SourceError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        parse_json(&self.describe(), &text)
    }
}

/// JSON text supplied directly, e.g. from a request body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineSource {
    label: String,
    text: String,
}

impl InlineSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl SourceLoader for InlineSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn load(&self) -> SourceResult<JsonValue> {
        parse_json(&self.label, &self.text)
    }
}

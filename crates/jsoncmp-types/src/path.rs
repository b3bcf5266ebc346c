//! Paths into a JSON tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One step into a JSON tree: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An array index.
    Index(usize),
    /// An object key.
    Key(String),
}

impl PathSegment {
    /// The key name, if this segment addresses an object member.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k),
            Self::Index(_) => None,
        }
    }

    /// The index, if this segment addresses an array element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Key(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of a node inside a JSON tree. The empty path is the root.
///
/// Serializes as an array of keys and indices, e.g. `["items", 0, "id"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no segments (same as [`is_root`](Self::is_root)).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// The last segment, or `None` at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// The parent path, or `None` at the root.
    pub fn parent(&self) -> Option<JsonPath> {
        self.0.split_last().map(|(_, rest)| Self(rest.to_vec()))
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> JsonPath {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment.into());
        Self(segments)
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Segments joined with `.`; the root renders as the empty string.
    pub fn dotted(&self) -> String {
        let mut out = String::new();
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&seg.to_string());
        }
        out
    }
}

/// Renders the dotted form, or `root` for the empty path.
///
/// The text is for people, not a lossless encoding: a top-level key named
/// `root` renders like the root itself, and a key containing `.` renders
/// like a nested path. Use the serde form to round-trip a path.
impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            f.write_str(&self.dotted())
        }
    }
}

impl FromIterator<PathSegment> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

/// Parses the dotted form. All-digit segments become indices; `""` and
/// `"root"` are the root path.
///
/// The inverse of `Display` only for paths it renders unambiguously: an
/// object key such as `"0"` parses back as an index, a key containing `.`
/// splits into several segments, and a lone `root` key is the root.
impl FromStr for JsonPath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "root" {
            return Ok(Self::root());
        }
        s.split('.')
            .enumerate()
            .map(|(position, part)| {
                if part.is_empty() {
                    return Err(TypeError::EmptySegment {
                        path: s.to_string(),
                        position,
                    });
                }
                Ok(match part.parse::<usize>() {
                    Ok(i) if part.bytes().all(|b| b.is_ascii_digit()) => PathSegment::Index(i),
                    _ => PathSegment::Key(part.to_string()),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

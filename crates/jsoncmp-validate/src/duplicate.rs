//! Duplicate-key detection.
//!
//! `serde_json` keeps the last value of a repeated key without complaint, so
//! duplicates are found by scanning the raw text. The scanner tracks object
//! and array nesting, treats strings (and their escapes) as opaque, and
//! tolerates malformed input: it reports what it can and leaves syntax
//! errors to the parser.

use std::collections::HashMap;

use jsoncmp_types::{JsonPath, PathSegment};
use serde::Serialize;

/// A key that occurs more than once in the same object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    pub key: String,
    /// 1-based line of every occurrence, in order.
    pub lines: Vec<usize>,
    /// Path of the object holding the key.
    pub object_path: JsonPath,
}

impl DuplicateKey {
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn first_line(&self) -> usize {
        self.lines.first().copied().unwrap_or(0)
    }

    pub fn last_line(&self) -> usize {
        self.lines.last().copied().unwrap_or(0)
    }

    /// Where the object sits: `root level`, `inside "<path>"`, or
    /// `array element [i]` (followed by the array's location).
    pub fn parent_context(&self) -> String {
        let Some(parent) = self.object_path.parent() else {
            return "root level".to_string();
        };
        match self.object_path.last().and_then(PathSegment::as_index) {
            Some(index) if parent.is_root() => format!("array element [{index}]"),
            Some(index) => format!("array element [{index}] inside \"{parent}\""),
            None => format!("inside \"{}\"", self.object_path),
        }
    }
}

enum Frame {
    Object {
        path: JsonPath,
        expecting_key: bool,
        last_key: Option<String>,
        seen: HashMap<String, Vec<usize>>,
        order: Vec<String>,
    },
    Array {
        path: JsonPath,
        index: usize,
    },
}

impl Frame {
    fn object(path: JsonPath) -> Self {
        Self::Object {
            path,
            expecting_key: true,
            last_key: None,
            seen: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Path of a container opened as the next value inside this frame.
    fn child_path(&self) -> JsonPath {
        match self {
            Self::Object { path, last_key, .. } => match last_key {
                Some(key) => path.child(key.as_str()),
                None => path.clone(),
            },
            Self::Array { path, index } => path.child(*index),
        }
    }
}

/// Find every key repeated within the same object, ordered by the line of
/// the second occurrence.
pub fn find_duplicate_keys(text: &str) -> Vec<DuplicateKey> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut found = Vec::new();
    let mut line = 1usize;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            '"' => {
                let start_line = line;
                let mut raw = String::new();
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            raw.push(c);
                            if let Some(escaped) = chars.next() {
                                raw.push(escaped);
                            }
                        }
                        '"' => break,
                        '\n' => {
                            line += 1;
                            raw.push(c);
                        }
                        _ => raw.push(c),
                    }
                }
                if let Some(Frame::Object {
                    expecting_key,
                    last_key,
                    seen,
                    order,
                    ..
                }) = stack.last_mut()
                {
                    if *expecting_key {
                        let key = unescape(&raw);
                        let lines = seen.entry(key.clone()).or_default();
                        if lines.is_empty() {
                            order.push(key.clone());
                        }
                        lines.push(start_line);
                        *expecting_key = false;
                        *last_key = Some(key);
                    }
                }
            }
            '{' => {
                let path = stack.last().map(Frame::child_path).unwrap_or_default();
                stack.push(Frame::object(path));
            }
            '[' => {
                let path = stack.last().map(Frame::child_path).unwrap_or_default();
                stack.push(Frame::Array { path, index: 0 });
            }
            '}' | ']' => {
                if let Some(frame) = stack.pop() {
                    collect_duplicates(frame, &mut found);
                }
            }
            ',' => match stack.last_mut() {
                Some(Frame::Object { expecting_key, .. }) => *expecting_key = true,
                Some(Frame::Array { index, .. }) => *index += 1,
                None => {}
            },
            _ => {}
        }
    }

    // Unterminated objects still get their duplicates reported.
    while let Some(frame) = stack.pop() {
        collect_duplicates(frame, &mut found);
    }

    found.sort_by_key(|d| d.lines.get(1).copied().unwrap_or(0));
    found
}

fn collect_duplicates(frame: Frame, found: &mut Vec<DuplicateKey>) {
    let Frame::Object {
        path,
        mut seen,
        order,
        ..
    } = frame
    else {
        return;
    };
    for key in order {
        if let Some(lines) = seen.remove(&key) {
            if lines.len() > 1 {
                found.push(DuplicateKey {
                    key,
                    lines,
                    object_path: path.clone(),
                });
            }
        }
    }
}

fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}

//! Key exclusion: strip named keys from both inputs before comparing.
//!
//! Three forms of entry are accepted:
//!
//! - a plain name (`timestamp`) removes that key wherever it occurs;
//! - a dotted name (`data.id`) removes a key whose dotted path equals the
//!   name or ends with `.` followed by it;
//! - a pattern containing `*` (`metadata.*`) must match the whole dotted
//!   path, with `*` standing for any run of characters.

use std::collections::BTreeSet;

use jsoncmp_types::{JsonPath, JsonValue};
use regex::Regex;
use serde_json::Map;

use crate::error::{DiffError, DiffResult};

/// A validated set of keys to exclude from comparison.
#[derive(Clone, Debug, Default)]
pub struct KeyFilter {
    entries: BTreeSet<String>,
    names: BTreeSet<String>,
    dotted: Vec<String>,
    patterns: Vec<Regex>,
}

impl KeyFilter {
    /// Build a filter. Entries are trimmed; empty entries are dropped and
    /// duplicates collapse.
    pub fn new<I, S>(entries: I) -> DiffResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for raw in entries {
            let entry = raw.as_ref().trim();
            if entry.is_empty() || !filter.entries.insert(entry.to_string()) {
                continue;
            }
            if entry.contains('*') {
                filter.patterns.push(compile_wildcard(entry)?);
            } else if entry.contains('.') {
                filter.dotted.push(entry.to_string());
            } else {
                filter.names.insert(entry.to_string());
            }
        }
        Ok(filter)
    }

    /// Parse a comma-separated list such as `"timestamp, version,,id"`.
    pub fn parse_list(list: &str) -> DiffResult<Self> {
        Self::new(list.split(','))
    }

    /// Returns `true` if nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The normalized entries, sorted.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Returns `true` if the key at `path` (the key being its last segment)
    /// is excluded.
    pub fn is_excluded(&self, key: &str, path: &JsonPath) -> bool {
        if self.names.contains(key) {
            return true;
        }
        if self.dotted.is_empty() && self.patterns.is_empty() {
            return false;
        }
        let dotted = path.dotted();
        self.dotted.iter().any(|entry| {
            dotted == *entry
                || (dotted.len() > entry.len()
                    && dotted.ends_with(entry.as_str())
                    && dotted.as_bytes()[dotted.len() - entry.len() - 1] == b'.')
        }) || self.patterns.iter().any(|re| re.is_match(&dotted))
    }

    /// A copy of `value` with every excluded key removed, at any depth.
    pub fn strip(&self, value: &JsonValue) -> JsonValue {
        let mut path = JsonPath::root();
        self.strip_at(value, &mut path)
    }

    fn strip_at(&self, value: &JsonValue, path: &mut JsonPath) -> JsonValue {
        match value {
            JsonValue::Object(map) => {
                let mut out = Map::new();
                for (key, child) in map {
                    path.push(key.as_str());
                    if !self.is_excluded(key, path) {
                        out.insert(key.clone(), self.strip_at(child, path));
                    }
                    path.pop();
                }
                JsonValue::Object(out)
            }
            JsonValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, child) in items.iter().enumerate() {
                    path.push(index);
                    out.push(self.strip_at(child, path));
                    path.pop();
                }
                JsonValue::Array(out)
            }
            other => other.clone(),
        }
    }
}

fn compile_wildcard(pattern: &str) -> DiffResult<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).map_err(|source| DiffError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entries_are_normalized() {
        let filter = KeyFilter::parse_list(" timestamp, version,, id ,timestamp,   ").unwrap();
        assert_eq!(filter.len(), 3);
        assert_eq!(
            filter.entries().collect::<Vec<_>>(),
            vec!["id", "timestamp", "version"]
        );
    }

    #[test]
    fn empty_inputs_produce_empty_filter() {
        assert!(KeyFilter::parse_list("").unwrap().is_empty());
        assert!(KeyFilter::parse_list("   ").unwrap().is_empty());
        assert!(KeyFilter::new(Vec::<String>::new()).unwrap().is_empty());
    }

    #[test]
    fn plain_name_removed_at_every_depth() {
        let filter = KeyFilter::new(["ts"]).unwrap();
        let value = json!({
            "ts": 1,
            "a": {"ts": 2, "b": 3},
            "list": [{"ts": 4, "c": 5}]
        });
        assert_eq!(
            filter.strip(&value),
            json!({"a": {"b": 3}, "list": [{"c": 5}]})
        );
    }

    #[test]
    fn dotted_name_matches_path_suffix() {
        let filter = KeyFilter::new(["data.id"]).unwrap();
        let value = json!({
            "id": 1,
            "data": {"id": 2, "name": "x"},
            "outer": {"data": {"id": 3}},
            "metadata": {"id": 4}
        });
        assert_eq!(
            filter.strip(&value),
            json!({
                "id": 1,
                "data": {"name": "x"},
                "outer": {"data": {}},
                "metadata": {"id": 4}
            })
        );
    }

    #[test]
    fn wildcard_matches_whole_dotted_path() {
        let filter = KeyFilter::new(["metadata.*"]).unwrap();
        let path: JsonPath = "metadata.created".parse().unwrap();
        assert!(filter.is_excluded("created", &path));
        let path: JsonPath = "x.metadata.created".parse().unwrap();
        assert!(!filter.is_excluded("created", &path));
        let path: JsonPath = "metadata".parse().unwrap();
        assert!(!filter.is_excluded("metadata", &path));

        let value = json!({"metadata": {"created": 1, "by": "me"}, "keep": true});
        assert_eq!(filter.strip(&value), json!({"metadata": {}, "keep": true}));
    }

    #[test]
    fn wildcard_escapes_regex_metacharacters() {
        let filter = KeyFilter::new(["a+b.*"]).unwrap();
        let hit: JsonPath = "a+b.c".parse().unwrap();
        let miss: JsonPath = "aab.c".parse().unwrap();
        assert!(filter.is_excluded("c", &hit));
        assert!(!filter.is_excluded("c", &miss));
    }

    #[test]
    fn wildcard_sees_array_indices() {
        let filter = KeyFilter::new(["items.*.secret"]).unwrap();
        let value = json!({"items": [{"secret": 1, "v": 1}, {"secret": 2, "v": 2}]});
        assert_eq!(
            filter.strip(&value),
            json!({"items": [{"v": 1}, {"v": 2}]})
        );
    }

    #[test]
    fn primitives_pass_through() {
        let filter = KeyFilter::new(["a"]).unwrap();
        assert_eq!(filter.strip(&json!(5)), json!(5));
        assert_eq!(filter.strip(&json!(null)), json!(null));
    }
}

//! Validation findings and per-file reports.

use serde::Serialize;

use crate::duplicate::DuplicateKey;
use crate::html::HtmlIssue;
use crate::syntax::SyntaxIssue;

/// One finding of the validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationIssue {
    DuplicateKey(DuplicateKey),
    Syntax(SyntaxIssue),
    MalformedHtml(HtmlIssue),
    /// The file could not be read at all.
    Unreadable { message: String, suggestion: String },
}

impl ValidationIssue {
    /// Short name of the issue type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateKey(_) => "DuplicateKeyError",
            Self::Syntax(_) => "SyntaxError",
            Self::MalformedHtml(_) => "InvalidHtml",
            Self::Unreadable { .. } => "FileReadError",
        }
    }

    /// One-line description.
    pub fn summary(&self) -> String {
        match self {
            Self::DuplicateKey(d) => format!(
                "Duplicate key \"{}\" found at the same level ({} occurrences, lines {}; {})",
                d.key,
                d.count(),
                d.lines
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                d.parent_context(),
            ),
            Self::Syntax(s) => format!("{} (line {}, column {})", s.message, s.line, s.column),
            Self::MalformedHtml(h) => format!("{} in string at {}", h.problem, h.path),
            Self::Unreadable { message, .. } => message.clone(),
        }
    }

    /// How to fix it.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::DuplicateKey(_) => {
                "Remove all duplicate keys except the first one. Each key in a JSON object must be unique at the same level."
            }
            Self::Syntax(s) => &s.suggestion,
            Self::MalformedHtml(_) => "Close every opened tag, in the reverse order of opening.",
            Self::Unreadable { suggestion, .. } => suggestion,
        }
    }
}

/// Findings for one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// File name or label of the document.
    pub file: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            issues: Vec::new(),
        }
    }

    /// Returns `true` if no issues were found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn duplicate_keys(&self) -> impl Iterator<Item = &DuplicateKey> {
        self.issues.iter().filter_map(|i| match i {
            ValidationIssue::DuplicateKey(d) => Some(d),
            _ => None,
        })
    }

    pub fn syntax_error(&self) -> Option<&SyntaxIssue> {
        self.issues.iter().find_map(|i| match i {
            ValidationIssue::Syntax(s) => Some(s),
            _ => None,
        })
    }

    pub fn html_issues(&self) -> impl Iterator<Item = &HtmlIssue> {
        self.issues.iter().filter_map(|i| match i {
            ValidationIssue::MalformedHtml(h) => Some(h),
            _ => None,
        })
    }
}

/// Findings for a set of files, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub reports: Vec<ValidationReport>,
}

impl BatchReport {
    /// Returns `true` if any file has issues or could not be read.
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(|r| !r.is_valid())
    }

    pub fn valid_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.reports.len() - self.valid_count()
    }

    pub fn invalid(&self) -> impl Iterator<Item = &ValidationReport> {
        self.reports.iter().filter(|r| !r.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsoncmp_types::JsonPath;
    use serde_json::json;

    fn duplicate() -> ValidationIssue {
        ValidationIssue::DuplicateKey(DuplicateKey {
            key: "name".into(),
            lines: vec![2, 4],
            object_path: JsonPath::root(),
        })
    }

    #[test]
    fn duplicate_summary_lists_lines() {
        let issue = duplicate();
        assert_eq!(issue.kind(), "DuplicateKeyError");
        assert_eq!(
            issue.summary(),
            "Duplicate key \"name\" found at the same level (2 occurrences, lines 2, 4; root level)"
        );
        assert!(issue.suggestion().contains("Remove all duplicate keys"));
    }

    #[test]
    fn batch_counts() {
        let mut bad = ValidationReport::new("bad.json");
        bad.issues.push(duplicate());
        let batch = BatchReport {
            reports: vec![ValidationReport::new("ok.json"), bad],
        };
        assert!(batch.has_errors());
        assert_eq!(batch.valid_count(), 1);
        assert_eq!(batch.invalid_count(), 1);
        assert_eq!(batch.invalid().next().unwrap().file, "bad.json");
    }

    #[test]
    fn serialized_with_type_tag() {
        let value = serde_json::to_value(duplicate()).unwrap();
        assert_eq!(
            value,
            json!({"type": "duplicate_key", "key": "name", "lines": [2, 4], "object_path": []})
        );
    }
}

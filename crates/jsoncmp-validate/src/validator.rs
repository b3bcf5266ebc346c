//! Validation entry points for text, single files and batches.

use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::config::ValidatorConfig;
use crate::duplicate::find_duplicate_keys;
use crate::html::check_html;
use crate::report::{BatchReport, ValidationIssue, ValidationReport};
use crate::syntax::check_syntax;

/// Validate JSON text. `name` labels the report.
///
/// Duplicate keys are scanned first since the parser accepts them. HTML is
/// only checked once the text parses.
pub fn validate_str(name: &str, text: &str, config: &ValidatorConfig) -> ValidationReport {
    let mut report = ValidationReport::new(name);

    if config.check_duplicate_keys {
        report
            .issues
            .extend(find_duplicate_keys(text).into_iter().map(ValidationIssue::DuplicateKey));
    }

    match check_syntax(text) {
        Ok(value) => {
            if config.check_html {
                report
                    .issues
                    .extend(check_html(&value).into_iter().map(ValidationIssue::MalformedHtml));
            }
        }
        Err(issue) => report.issues.push(ValidationIssue::Syntax(issue)),
    }

    if report.is_valid() {
        info!(file = name, "valid JSON");
    } else {
        warn!(file = name, issues = report.issues.len(), "JSON validation failed");
    }
    report
}

/// Read and validate one file.
pub fn validate_file(path: &Path, config: &ValidatorConfig) -> ValidationReport {
    let name = path.display().to_string();
    if path.is_dir() {
        return unreadable(
            &name,
            "path is a directory".to_string(),
            "The path is a directory, not a file.",
        );
    }
    match std::fs::read_to_string(path) {
        Ok(text) => validate_str(&name, &text, config),
        Err(e) => {
            let suggestion = match e.kind() {
                io::ErrorKind::NotFound => {
                    "The file does not exist. Check if the file path is correct."
                }
                io::ErrorKind::PermissionDenied => "Permission denied. Check file permissions.",
                io::ErrorKind::InvalidData => "The file is not valid UTF-8 text.",
                _ => "Check if the file exists and is readable.",
            };
            unreadable(&name, e.to_string(), suggestion)
        }
    }
}

/// Validate each file in order.
pub fn validate_files<P: AsRef<Path>>(paths: &[P], config: &ValidatorConfig) -> BatchReport {
    let reports: Vec<_> = paths
        .iter()
        .map(|p| validate_file(p.as_ref(), config))
        .collect();
    let batch = BatchReport { reports };
    info!(
        files = batch.reports.len(),
        invalid = batch.invalid_count(),
        "validation finished"
    );
    batch
}

fn unreadable(name: &str, message: String, suggestion: &str) -> ValidationReport {
    warn!(file = name, "cannot read file: {message}");
    let mut report = ValidationReport::new(name);
    report.issues.push(ValidationIssue::Unreadable {
        message,
        suggestion: suggestion.to_string(),
    });
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxCategory;

    #[test]
    fn valid_document() {
        let text = r#"{"name": "valid", "html": "<div><span>Properly closed</span></div>", "data": [1, 2, 3]}"#;
        let report = validate_str("valid.json", text, &ValidatorConfig::default());
        assert!(report.is_valid());
    }

    #[test]
    fn duplicate_keys_fail_validation() {
        let text = "{\n  \"name\": \"test\",\n  \"version\": \"1.0.0\",\n  \"name\": \"duplicate\"\n}";
        let report = validate_str("dup.json", text, &ValidatorConfig::default());
        assert!(!report.is_valid());
        let dups: Vec<_> = report.duplicate_keys().collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].lines, vec![2, 4]);
        assert!(report.syntax_error().is_none());
    }

    #[test]
    fn invalid_html_fails_validation() {
        let text = r#"{"content": "<div><p>Unclosed paragraph", "valid": "<div><p>Valid HTML</p></div>"}"#;
        let report = validate_str("html.json", text, &ValidatorConfig::default());
        assert_eq!(report.html_issues().count(), 2);
    }

    #[test]
    fn syntax_error_fails_validation() {
        let report = validate_str("syntax.json", r#"{"broken": "json",}"#, &ValidatorConfig::default());
        let issue = report.syntax_error().unwrap();
        assert_eq!(issue.category, SyntaxCategory::Syntax);
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn disabled_checks_are_skipped() {
        let text = r#"{"a": "<b>", "a": 1}"#;
        let report = validate_str("x.json", text, &ValidatorConfig::syntax_only());
        assert!(report.is_valid());
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_file(&dir.path().join("absent.json"), &ValidatorConfig::default());
        match &report.issues[..] {
            [issue @ ValidationIssue::Unreadable { .. }] => {
                assert!(issue.suggestion().contains("does not exist"));
            }
            other => panic!("expected one Unreadable issue, got {other:?}"),
        }
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_file(dir.path(), &ValidatorConfig::default());
        assert_eq!(report.issues[0].kind(), "FileReadError");
    }

    #[test]
    fn batch_over_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"{"a": 1}"#).unwrap();
        std::fs::write(&bad, r#"{"a": 1,}"#).unwrap();

        let batch = validate_files(&[good, bad], &ValidatorConfig::default());
        assert!(batch.has_errors());
        assert_eq!(batch.valid_count(), 1);
        assert!(batch.invalid().next().unwrap().file.ends_with("bad.json"));
    }
}

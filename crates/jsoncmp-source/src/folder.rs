//! Folder-to-folder comparison.
//!
//! Every `*.json` file under the local root is compared with the file at the
//! same relative path under the remote root. Files with no remote
//! counterpart are ignored rather than failed.

use std::path::{Path, PathBuf};

use jsoncmp_diff::DiffEngine;
use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{SourceError, SourceResult};
use crate::loader::FileSource;
use crate::outcome::{compare_sources, ComparisonOutcome};

/// Recursively list `*.json` files under `root`, as sorted relative paths.
/// `root` must be an existing directory.
pub fn discover_json_files(root: &Path) -> SourceResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(SourceError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(SourceError::NotADirectory(root.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            let relative = path.strip_prefix(root).unwrap_or(path);
            files.push(relative.to_path_buf());
        }
    }
    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered json files");
    Ok(files)
}

/// Outcome for one file of a folder comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileComparison {
    /// Path relative to both roots.
    pub file: PathBuf,
    #[serde(flatten)]
    pub outcome: ComparisonOutcome,
}

/// Counts of each outcome status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    pub identical: usize,
    pub different: usize,
    pub errors: usize,
    pub ignored: usize,
}

impl FolderSummary {
    pub fn total(&self) -> usize {
        self.identical + self.different + self.errors + self.ignored
    }
}

/// Per-file results of a folder comparison, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FolderReport {
    pub results: Vec<FileComparison>,
}

impl FolderReport {
    pub fn summary(&self) -> FolderSummary {
        let mut summary = FolderSummary::default();
        for result in &self.results {
            match result.outcome {
                ComparisonOutcome::Identical => summary.identical += 1,
                ComparisonOutcome::Different { .. } => summary.different += 1,
                ComparisonOutcome::Error { .. } => summary.errors += 1,
                ComparisonOutcome::Ignored { .. } => summary.ignored += 1,
            }
        }
        summary
    }

    /// Returns `true` if any file differs or failed to load. Ignored files
    /// do not count.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.outcome.is_failure())
    }

    /// Results with the given status tag.
    pub fn with_status<'a>(&'a self, status: &'a str) -> impl Iterator<Item = &'a FileComparison> {
        self.results.iter().filter(move |r| r.outcome.status() == status)
    }
}

/// Compare every JSON file under `local_root` with its counterpart under
/// `remote_root`.
pub fn compare_folders(
    local_root: &Path,
    remote_root: &Path,
    engine: &DiffEngine,
) -> SourceResult<FolderReport> {
    let files = discover_json_files(local_root)?;
    info!(
        local = %local_root.display(),
        remote = %remote_root.display(),
        files = files.len(),
        "comparing folders"
    );

    let mut report = FolderReport::default();
    for file in files {
        let remote = remote_root.join(&file);
        let outcome = if remote.is_file() {
            compare_sources(&FileSource::new(local_root.join(&file)), &FileSource::new(remote), engine)
        } else {
            info!(file = %file.display(), "remote file not found, ignoring");
            ComparisonOutcome::ignored("remote file not found - ignoring")
        };
        report.results.push(FileComparison { file, outcome });
    }

    let summary = report.summary();
    info!(
        identical = summary.identical,
        different = summary.different,
        errors = summary.errors,
        ignored = summary.ignored,
        "folder comparison finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn discovers_nested_json_files_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", "{}");
        write(dir.path(), "nested/a.json", "{}");
        write(dir.path(), "notes.txt", "hi");
        let files = discover_json_files(dir.path()).unwrap();
        assert_eq!(files, vec![PathBuf::from("b.json"), PathBuf::from("nested/a.json")]);
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_json_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn file_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "single.json", "{}");
        let file = dir.path().join("single.json");

        let err = discover_json_files(&file).unwrap_err();
        assert!(matches!(err, SourceError::NotADirectory(_)));
        let err = compare_folders(&file, dir.path(), &DiffEngine::default()).unwrap_err();
        assert!(matches!(err, SourceError::NotADirectory(_)));
    }

    #[test]
    fn folder_comparison_classifies_each_file() {
        let local = tempfile::tempdir().unwrap();
        let remote = tempfile::tempdir().unwrap();
        write(local.path(), "same.json", r#"{"a": 1, "b": 2}"#);
        write(remote.path(), "same.json", r#"{"b": 2, "a": 1}"#);
        write(local.path(), "diff.json", r#"{"a": 1}"#);
        write(remote.path(), "diff.json", r#"{"a": 2}"#);
        write(local.path(), "broken.json", r#"{"a": 1}"#);
        write(remote.path(), "broken.json", r#"{"a": "#);
        write(local.path(), "only-local.json", "{}");

        let report = compare_folders(local.path(), remote.path(), &DiffEngine::default()).unwrap();
        let summary = report.summary();
        assert_eq!(
            summary,
            FolderSummary {
                identical: 1,
                different: 1,
                errors: 1,
                ignored: 1
            }
        );
        assert_eq!(summary.total(), 4);
        assert!(report.has_failures());

        let ignored: Vec<_> = report.with_status("ignored").map(|r| r.file.clone()).collect();
        assert_eq!(ignored, vec![PathBuf::from("only-local.json")]);
    }

    #[test]
    fn only_ignored_files_is_not_a_failure() {
        let local = tempfile::tempdir().unwrap();
        let remote = tempfile::tempdir().unwrap();
        write(local.path(), "config1.json", "{}");
        let report = compare_folders(local.path(), remote.path(), &DiffEngine::default()).unwrap();
        assert!(!report.has_failures());
        assert_eq!(report.summary().ignored, 1);
    }
}

//! Source loading for jsoncmp.
//!
//! Turns files and inline text into JSON values and runs comparisons over
//! them. Load and parse failures are reported as an `error` outcome, never
//! as differences.
//!
//! # Key Types
//!
//! - [`SourceLoader`] -- Trait for anything that yields a JSON value
//! - [`FileSource`] / [`InlineSource`] -- The provided loaders
//! - [`ComparisonOutcome`] -- identical / different / error / ignored
//! - [`FolderReport`] -- Per-file outcomes of a folder-to-folder comparison

pub mod error;
pub mod folder;
pub mod loader;
pub mod outcome;

pub use error::{SourceError, SourceResult};
pub use folder::{compare_folders, discover_json_files, FileComparison, FolderReport, FolderSummary};
pub use loader::{parse_json, FileSource, InlineSource, SourceLoader};
pub use outcome::{compare_sources, try_compare_sources, ComparisonOutcome};

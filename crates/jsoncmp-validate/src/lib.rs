//! JSON validator for jsoncmp.
//!
//! Checks JSON documents for problems a plain parser either rejects with a
//! terse message or silently accepts:
//!
//! - syntax errors, located by line and column with a fix suggestion;
//! - keys repeated within the same object (the parser keeps the last one);
//! - HTML fragments inside string values with unbalanced tags.
//!
//! # Key Types
//!
//! - [`ValidationReport`] / [`ValidationIssue`] -- Findings for one document
//! - [`BatchReport`] -- Findings for a set of files
//! - [`ValidatorConfig`] -- Which checks to run

pub mod config;
pub mod duplicate;
pub mod error;
pub mod html;
pub mod report;
pub mod syntax;
pub mod validator;

pub use config::ValidatorConfig;
pub use duplicate::{find_duplicate_keys, DuplicateKey};
pub use error::{ValidateError, ValidateResult};
pub use html::{check_fragment, check_html, HtmlIssue, HtmlProblem};
pub use report::{BatchReport, ValidationIssue, ValidationReport};
pub use syntax::{check_syntax, SyntaxCategory, SyntaxIssue};
pub use validator::{validate_file, validate_files, validate_str};

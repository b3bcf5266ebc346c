//! Foundation types for jsoncmp.
//!
//! This crate provides the data model shared by the diff engine, the source
//! loaders, and the validator. Every other jsoncmp crate depends on
//! `jsoncmp-types`.
//!
//! # Key Types
//!
//! - [`JsonValue`] -- A JSON-compatible value (closed tagged enum)
//! - [`PathSegment`] / [`JsonPath`] -- Location of a node inside a JSON tree
//! - [`Difference`] / [`DifferenceKind`] -- One atomic divergence between two trees
//! - [`ComparisonResult`] -- The full output of one comparison
//! - [`DiffStats`] -- Per-kind counts used by report renderers

pub mod difference;
pub mod error;
pub mod path;
pub mod result;

pub use difference::{Difference, DifferenceKind};
pub use error::TypeError;
pub use path::{JsonPath, PathSegment};
pub use result::{ComparisonResult, DiffStats};

/// A JSON-compatible value: null, boolean, number, string, array, or object.
pub type JsonValue = serde_json::Value;

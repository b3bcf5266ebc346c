//! Structural diff engine for jsoncmp.
//!
//! Walks two JSON values in lock-step and reports every divergence as a
//! [`Difference`](jsoncmp_types::Difference) at the deepest path that
//! explains it. Object key order never affects the result.
//!
//! # Key Types
//!
//! - [`DiffEngine`] / [`compare`] -- The comparison entry points
//! - [`CompareOptions`] / [`KeyFilter`] -- Key exclusion, validated once
//! - [`CompareConfig`] -- Serde-loadable configuration (TOML)
//! - [`apply_differences`] -- Replay a difference list onto a value

pub mod apply;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;

pub use apply::apply_differences;
pub use config::{CompareConfig, IgnoreKeys};
pub use engine::{compare, compare_with_options, json_numbers_equal, CompareOptions, DiffEngine};
pub use error::{DiffError, DiffResult};
pub use filter::KeyFilter;

#[cfg(test)]
mod properties;

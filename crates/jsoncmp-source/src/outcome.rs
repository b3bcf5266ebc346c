//! Status of one source comparison.

use std::fmt;

use jsoncmp_diff::DiffEngine;
use jsoncmp_types::{ComparisonResult, DiffStats, Difference};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SourceResult;
use crate::loader::SourceLoader;

/// The outcome of comparing two sources.
///
/// `Error` is distinct from `Different`: it means at least one side could
/// not be loaded, so no comparison took place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Identical,
    Different {
        differences: Vec<Difference>,
        stats: DiffStats,
    },
    Error {
        message: String,
    },
    /// Skipped, e.g. because the counterpart does not exist.
    Ignored {
        message: String,
    },
}

impl ComparisonOutcome {
    pub fn from_result(result: ComparisonResult) -> Self {
        if result.is_identical() {
            return Self::Identical;
        }
        let stats = result.stats();
        Self::Different {
            differences: result.into_differences(),
            stats,
        }
    }

    pub fn error(message: impl fmt::Display) -> Self {
        Self::Error {
            message: message.to_string(),
        }
    }

    pub fn ignored(message: impl Into<String>) -> Self {
        Self::Ignored {
            message: message.into(),
        }
    }

    /// The `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Identical => "identical",
            Self::Different { .. } => "different",
            Self::Error { .. } => "error",
            Self::Ignored { .. } => "ignored",
        }
    }

    /// Returns `true` for `Different` and `Error`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Different { .. } | Self::Error { .. })
    }
}

/// Load both sources and compare them, propagating load failures.
pub fn try_compare_sources(
    left: &dyn SourceLoader,
    right: &dyn SourceLoader,
    engine: &DiffEngine,
) -> SourceResult<ComparisonResult> {
    let left_value = left.load()?;
    let right_value = right.load()?;
    debug!(left = %left.describe(), right = %right.describe(), "comparing sources");
    Ok(engine.compare(&left_value, &right_value))
}

/// Load both sources and compare them. A load failure becomes
/// [`ComparisonOutcome::Error`] and the comparison is skipped.
pub fn compare_sources(
    left: &dyn SourceLoader,
    right: &dyn SourceLoader,
    engine: &DiffEngine,
) -> ComparisonOutcome {
    match try_compare_sources(left, right, engine) {
        Ok(result) => ComparisonOutcome::from_result(result),
        Err(e) => {
            warn!("comparison skipped: {e}");
            ComparisonOutcome::error(e)
        }
    }
}

//! The output of one comparison.

use serde::{Deserialize, Serialize};

use crate::difference::{Difference, DifferenceKind};

/// The result of comparing two JSON values.
///
/// `identical` is `true` iff `differences` is empty; the only constructor
/// derives the flag from the list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    identical: bool,
    differences: Vec<Difference>,
}

impl ComparisonResult {
    /// Build a result from the differences discovered, in discovery order.
    pub fn from_differences(differences: Vec<Difference>) -> Self {
        Self {
            identical: differences.is_empty(),
            differences,
        }
    }

    /// A result with no differences.
    pub fn identical() -> Self {
        Self::from_differences(Vec::new())
    }

    /// Returns `true` if the two values were deep-equal.
    pub fn is_identical(&self) -> bool {
        self.identical
    }

    /// The differences in discovery (pre-order) order.
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    /// Consume the result, yielding the difference list.
    pub fn into_differences(self) -> Vec<Difference> {
        self.differences
    }

    /// Number of differences.
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// Returns `true` if there are no differences.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Differences of the given kind.
    pub fn of_kind(&self, kind: DifferenceKind) -> impl Iterator<Item = &Difference> {
        self.differences.iter().filter(move |d| d.kind() == kind)
    }

    /// Per-kind counts.
    pub fn stats(&self) -> DiffStats {
        DiffStats::from_differences(&self.differences)
    }
}

impl<'de> Deserialize<'de> for ComparisonResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            differences: Vec<Difference>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::from_differences(raw.differences))
    }
}

/// Per-kind difference counts, as shown in report summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    /// `Changed` plus `ArrayLengthChanged`.
    pub modified: usize,
    pub total: usize,
}

impl DiffStats {
    pub fn from_differences(differences: &[Difference]) -> Self {
        let mut stats = Self::default();
        for diff in differences {
            match diff.kind() {
                DifferenceKind::Added => stats.added += 1,
                DifferenceKind::Removed => stats.removed += 1,
                DifferenceKind::Changed | DifferenceKind::ArrayLengthChanged => {
                    stats.modified += 1
                }
            }
        }
        stats.total = differences.len();
        stats
    }
}

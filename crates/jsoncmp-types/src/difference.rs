//! A single divergence between two JSON trees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::JsonPath;
use crate::JsonValue;

/// Classification of a [`Difference`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// The key exists only in the right-hand tree.
    Added,
    /// The key exists only in the left-hand tree.
    Removed,
    /// The node exists in both trees with a different value or type.
    Changed,
    /// Both nodes are arrays of different lengths; the whole array is replaced.
    ArrayLengthChanged,
}

impl DifferenceKind {
    /// Display label used by report renderers.
    ///
    /// `ArrayLengthChanged` is presented as a modification.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed | Self::ArrayLengthChanged => "modified",
        }
    }

    /// Emoji marker used by chat-style summaries.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Added => "➕",
            Self::Removed => "➖",
            Self::Changed | Self::ArrayLengthChanged => "🔄",
        }
    }

    /// Returns `true` for `Changed` and its array-length specialization.
    pub fn is_modification(&self) -> bool {
        matches!(self, Self::Changed | Self::ArrayLengthChanged)
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One atomic divergence between a left (previous) and right (new) tree.
///
/// `previous_value` is absent exactly when the kind is `Added`, and
/// `new_value` is absent exactly when the kind is `Removed`. The constructors
/// are the only way to build one; deserialization goes through them too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Difference {
    kind: DifferenceKind,
    path: JsonPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_value: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_value: Option<JsonValue>,
}

impl<'de> Deserialize<'de> for Difference {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(Deserialize)]
        struct Raw {
            kind: DifferenceKind,
            path: JsonPath,
            #[serde(default, deserialize_with = "present")]
            previous_value: Option<JsonValue>,
            #[serde(default, deserialize_with = "present")]
            new_value: Option<JsonValue>,
        }

        // A present `null` is a value, not an absence.
        fn present<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<JsonValue>, D::Error> {
            JsonValue::deserialize(d).map(Some)
        }

        let Raw {
            kind,
            path,
            previous_value,
            new_value,
        } = Raw::deserialize(deserializer)?;
        match (kind, previous_value, new_value) {
            (DifferenceKind::Added, None, Some(new)) => Ok(Self::added(path, new)),
            (DifferenceKind::Removed, Some(prev), None) => Ok(Self::removed(path, prev)),
            (DifferenceKind::Changed, Some(prev), Some(new)) => Ok(Self::changed(path, prev, new)),
            (DifferenceKind::ArrayLengthChanged, Some(prev), Some(new)) => {
                Ok(Self::array_length_changed(path, prev, new))
            }
            (kind, _, _) => Err(D::Error::custom(format!(
                "{kind:?} difference at {path} has the wrong values for its kind"
            ))),
        }
    }
}

impl Difference {
    /// A key present only in the right-hand tree.
    pub fn added(path: JsonPath, new_value: JsonValue) -> Self {
        Self {
            kind: DifferenceKind::Added,
            path,
            previous_value: None,
            new_value: Some(new_value),
        }
    }

    /// A key present only in the left-hand tree.
    pub fn removed(path: JsonPath, previous_value: JsonValue) -> Self {
        Self {
            kind: DifferenceKind::Removed,
            path,
            previous_value: Some(previous_value),
            new_value: None,
        }
    }

    /// A node whose value or type differs.
    pub fn changed(path: JsonPath, previous_value: JsonValue, new_value: JsonValue) -> Self {
        Self {
            kind: DifferenceKind::Changed,
            path,
            previous_value: Some(previous_value),
            new_value: Some(new_value),
        }
    }

    /// Two arrays of different lengths at the same path.
    pub fn array_length_changed(
        path: JsonPath,
        previous_value: JsonValue,
        new_value: JsonValue,
    ) -> Self {
        Self {
            kind: DifferenceKind::ArrayLengthChanged,
            path,
            previous_value: Some(previous_value),
            new_value: Some(new_value),
        }
    }

    pub fn kind(&self) -> DifferenceKind {
        self.kind
    }

    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    pub fn previous_value(&self) -> Option<&JsonValue> {
        self.previous_value.as_ref()
    }

    pub fn new_value(&self) -> Option<&JsonValue> {
        self.new_value.as_ref()
    }

    /// The same divergence seen from the other side: `Added` and `Removed`
    /// swap, and the previous/new values are exchanged.
    pub fn inverted(&self) -> Self {
        let kind = match self.kind {
            DifferenceKind::Added => DifferenceKind::Removed,
            DifferenceKind::Removed => DifferenceKind::Added,
            other => other,
        };
        Self {
            kind,
            path: self.path.clone(),
            previous_value: self.new_value.clone(),
            new_value: self.previous_value.clone(),
        }
    }

    /// One-line human readable summary.
    pub fn description(&self) -> String {
        let prev = render(self.previous_value.as_ref());
        let new = render(self.new_value.as_ref());
        match self.kind {
            DifferenceKind::Added => format!("Added: {} = {new}", self.path),
            DifferenceKind::Removed => format!("Removed: {} = {prev}", self.path),
            DifferenceKind::Changed => format!("Changed: {} from {prev} to {new}", self.path),
            DifferenceKind::ArrayLengthChanged => format!(
                "Array length changed at {} ({} -> {})",
                self.path,
                array_len(self.previous_value.as_ref()),
                array_len(self.new_value.as_ref()),
            ),
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

fn render(value: Option<&JsonValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

fn array_len(value: Option<&JsonValue>) -> usize {
    value.and_then(JsonValue::as_array).map_or(0, Vec::len)
}

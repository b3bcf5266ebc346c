//! The recursive comparison.
//!
//! Rules, applied at each node:
//!
//! - null vs null is equal; null vs anything else is one `Changed`;
//! - different variants (array and object are distinct) are one `Changed`
//!   carrying both values, with no descent;
//! - strings and booleans compare by value, numbers numerically;
//! - arrays of different lengths are one `ArrayLengthChanged`, otherwise
//!   elements are compared index by index;
//! - objects are compared over the union of their keys in sorted order, so
//!   insertion order never matters.

use std::borrow::Cow;
use std::collections::BTreeSet;

use jsoncmp_types::{ComparisonResult, Difference, JsonPath, JsonValue};
use serde_json::{Map, Number};
use tracing::debug;

use crate::filter::KeyFilter;

/// Options for a comparison.
#[derive(Clone, Debug, Default)]
pub struct CompareOptions {
    /// Keys removed from both inputs before comparing.
    pub exclude: KeyFilter,
}

impl CompareOptions {
    /// Options excluding the given keys.
    pub fn excluding(exclude: KeyFilter) -> Self {
        Self { exclude }
    }
}

/// Comparison engine holding validated options.
///
/// Stateless between calls; safe to share across threads.
#[derive(Clone, Debug, Default)]
pub struct DiffEngine {
    options: CompareOptions,
}

impl DiffEngine {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare `left` (previous) against `right` (new).
    pub fn compare(&self, left: &JsonValue, right: &JsonValue) -> ComparisonResult {
        let filter = &self.options.exclude;
        let (left, right): (Cow<'_, JsonValue>, Cow<'_, JsonValue>) = if filter.is_empty() {
            (Cow::Borrowed(left), Cow::Borrowed(right))
        } else {
            debug!(excluded = filter.len(), "stripping excluded keys before comparison");
            (Cow::Owned(filter.strip(left)), Cow::Owned(filter.strip(right)))
        };

        let mut differences = Vec::new();
        let mut path = JsonPath::root();
        diff_values(&left, &right, &mut path, &mut differences);

        let result = ComparisonResult::from_differences(differences);
        debug!(
            identical = result.is_identical(),
            differences = result.len(),
            "comparison finished"
        );
        result
    }
}

/// Compare two values with default options.
pub fn compare(left: &JsonValue, right: &JsonValue) -> ComparisonResult {
    DiffEngine::default().compare(left, right)
}

/// Compare two values with the given options.
pub fn compare_with_options(
    left: &JsonValue,
    right: &JsonValue,
    options: &CompareOptions,
) -> ComparisonResult {
    DiffEngine::new(options.clone()).compare(left, right)
}

fn diff_values(
    left: &JsonValue,
    right: &JsonValue,
    path: &mut JsonPath,
    out: &mut Vec<Difference>,
) {
    match (left, right) {
        (JsonValue::Null, JsonValue::Null) => {}
        (JsonValue::Bool(a), JsonValue::Bool(b)) => {
            if a != b {
                out.push(changed(path, left, right));
            }
        }
        (JsonValue::Number(a), JsonValue::Number(b)) => {
            if !json_numbers_equal(a, b) {
                out.push(changed(path, left, right));
            }
        }
        (JsonValue::String(a), JsonValue::String(b)) => {
            if a != b {
                out.push(changed(path, left, right));
            }
        }
        (JsonValue::Array(a), JsonValue::Array(b)) => {
            if a.len() != b.len() {
                out.push(Difference::array_length_changed(
                    path.clone(),
                    left.clone(),
                    right.clone(),
                ));
                return;
            }
            for (index, (l, r)) in a.iter().zip(b).enumerate() {
                path.push(index);
                diff_values(l, r, path, out);
                path.pop();
            }
        }
        (JsonValue::Object(a), JsonValue::Object(b)) => diff_objects(a, b, path, out),
        // Null on one side or a variant mismatch.
        _ => out.push(changed(path, left, right)),
    }
}

fn diff_objects(
    left: &Map<String, JsonValue>,
    right: &Map<String, JsonValue>,
    path: &mut JsonPath,
    out: &mut Vec<Difference>,
) {
    let keys: BTreeSet<&str> = left
        .keys()
        .chain(right.keys())
        .map(String::as_str)
        .collect();

    for key in keys {
        path.push(key);
        match (left.get(key), right.get(key)) {
            (Some(l), Some(r)) => diff_values(l, r, path, out),
            (None, Some(r)) => out.push(Difference::added(path.clone(), r.clone())),
            (Some(l), None) => out.push(Difference::removed(path.clone(), l.clone())),
            (None, None) => {}
        }
        path.pop();
    }
}

fn changed(path: &JsonPath, left: &JsonValue, right: &JsonValue) -> Difference {
    Difference::changed(path.clone(), left.clone(), right.clone())
}

/// Numeric equality independent of representation, so `1` equals `1.0`.
///
/// Integers compare exactly. An integer equals a float only if the float is
/// integral and has exactly that value; `9007199254740993` does not equal
/// `9007199254740992.0` even though both round to the same `f64`.
pub fn json_numbers_equal(a: &Number, b: &Number) -> bool {
    match (exact_integer(a), exact_integer(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => float_is_integer(b.as_f64(), x),
        (None, Some(y)) => float_is_integer(a.as_f64(), y),
        (None, None) => a.as_f64() == b.as_f64(),
    }
}

fn exact_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn float_is_integer(float: Option<f64>, int: i128) -> bool {
    // Outside +-2^64 no float can equal an i64 or u64.
    const BOUND: f64 = 18_446_744_073_709_551_616.0;
    match float {
        Some(f) if f.fract() == 0.0 && f.abs() < BOUND => f as i128 == int,
        _ => false,
    }
}

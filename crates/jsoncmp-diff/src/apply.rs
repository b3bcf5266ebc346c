//! Replay a difference list onto a value.
//!
//! Applying `compare(a, b)` to `a` yields a value deep-equal to `b`.

use jsoncmp_types::{Difference, DifferenceKind, JsonPath, JsonValue, PathSegment};

use crate::error::{DiffError, DiffResult};

/// Apply `differences` in order to a copy of `value`.
pub fn apply_differences(value: &JsonValue, differences: &[Difference]) -> DiffResult<JsonValue> {
    let mut root = value.clone();
    for diff in differences {
        apply_one(&mut root, diff)?;
    }
    Ok(root)
}

fn apply_one(root: &mut JsonValue, diff: &Difference) -> DiffResult<()> {
    let path = diff.path();
    let Some((last, parents)) = path.segments().split_last() else {
        // Root-level difference: replace the whole document.
        *root = diff.new_value().cloned().unwrap_or_default();
        return Ok(());
    };
    let parent = resolve_mut(root, parents, path)?;

    match diff.kind() {
        DifferenceKind::Added => {
            let value = diff.new_value().cloned().unwrap_or_default();
            match (parent, last) {
                (JsonValue::Object(map), PathSegment::Key(key)) => {
                    map.insert(key.clone(), value);
                }
                (JsonValue::Array(items), PathSegment::Index(index)) if *index <= items.len() => {
                    items.insert(*index, value);
                }
                (JsonValue::Object(_) | JsonValue::Array(_), _) => {
                    return Err(DiffError::PathNotFound(path.clone()))
                }
                _ => return Err(DiffError::NotAContainer(path.clone())),
            }
        }
        DifferenceKind::Removed => {
            let removed = match (parent, last) {
                (JsonValue::Object(map), PathSegment::Key(key)) => map.remove(key),
                (JsonValue::Array(items), PathSegment::Index(index)) if *index < items.len() => {
                    Some(items.remove(*index))
                }
                (JsonValue::Object(_) | JsonValue::Array(_), _) => None,
                _ => return Err(DiffError::NotAContainer(path.clone())),
            };
            if removed.is_none() {
                return Err(DiffError::PathNotFound(path.clone()));
            }
        }
        DifferenceKind::Changed | DifferenceKind::ArrayLengthChanged => {
            let slot = resolve_mut(parent, std::slice::from_ref(last), path)?;
            *slot = diff.new_value().cloned().unwrap_or_default();
        }
    }
    Ok(())
}

fn resolve_mut<'a>(
    mut node: &'a mut JsonValue,
    segments: &[PathSegment],
    full: &JsonPath,
) -> DiffResult<&'a mut JsonValue> {
    for segment in segments {
        node = match (node, segment) {
            (JsonValue::Object(map), PathSegment::Key(key)) => map
                .get_mut(key)
                .ok_or_else(|| DiffError::PathNotFound(full.clone()))?,
            (JsonValue::Array(items), PathSegment::Index(index)) => items
                .get_mut(*index)
                .ok_or_else(|| DiffError::PathNotFound(full.clone()))?,
            (JsonValue::Object(_) | JsonValue::Array(_), _) => {
                return Err(DiffError::PathNotFound(full.clone()))
            }
            _ => return Err(DiffError::NotAContainer(full.clone())),
        };
    }
    Ok(node)
}

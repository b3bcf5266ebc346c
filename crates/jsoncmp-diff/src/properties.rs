//! Property tests for the comparison engine.

use jsoncmp_types::{JsonValue, PathSegment};
use proptest::prelude::*;
use serde_json::json;

use crate::{apply_differences, compare, CompareOptions, DiffEngine, KeyFilter};

fn arb_json() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-e]{1,2}", inner, 0..5)
                .prop_map(|m| JsonValue::Object(m.into_iter().collect())),
        ]
    })
}

/// Serialize an object with its top-level keys in reverse order.
fn reversed_object_text(value: &JsonValue) -> String {
    let Some(map) = value.as_object() else {
        return value.to_string();
    };
    let members: Vec<String> = map
        .iter()
        .rev()
        .map(|(k, v)| format!("{}:{}", JsonValue::String(k.clone()), v))
        .collect();
    format!("{{{}}}", members.join(","))
}

proptest! {
    #[test]
    fn comparison_is_reflexive(v in arb_json()) {
        let result = compare(&v, &v);
        prop_assert!(result.is_identical());
        prop_assert!(result.differences().is_empty());
    }

    #[test]
    fn detection_is_symmetric(a in arb_json(), b in arb_json()) {
        let forward = compare(&a, &b);
        let backward = compare(&b, &a);
        prop_assert_eq!(forward.is_identical(), backward.is_identical());
        let inverted: Vec<_> = forward.differences().iter().map(|d| d.inverted()).collect();
        prop_assert_eq!(inverted.as_slice(), backward.differences());
    }

    #[test]
    fn key_order_is_irrelevant(
        v in prop::collection::btree_map("[a-z]{1,4}", arb_json(), 0..6),
        other in arb_json(),
    ) {
        let original = JsonValue::Object(v.into_iter().collect());
        let reordered: JsonValue = serde_json::from_str(&reversed_object_text(&original)).unwrap();
        let forward: Vec<_> = original.as_object().unwrap().keys().collect();
        let mut backward: Vec<_> = reordered.as_object().unwrap().keys().collect();
        backward.reverse();
        prop_assert_eq!(forward, backward);

        prop_assert!(compare(&original, &reordered).is_identical());
        prop_assert_eq!(compare(&original, &other), compare(&reordered, &other));
        prop_assert_eq!(compare(&other, &original), compare(&other, &reordered));
    }

    #[test]
    fn differences_replay_to_right(a in arb_json(), b in arb_json()) {
        let result = compare(&a, &b);
        let replayed = apply_differences(&a, result.differences()).unwrap();
        prop_assert_eq!(replayed, b);
    }

    #[test]
    fn excluded_key_never_reported(a in arb_json(), b in arb_json()) {
        let engine = DiffEngine::new(CompareOptions::excluding(KeyFilter::new(["a"]).unwrap()));
        let result = engine.compare(&a, &b);
        for diff in result.differences() {
            let hit = diff.path().segments().iter().any(|s| s == &PathSegment::Key("a".into()));
            prop_assert!(!hit, "excluded key reported at {}", diff.path());
        }
    }
}

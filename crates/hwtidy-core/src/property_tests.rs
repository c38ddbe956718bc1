//! Property-based tests for the coercion engine.
//!
//! The central invariant is that normalization is a fixed point:
//! rewriting an already-normalized document changes nothing.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use crate::normalize::Normalizer;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e9f64..1.0e9).prop_map(|f| {
            serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
        }),
        prop_oneof![
            Just("true"),
            Just("False"),
            Just("yes"),
            Just("no"),
            Just("on"),
            Just("off"),
            Just("512"),
            Just("007"),
            Just("+5"),
            Just("1.5"),
            Just("unknown"),
            Just("eth0"),
            Just("Symmetric Multi-Processing"),
            Just("not supported"),
        ]
        .prop_map(|s| Value::String(s.to_string())),
    ]
}

fn field_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("size"),
        Just("latency"),
        Just("cores"),
        Just("claimed"),
        Just("link"),
        Just("logicalname"),
        Just("physid"),
        Just("version"),
        Just("vendor"),
        Just("product"),
    ]
}

fn build_node(pairs: Vec<(&'static str, Value)>, children: Vec<Value>) -> Value {
    let mut object = Map::new();
    object.insert("id".to_string(), json!("node"));
    object.insert("class".to_string(), json!("generic"));
    for (name, value) in pairs {
        object.insert(name.to_string(), value);
    }
    if !children.is_empty() {
        object.insert("children".to_string(), Value::Array(children));
    }
    Value::Object(object)
}

fn node(depth: u32) -> BoxedStrategy<Value> {
    let pairs = prop::collection::vec((field_name(), leaf()), 0..6);
    if depth == 0 {
        pairs
            .prop_map(|pairs| build_node(pairs, Vec::new()))
            .boxed()
    } else {
        (pairs, prop::collection::vec(node(depth - 1), 0..3))
            .prop_map(|(pairs, children)| build_node(pairs, children))
            .boxed()
    }
}

fn inventory_document() -> impl Strategy<Value = Value> {
    node(2).prop_map(|data| json!({"hardware": {"node": "host", "data": data, "error": ""}}))
}

proptest! {
    /// Property: normalization is idempotent over accepted documents.
    #[test]
    fn prop_normalize_is_idempotent(document in inventory_document()) {
        let mut normalizer = Normalizer::new();
        let first = normalizer.normalize(&document).unwrap();
        let second = Normalizer::new().normalize(&first.document).unwrap();
        prop_assert_eq!(&first.document, &second.document);
        prop_assert!(!second.modified);
    }

    /// Property: any canonical integer spelling assigned to a numeric
    /// field converts to exactly that integer.
    #[test]
    fn prop_integer_literals_convert_exactly(n in any::<i64>()) {
        let document = json!({"hardware": {"node": "h", "data": {
            "id": "m", "class": "system", "size": n.to_string()
        }, "error": ""}});
        let normalized = Normalizer::new().normalize(&document).unwrap();
        prop_assert_eq!(&normalized.document["hardware"]["data"]["size"], &json!(n));
    }

    /// Property: strings outside the boolean literal set survive
    /// boolean-field coercion untouched.
    #[test]
    fn prop_unrecognized_boolean_strings_survive(text in "[a-z]{2,10}") {
        prop_assume!(!matches!(
            text.as_str(),
            "true" | "false" | "yes" | "no" | "on" | "off"
        ));
        let document = json!({"hardware": {"node": "h", "data": {
            "id": "m", "class": "system", "claimed": text.clone()
        }, "error": ""}});
        let normalized = Normalizer::new().normalize(&document).unwrap();
        prop_assert_eq!(
            &normalized.document["hardware"]["data"]["claimed"],
            &json!(text)
        );
    }

    /// Property: scalar logicalname values always end up as
    /// single-element lists.
    #[test]
    fn prop_logicalname_canonicalizes_to_list(name in "[a-z]{1,8}[0-9]?") {
        let document = json!({"hardware": {"node": "h", "data": {
            "id": "m", "class": "system", "logicalname": name.clone()
        }, "error": ""}});
        let normalized = Normalizer::new().normalize(&document).unwrap();
        prop_assert_eq!(
            &normalized.document["hardware"]["data"]["logicalname"],
            &json!([name])
        );
    }
}

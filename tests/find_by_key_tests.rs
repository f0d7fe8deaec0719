//! Integration tests for the shallowest-key search.

use structprobe::document::parser::parse_json;
use structprobe::document::{Array, Object, Value};
use structprobe::search::{find_by_key, find_key_match, SearchError};

#[test]
fn test_non_container_roots_return_absent() {
    for root in [
        Value::Absent,
        Value::Null,
        Value::from(1),
        Value::from("k"),
        Value::from(true),
    ] {
        assert_eq!(find_by_key(&root, "k").unwrap(), Value::Absent);
    }
}

#[test]
fn test_missing_key_returns_absent() {
    let root = parse_json(r#"{"a": {"b": [1, {"c": null}]}}"#).unwrap();
    assert_eq!(find_by_key(&root, "zzz").unwrap(), Value::Absent);
}

#[test]
fn test_null_value_is_a_match() {
    let root = parse_json(r#"{"a": {"b": [1, {"c": null}]}}"#).unwrap();
    assert_eq!(find_by_key(&root, "c").unwrap(), Value::Null);
}

#[test]
fn test_breadth_first_tie_break() {
    let root = parse_json(r#"{"b": {"e": 1}, "a": {"e": 2}}"#).unwrap();
    assert_eq!(find_by_key(&root, "e").unwrap(), Value::from(1));
}

#[test]
fn test_depth_tie_break() {
    let root = parse_json(r#"{"a": {"x": {"k": 1}}, "k": 2}"#).unwrap();
    assert_eq!(find_by_key(&root, "k").unwrap(), Value::from(2));
}

#[test]
fn test_level_order_across_arrays() {
    let root = parse_json(
        r#"{"list": [{"deep": {"id": "deep"}}, {"id": "second"}], "other": {"id": "other"}}"#,
    )
    .unwrap();
    // "other" is one hop away, the array elements are two hops away.
    let found = find_key_match(&root, "id").unwrap().unwrap();
    assert_eq!(found.value, Value::from("other"));
    assert_eq!(found.path, "other.id");
    assert_eq!(found.depth, 1);
}

#[test]
fn test_mutual_cycle_terminates() {
    let a = Object::new();
    let b = Object::new();
    a.insert("to_b", Value::Object(b.clone()));
    b.insert("to_a", Value::Object(a.clone()));
    b.insert("target", Value::from("here"));

    let root = Value::Object(a);
    assert_eq!(find_by_key(&root, "target").unwrap(), Value::from("here"));
    assert_eq!(find_by_key(&root, "nowhere").unwrap(), Value::Absent);
}

#[test]
fn test_self_reference_returns_same_container() {
    let c = Object::new();
    c.insert("self", Value::Null);
    c.insert("self", Value::Object(c.clone()));
    let root = Value::Object(c);
    assert!(find_by_key(&root, "self").unwrap().same_container(&root));
}

#[test]
fn test_array_containing_itself() {
    let arr = Array::new();
    arr.push(Value::Array(arr.clone()));
    arr.push(Value::object([("k", Value::from(1))]));
    let root = Value::Array(arr);
    assert_eq!(find_by_key(&root, "k").unwrap(), Value::from(1));
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let root = parse_json(r#"{"a": [{"k": 1}], "b": {"k": 2}}"#).unwrap();
    let first = find_by_key(&root, "k").unwrap();
    let second = find_by_key(&root, "k").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_blank_keys_are_invalid() {
    let root = parse_json(r#"{"": 1}"#).unwrap();
    for key in ["", "   "] {
        let err = find_by_key(&root, key).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
        assert!(err.to_string().starts_with("invalid argument"));
    }
    assert!(find_by_key(&Value::Null, "").is_err());
}

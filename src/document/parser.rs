//! Conversion between decoded JSON/YAML documents and [`Value`] graphs.
//!
//! Decoded documents are always trees; cycles can only be introduced after
//! conversion by linking containers together. [`to_json`] is the way back out
//! and guards against such cycles.
//!
//! # Example
//!
//! ```
//! use structprobe::document::parser::{parse_json, to_json};
//!
//! let root = parse_json(r#"{"name": "Alice", "tags": ["a", "b"]}"#).unwrap();
//! assert!(root.is_object());
//! assert_eq!(to_json(&root)["tags"][1], "b");
//! ```

use super::node::{Array, Number, Object, ObjectMap, Value};
use anyhow::{Context, Result};
use serde_json::Value as SerdeValue;
use serde_yaml::Value as YamlValue;

/// Marker emitted by [`to_json`] in place of a container that is already
/// being rendered further up the same branch.
pub const CIRCULAR_MARKER: &str = "[Circular]";

/// Parses a JSON string into a [`Value`] graph.
///
/// # Example
///
/// ```
/// use structprobe::document::parser::parse_json;
///
/// assert!(parse_json(r#"[1, 2, 3]"#).unwrap().is_array());
/// assert!(parse_json(r#"{"unclosed": "#).is_err());
/// ```
pub fn parse_json(json_str: &str) -> Result<Value> {
    let serde_value: SerdeValue = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    Ok(Value::from(serde_value))
}

/// Parses a YAML string into a [`Value`] graph.
///
/// Mapping keys that are not strings are rendered to their scalar text.
/// Tagged values are unwrapped to their inner value.
pub fn parse_yaml(yaml_str: &str) -> Result<Value> {
    let yaml_value: YamlValue = serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?;
    Ok(convert_yaml(&yaml_value))
}

impl From<SerdeValue> for Value {
    fn from(value: SerdeValue) -> Self {
        convert_json(&value)
    }
}

impl From<&SerdeValue> for Value {
    fn from(value: &SerdeValue) -> Self {
        convert_json(value)
    }
}

fn convert_json(value: &SerdeValue) -> Value {
    match value {
        SerdeValue::Object(map) => {
            let fields: ObjectMap = map
                .iter()
                .map(|(k, v)| (k.clone(), convert_json(v)))
                .collect();
            Value::Object(Object::from_map(fields))
        }
        SerdeValue::Array(arr) => {
            Value::Array(Array::from_vec(arr.iter().map(convert_json).collect()))
        }
        SerdeValue::String(s) => Value::String(s.clone()),
        SerdeValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Number(Number::Integer(i)),
            None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        SerdeValue::Bool(b) => Value::Bool(*b),
        SerdeValue::Null => Value::Null,
    }
}

fn convert_yaml(value: &YamlValue) -> Value {
    match value {
        YamlValue::Mapping(map) => {
            let fields: ObjectMap = map
                .iter()
                .map(|(k, v)| (yaml_key(k), convert_yaml(v)))
                .collect();
            Value::Object(Object::from_map(fields))
        }
        YamlValue::Sequence(seq) => {
            Value::Array(Array::from_vec(seq.iter().map(convert_yaml).collect()))
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Number(Number::Integer(i)),
            None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Null => Value::Null,
        YamlValue::Tagged(tagged) => convert_yaml(&tagged.value),
    }
}

fn yaml_key(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Converts a [`Value`] graph to `serde_json::Value` for output.
///
/// A container that appears again on its own ancestor chain is rendered as
/// [`CIRCULAR_MARKER`]. Shared but acyclic containers are rendered in full at
/// every occurrence. `Absent` object fields are omitted, `Absent` array
/// elements and non-finite floats become `null`.
pub fn to_json(value: &Value) -> SerdeValue {
    let mut ancestors = Vec::new();
    render_json(value, &mut ancestors)
}

fn render_json(value: &Value, ancestors: &mut Vec<usize>) -> SerdeValue {
    match value {
        Value::Absent | Value::Null => SerdeValue::Null,
        Value::Bool(b) => SerdeValue::Bool(*b),
        Value::Number(Number::Integer(i)) => SerdeValue::from(*i),
        Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(SerdeValue::Number)
            .unwrap_or(SerdeValue::Null),
        Value::String(s) => SerdeValue::String(s.clone()),
        Value::Object(obj) => {
            if ancestors.contains(&obj.id()) {
                return SerdeValue::String(CIRCULAR_MARKER.to_string());
            }
            ancestors.push(obj.id());
            let mut map = serde_json::Map::new();
            for (key, child) in obj.fields() {
                if child.is_absent() {
                    continue;
                }
                map.insert(key, render_json(&child, ancestors));
            }
            ancestors.pop();
            SerdeValue::Object(map)
        }
        Value::Array(arr) => {
            if ancestors.contains(&arr.id()) {
                return SerdeValue::String(CIRCULAR_MARKER.to_string());
            }
            ancestors.push(arr.id());
            let items = arr
                .items()
                .iter()
                .map(|child| render_json(child, ancestors))
                .collect();
            ancestors.pop();
            SerdeValue::Array(items)
        }
    }
}

//! Breadth-first lookup of the shallowest field with a given name.

use super::error::SearchError;
use super::visited::Visited;
use crate::document::node::{parse_index, ChildKey, Container, Value};
use crate::path::render::child_path;
use std::collections::VecDeque;

/// A field found by [`find_key_match`].
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMatch {
    /// Path of the matched field in dot/bracket notation.
    pub path: String,
    /// Container hops from the root to the owner of the field.
    pub depth: usize,
    /// Value bound to the field; may be `Value::Absent`.
    pub value: Value,
}

struct Pending {
    container: Container,
    path: Option<String>,
    depth: usize,
}

/// Returns the value of the shallowest field named `target_key`.
///
/// Containers are examined level by level, and within a level in the order
/// they were reached, so the first owner found wins. Returns `Value::Absent`
/// when no reachable container owns such a field or when `root` is not a
/// container.
///
/// # Errors
///
/// `SearchError::InvalidArgument` if `target_key` is empty or whitespace.
///
/// # Example
///
/// ```
/// use structprobe::document::Value;
/// use structprobe::search::find_by_key;
///
/// let root = Value::object([
///     ("a", Value::object([("x", Value::object([("k", Value::from(1))]))])),
///     ("k", Value::from(2)),
/// ]);
/// assert_eq!(find_by_key(&root, "k").unwrap(), Value::from(2));
/// ```
pub fn find_by_key(root: &Value, target_key: &str) -> Result<Value, SearchError> {
    Ok(find_key_match(root, target_key)?
        .map(|found| found.value)
        .unwrap_or(Value::Absent))
}

/// Like [`find_by_key`] but also reports where the field was found.
pub fn find_key_match(root: &Value, target_key: &str) -> Result<Option<KeyMatch>, SearchError> {
    if target_key.trim().is_empty() {
        return Err(SearchError::invalid("target key must be a non-blank string"));
    }

    let Some(container) = root.as_container() else {
        return Ok(None);
    };

    let mut frontier = VecDeque::new();
    frontier.push_back(Pending {
        container,
        path: None,
        depth: 0,
    });
    let mut visited = Visited::new();

    while let Some(Pending {
        container,
        path,
        depth,
    }) = frontier.pop_front()
    {
        if !visited.mark(&container) {
            continue;
        }

        if let Some(value) = container.own_field(target_key) {
            let key = match (&container, parse_index(target_key)) {
                (Container::Array(_), Some(idx)) => ChildKey::Index(idx),
                _ => ChildKey::Field(target_key.to_string()),
            };
            log::debug!(
                "key `{}` found at depth {} after visiting {} containers",
                target_key,
                depth,
                visited.len()
            );
            return Ok(Some(KeyMatch {
                path: child_path(path.as_deref(), &key),
                depth,
                value,
            }));
        }

        for (key, child) in container.entries() {
            if let Some(next) = child.as_container() {
                frontier.push_back(Pending {
                    container: next,
                    path: Some(child_path(path.as_deref(), &key)),
                    depth: depth + 1,
                });
            }
        }
    }

    log::trace!(
        "key `{}` not found in {} containers",
        target_key,
        visited.len()
    );
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Object;

    #[test]
    fn test_sibling_enumeration_order_breaks_ties() {
        let root = Value::object([
            ("b", Value::object([("e", Value::from(1))])),
            ("a", Value::object([("e", Value::from(2))])),
        ]);
        assert_eq!(find_by_key(&root, "e").unwrap(), Value::from(1));
    }

    #[test]
    fn test_shallower_occurrence_wins() {
        let root = Value::object([
            ("a", Value::object([("x", Value::object([("k", Value::from(1))]))])),
            ("k", Value::from(2)),
        ]);
        assert_eq!(find_by_key(&root, "k").unwrap(), Value::from(2));
    }

    #[test]
    fn test_match_reports_path_and_depth() {
        let root = Value::object([(
            "list",
            Value::array(vec![Value::Null, Value::object([("id", Value::from(7))])]),
        )]);
        let found = find_key_match(&root, "id").unwrap().unwrap();
        assert_eq!(found.path, "list[1].id");
        assert_eq!(found.depth, 2);
        assert_eq!(found.value, Value::from(7));
    }

    #[test]
    fn test_array_index_is_an_owned_field() {
        let root = Value::object([("xs", Value::array(vec![Value::from("zero")]))]);
        let found = find_key_match(&root, "0").unwrap().unwrap();
        assert_eq!(found.path, "xs[0]");
        assert_eq!(found.value, Value::from("zero"));
    }

    #[test]
    fn test_explicit_absent_binding_stops_search() {
        let root = Value::object([
            ("k", Value::Absent),
            ("deeper", Value::object([("k", Value::from(1))])),
        ]);
        assert_eq!(find_by_key(&root, "k").unwrap(), Value::Absent);
        assert!(find_key_match(&root, "k").unwrap().is_some());
    }

    #[test]
    fn test_self_cycle_returns_container() {
        let obj = Object::new();
        obj.insert("self", Value::Object(obj.clone()));
        let root = Value::Object(obj);
        let found = find_by_key(&root, "self").unwrap();
        assert!(found.same_container(&root));
        assert_eq!(find_by_key(&root, "missing").unwrap(), Value::Absent);
    }

    #[test]
    fn test_blank_key_is_rejected() {
        assert!(matches!(
            find_by_key(&Value::Null, "  "),
            Err(SearchError::InvalidArgument(_))
        ));
    }
}

//! Depth-first enumeration of every path holding a matching value.

use super::compare::Comparator;
use super::error::SearchError;
use super::visited::Visited;
use crate::document::node::{Container, Value};
use crate::path::render::child_path;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// A comparator error raised while evaluating one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("comparator failed at `{path}`: {message}")]
pub struct ComparatorFault {
    /// Path of the candidate being compared.
    pub path: String,
    pub message: String,
}

/// Paths of all matches plus the faults met along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueReport {
    pub paths: Vec<String>,
    pub faults: Vec<ComparatorFault>,
}

/// Returns the path of every field or element whose value matches `target`.
///
/// `compare` defaults to [`Comparator::Strict`]. Every reachable container is
/// entered once; a container reached again through another edge is still
/// compared at that edge, so searching for a container inside a cycle
/// reports one path per edge pointing at it. The order of the returned paths
/// is not meaningful.
///
/// # Example
///
/// ```
/// use structprobe::document::parser::parse_json;
/// use structprobe::document::Value;
/// use structprobe::search::find_by_value;
///
/// let root = parse_json(r#"{"b": {"d": [{"e": 3}, {"e": 4}]}}"#).unwrap();
/// assert_eq!(find_by_value(&root, &Value::from(3), None), vec!["b.d[0].e"]);
/// ```
pub fn find_by_value(root: &Value, target: &Value, compare: Option<&Comparator>) -> Vec<String> {
    find_by_value_report(root, target, compare).paths
}

/// Like [`find_by_value`], with the comparator given by name.
///
/// # Errors
///
/// `SearchError::InvalidArgument` when `compare` names no known comparator.
/// The name is checked before any traversal.
pub fn find_by_value_named(
    root: &Value,
    target: &Value,
    compare: Option<&str>,
) -> Result<Vec<String>, SearchError> {
    let comparator = compare.map(str::parse::<Comparator>).transpose()?;
    Ok(find_by_value(root, target, comparator.as_ref()))
}

/// Runs the value search and also returns the comparator faults.
///
/// A fault is an `Err` from the comparator or a panic inside it. Either way
/// it is logged, counted as non-matching, and does not stop the search.
pub fn find_by_value_report(
    root: &Value,
    target: &Value,
    compare: Option<&Comparator>,
) -> ValueReport {
    let mut report = ValueReport::default();
    let Some(root) = root.as_container() else {
        return report;
    };

    let strict = Comparator::Strict;
    let compare = compare.unwrap_or(&strict);

    let mut frontier: Vec<(Container, Option<String>)> = vec![(root, None)];
    let mut visited = Visited::new();

    while let Some((container, path)) = frontier.pop() {
        if !visited.mark(&container) {
            continue;
        }

        for (key, child) in container.entries() {
            let child_at = child_path(path.as_deref(), &key);

            match guarded_compare(compare, &child, target) {
                Ok(true) => report.paths.push(child_at.clone()),
                Ok(false) => {}
                Err(err) => {
                    let fault = ComparatorFault {
                        path: child_at.clone(),
                        message: format!("{:#}", err),
                    };
                    log::warn!("{}", fault);
                    report.faults.push(fault);
                }
            }

            if let Some(next) = child.as_container() {
                frontier.push((next, Some(child_at)));
            }
        }
    }

    log::debug!(
        "{} comparator: {} matches, {} faults, {} containers visited",
        compare.name(),
        report.paths.len(),
        report.faults.len(),
        visited.len()
    );
    report
}

/// Runs the comparator, turning a panic into an error for that candidate.
fn guarded_compare(
    compare: &Comparator,
    candidate: &Value,
    target: &Value,
) -> anyhow::Result<bool> {
    panic::catch_unwind(AssertUnwindSafe(|| compare.compare(candidate, target)))
        .unwrap_or_else(|payload| Err(anyhow::anyhow!("panicked: {}", panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Object;

    fn sorted(mut paths: Vec<String>) -> Vec<String> {
        paths.sort();
        paths
    }

    #[test]
    fn test_nested_match() {
        let root = Value::object([(
            "b",
            Value::object([(
                "d",
                Value::array(vec![
                    Value::object([("e", Value::from(3))]),
                    Value::object([("e", Value::from(4))]),
                ]),
            )]),
        )]);
        assert_eq!(find_by_value(&root, &Value::from(3), None), vec!["b.d[0].e"]);
    }

    #[test]
    fn test_root_array_elements_render_bare() {
        let root = Value::array(vec![Value::from(1), Value::array(vec![Value::from(1)])]);
        assert_eq!(
            sorted(find_by_value(&root, &Value::from(1), None)),
            vec!["0", "1[0]"]
        );
    }

    #[test]
    fn test_self_cycle_reports_edge() {
        let obj = Object::new();
        obj.insert("self", Value::Object(obj.clone()));
        let root = Value::Object(obj);
        assert_eq!(find_by_value(&root, &root, None), vec!["self"]);
    }

    #[test]
    fn test_every_edge_to_shared_container_is_reported() {
        let shared = Value::object([("v", Value::from(1))]);
        let root = Value::object([("a", shared.clone()), ("b", shared.clone())]);
        assert_eq!(
            sorted(find_by_value(&root, &shared, None)),
            vec!["a", "b"]
        );
        // The shared container is entered once, so its field is reported once.
        assert_eq!(find_by_value(&root, &Value::from(1), None).len(), 1);
    }

    #[test]
    fn test_faults_are_isolated() {
        let root = Value::object([
            ("bad", Value::from("boom")),
            ("good", Value::from(5)),
            ("nested", Value::object([("also", Value::from(5))])),
        ]);
        let comparator = Comparator::custom(|candidate, target| match candidate.as_str() {
            Some("boom") => anyhow::bail!("cannot compare"),
            _ => Ok(candidate == target),
        });
        let report = find_by_value_report(&root, &Value::from(5), Some(&comparator));
        assert_eq!(sorted(report.paths), vec!["good", "nested.also"]);
        assert_eq!(
            report.faults,
            vec![ComparatorFault {
                path: "bad".to_string(),
                message: "cannot compare".to_string(),
            }]
        );
    }

    #[test]
    fn test_panicking_comparator_is_a_fault() {
        let root = Value::object([
            ("a", Value::from(1)),
            ("b", Value::from("x")),
            ("c", Value::from(1)),
        ]);
        let comparator = Comparator::custom(|candidate, target| {
            Ok(candidate.as_f64().unwrap() == target.as_f64().unwrap())
        });
        let report = find_by_value_report(&root, &Value::from(1), Some(&comparator));
        assert_eq!(sorted(report.paths), vec!["a", "c"]);
        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faults[0].path, "b");
        assert!(report.faults[0].message.starts_with("panicked: "));
    }

    #[test]
    fn test_unknown_comparator_name() {
        let result = find_by_value_named(&Value::Null, &Value::from(1), Some("notAFunction"));
        assert!(matches!(result, Err(SearchError::InvalidArgument(_))));
    }

    #[test]
    fn test_structural_by_name() {
        let root = Value::object([("p", Value::object([("x", Value::from(1))]))]);
        let target = Value::object([("x", Value::from(1))]);
        assert!(find_by_value_named(&root, &target, None).unwrap().is_empty());
        assert_eq!(
            find_by_value_named(&root, &target, Some("structural")).unwrap(),
            vec!["p"]
        );
    }
}

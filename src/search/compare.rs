//! Comparators used by the value search.

use super::error::SearchError;
use crate::document::node::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Signature of a caller-supplied comparator: `(candidate, target)`.
///
/// Returning `Err` marks a comparator fault; the candidate is treated as
/// non-matching and the search continues.
pub type CompareFn = dyn Fn(&Value, &Value) -> anyhow::Result<bool>;

/// How a candidate value is matched against the search target.
#[derive(Default)]
pub enum Comparator {
    /// Scalars by value, containers by identity.
    #[default]
    Strict,
    /// Deep equality of contents; object key order is ignored.
    Structural,
    /// Caller-supplied predicate.
    Custom(Box<CompareFn>),
}

impl Comparator {
    /// Names accepted by [`Comparator::from_str`].
    pub const NAMES: [&'static str; 2] = ["strict", "structural"];

    /// Wraps a closure as a comparator.
    ///
    /// # Example
    ///
    /// ```
    /// use structprobe::document::Value;
    /// use structprobe::search::Comparator;
    ///
    /// let longer_than = Comparator::custom(|candidate, target| {
    ///     Ok(match (candidate.as_str(), target.as_f64()) {
    ///         (Some(s), Some(n)) => s.len() as f64 > n,
    ///         _ => false,
    ///     })
    /// });
    /// assert!(longer_than.compare(&Value::from("abcd"), &Value::from(3)).unwrap());
    /// ```
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<bool> + 'static,
    {
        Comparator::Custom(Box::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Comparator::Strict => "strict",
            Comparator::Structural => "structural",
            Comparator::Custom(_) => "custom",
        }
    }

    /// Evaluates the comparator for one candidate.
    pub fn compare(&self, candidate: &Value, target: &Value) -> anyhow::Result<bool> {
        match self {
            Comparator::Strict => Ok(candidate == target),
            Comparator::Structural => Ok(structural_eq(candidate, target)),
            Comparator::Custom(f) => f(candidate, target),
        }
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comparator::{}", self.name())
    }
}

impl FromStr for Comparator {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Comparator::Strict),
            "structural" => Ok(Comparator::Structural),
            _ => Err(SearchError::invalid(format!(
                "`{}` is not a comparator (expected one of: {})",
                s,
                Comparator::NAMES.join(", ")
            ))),
        }
    }
}

/// Deep equality over possibly cyclic graphs.
///
/// A pair of containers already under comparison is assumed equal when met
/// again, so two cycles with the same shape compare equal.
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    let mut in_progress = HashSet::new();
    structural_eq_inner(a, b, &mut in_progress)
}

fn structural_eq_inner(a: &Value, b: &Value, in_progress: &mut HashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) || !in_progress.insert((x.id(), y.id())) {
                return true;
            }
            if x.len() != y.len() {
                return false;
            }
            x.fields().iter().all(|(key, left)| match y.get(key) {
                Some(right) => structural_eq_inner(left, &right, in_progress),
                None => false,
            })
        }
        (Value::Array(x), Value::Array(y)) => {
            if x.ptr_eq(y) || !in_progress.insert((x.id(), y.id())) {
                return true;
            }
            let (left, right) = (x.items(), y.items());
            left.len() == right.len()
                && left
                    .iter()
                    .zip(&right)
                    .all(|(l, r)| structural_eq_inner(l, r, in_progress))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Object;

    #[test]
    fn test_strict_is_identity_for_containers() {
        let a = Value::object([("x", Value::from(1))]);
        let b = Value::object([("x", Value::from(1))]);
        let strict = Comparator::Strict;
        assert!(strict.compare(&a, &a.clone()).unwrap());
        assert!(!strict.compare(&a, &b).unwrap());
        assert!(strict.compare(&Value::from(3), &Value::from(3.0)).unwrap());
        assert!(!strict.compare(&Value::from("3"), &Value::from(3)).unwrap());
    }

    #[test]
    fn test_structural_ignores_key_order() {
        let a = Value::object([("x", Value::from(1)), ("y", Value::array(vec![Value::Null]))]);
        let b = Value::object([("y", Value::array(vec![Value::Null])), ("x", Value::from(1))]);
        assert!(structural_eq(&a, &b));
        let c = Value::object([("x", Value::from(2)), ("y", Value::array(vec![Value::Null]))]);
        assert!(!structural_eq(&a, &c));
    }

    #[test]
    fn test_structural_terminates_on_cycles() {
        let a = Object::new();
        a.insert("self", Value::Object(a.clone()));
        let b = Object::new();
        b.insert("self", Value::Object(b.clone()));
        assert!(structural_eq(&Value::Object(a), &Value::Object(b)));
    }

    #[test]
    fn test_from_str() {
        assert!(matches!("strict".parse::<Comparator>(), Ok(Comparator::Strict)));
        assert!(matches!(" Structural ".parse::<Comparator>(), Ok(Comparator::Structural)));
        assert!(matches!(
            "notAFunction".parse::<Comparator>(),
            Err(SearchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_custom_fault_is_returned() {
        let faulty = Comparator::custom(|_, _| Err(anyhow::anyhow!("boom")));
        let err = faulty.compare(&Value::Null, &Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(faulty.name(), "custom");
    }
}

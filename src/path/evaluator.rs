//! Resolution of token paths against a value graph.

use super::ast::TokenPath;
use super::parser::Parser;
use crate::document::node::{parse_index, Container, Value};

/// A path given either as an expression or as ready-made tokens.
#[derive(Debug, Clone, Copy)]
pub enum PathInput<'p> {
    Expr(&'p str),
    Tokens(&'p [String]),
}

impl<'p> From<&'p str> for PathInput<'p> {
    fn from(expr: &'p str) -> Self {
        PathInput::Expr(expr)
    }
}

impl<'p> From<&'p String> for PathInput<'p> {
    fn from(expr: &'p String) -> Self {
        PathInput::Expr(expr)
    }
}

impl<'p> From<&'p [String]> for PathInput<'p> {
    fn from(tokens: &'p [String]) -> Self {
        PathInput::Tokens(tokens)
    }
}

impl<'p> From<&'p TokenPath> for PathInput<'p> {
    fn from(path: &'p TokenPath) -> Self {
        PathInput::Tokens(path.tokens())
    }
}

/// Walks token paths from a fixed root.
pub struct Evaluator<'a> {
    root: &'a Value,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a Value) -> Self {
        Evaluator { root }
    }

    /// Returns the value at `tokens`, or `None` if any hop cannot be taken.
    ///
    /// Objects are entered by field name, arrays by canonical decimal index.
    /// An empty token list resolves to nothing.
    pub fn evaluate(&self, tokens: &[String]) -> Option<Value> {
        if tokens.is_empty() {
            return None;
        }

        let mut current = self.root.clone();
        for token in tokens {
            let container = current.as_container()?;
            current = step(&container, token)?;
        }
        Some(current)
    }

    /// Resolves `path`, substituting `fallback` for missing or absent values.
    pub fn resolve<'p>(&self, path: impl Into<PathInput<'p>>, fallback: Value) -> Value {
        let found = match path.into() {
            PathInput::Expr(expr) => self.evaluate(Parser::parse(expr).tokens()),
            PathInput::Tokens(tokens) => self.evaluate(tokens),
        };
        match found {
            Some(value) if !value.is_absent() => value,
            _ => fallback,
        }
    }
}

fn step(container: &Container, token: &str) -> Option<Value> {
    match container {
        Container::Object(obj) => obj.get(token),
        Container::Array(arr) => parse_index(token).and_then(|idx| arr.get(idx)),
    }
}

/// Resolves `path` against `root`, returning `fallback` when the path cannot
/// be followed, the root is not a container, or the value found is absent.
///
/// # Example
///
/// ```
/// use structprobe::document::parser::parse_json;
/// use structprobe::document::Value;
/// use structprobe::path::resolve;
///
/// let root = parse_json(r#"{"users": [{"name": "Alice"}]}"#).unwrap();
/// assert_eq!(resolve(&root, "users[0].name", Value::Null), Value::from("Alice"));
/// assert_eq!(resolve(&root, "users[1].name", Value::from("?")), Value::from("?"));
/// ```
pub fn resolve<'p>(root: &Value, path: impl Into<PathInput<'p>>, fallback: Value) -> Value {
    Evaluator::new(root).resolve(path, fallback)
}

/// [`resolve`] with `Value::Absent` as the fallback.
pub fn get<'p>(root: &Value, path: impl Into<PathInput<'p>>) -> Value {
    resolve(root, path, Value::Absent)
}

//! Data graph model and document conversion.
//!
//! This module defines the [`Value`](node::Value) graph that every search in
//! structprobe runs over, and the conversions from decoded JSON/YAML text.

pub mod node;
pub mod parser;

pub use node::{Array, ChildKey, Container, Number, Object, Value};

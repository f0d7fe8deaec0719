//! structprobe - structural introspection over nested, schema-free data graphs.
//!
//! The crate answers three questions about a [`Value`](document::Value) graph
//! such as a decoded JSON or YAML document:
//!
//! - what is at a path? ([`path::resolve`], [`path::get`])
//! - what is the value of the shallowest field called `K`?
//!   ([`search::find_by_key`])
//! - where does a value occur? ([`search::find_by_value`])
//!
//! Missing branches, `null`, absent values and cyclic graphs are all handled
//! without errors; only invalid arguments are reported as errors.
//!
//! ```
//! use structprobe::document::parser::parse_json;
//! use structprobe::document::Value;
//! use structprobe::path::{get, Parser};
//! use structprobe::search::{find_by_key, find_by_value};
//!
//! let root = parse_json(r#"{"b": {"d": [{"e": 3}, {"e": 4}]}}"#).unwrap();
//!
//! let paths = find_by_value(&root, &Value::from(3), None);
//! assert_eq!(paths, vec!["b.d[0].e"]);
//! assert_eq!(Parser::parse(&paths[0]), ["b", "d", "0", "e"]);
//! assert_eq!(get(&root, paths[0].as_str()), Value::from(3));
//! assert_eq!(find_by_key(&root, "e").unwrap(), Value::from(3));
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod path;
pub mod search;

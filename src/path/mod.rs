//! Path expressions: scanning and rendering.
//!
//! # Supported Syntax
//!
//! - `name` / `.name` - property access
//! - `[0]` - sequence index (decimal digits only)
//! - `['key']` / `["key"]` - quoted property, may contain `.`, `[` and `]`
//!
//! Notations mix freely: `users[0].address["zip-code"]`.
//!
//! Rendering goes the other way and produces the canonical dot/bracket form
//! used when reporting where a value was found.

pub mod ast;
pub mod evaluator;
pub mod parser;
pub mod render;

pub use ast::TokenPath;
pub use evaluator::{get, resolve, Evaluator, PathInput};
pub use parser::{ParseOutcome, Parser, Recovery, Transition};

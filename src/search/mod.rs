//! Schema-free searches over [`Value`](crate::document::Value) graphs.
//!
//! - [`find_by_key`]: breadth-first, returns the value of the shallowest
//!   field with a given name.
//! - [`find_by_value`]: depth-first, returns the path of every field or
//!   element whose value matches a target under a [`Comparator`].
//!
//! Both searches track visited containers by identity for the duration of a
//! single call, so cyclic graphs terminate. Neither search mutates the graph.

pub mod by_key;
pub mod by_value;
pub mod compare;
pub mod error;
pub mod visited;

pub use by_key::{find_by_key, find_key_match, KeyMatch};
pub use by_value::{
    find_by_value, find_by_value_named, find_by_value_report, ComparatorFault, ValueReport,
};
pub use compare::{structural_eq, CompareFn, Comparator};
pub use error::SearchError;
pub use visited::Visited;

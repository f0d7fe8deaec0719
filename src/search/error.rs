//! Error types for the graph searches.

use thiserror::Error;

/// Errors returned by the locators.
///
/// Only broken call contracts are errors. Missing keys and values are normal
/// outcomes (`Value::Absent` / an empty path list), and faulty data never
/// aborts a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// An argument was rejected before any traversal started.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SearchError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SearchError::InvalidArgument(message.into())
    }
}

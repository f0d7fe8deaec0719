//! Per-call record of containers already entered by a traversal.

use crate::document::node::Container;
use std::collections::HashSet;

/// Identity set of visited containers.
///
/// Keyed on the address of the shared allocation, so two structurally equal
/// containers are distinct while two handles to one container are the same.
/// A fresh set is created for every search call.
#[derive(Debug, Default)]
pub struct Visited {
    ids: HashSet<usize>,
}

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `container`; returns false if it had already been recorded.
    pub fn mark(&mut self, container: &Container) -> bool {
        self.ids.insert(container.id())
    }

    pub fn contains(&self, container: &Container) -> bool {
        self.ids.contains(&container.id())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

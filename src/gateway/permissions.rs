//! Method filter consulted before every dispatch.
//!
//! A populated filter acts as a deny-list: an operation whose name is in the
//! set is refused. An empty filter lets everything through.

use dashmap::DashSet;

/// Concurrent set of operation names.
#[derive(Debug, Default)]
pub struct PermissionFilter {
    names: DashSet<String>,
}

impl PermissionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a space-separated list of operation names.
    pub fn from_list(list: &str) -> Self {
        let filter = Self::new();
        for name in list.split_whitespace() {
            filter.add(name);
        }
        filter
    }

    /// Insert a name. Returns false if it was already present.
    pub fn add(&self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a dispatch of `name` must be refused.
    pub fn is_prohibited(&self, name: &str) -> bool {
        !self.is_empty() && self.contains(name)
    }

    /// Sorted snapshot of the configured names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().map(|n| n.key().clone()).collect();
        names.sort();
        names
    }
}

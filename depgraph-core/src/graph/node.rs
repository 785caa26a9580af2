//! Graph Nodes
//!
//! This module defines how nodes are named and the adjacency record each
//! materialized node carries.

use std::borrow::Cow;

use indexmap::IndexSet;

/// Anything that can name a node, or stand for an absent one.
///
/// Graph operations take node names through this trait so that callers can
/// pass `&str`, `String` or `Cow<str>` directly, and `Option<_>` where the
/// name may be missing. An absent name turns mutators into no-ops and
/// queries into empty results.
///
/// ```rust
/// use depgraph_core::NodeKey;
///
/// assert_eq!("a1".as_node(), Some("a1"));
/// assert_eq!(None::<&str>.as_node(), None);
/// ```
pub trait NodeKey {
    /// The node name, or `None` if absent.
    fn as_node(&self) -> Option<&str>;
}

impl NodeKey for str {
    fn as_node(&self) -> Option<&str> {
        Some(self)
    }
}

impl NodeKey for String {
    fn as_node(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl NodeKey for Cow<'_, str> {
    fn as_node(&self) -> Option<&str> {
        Some(&**self)
    }
}

impl<K: NodeKey + ?Sized> NodeKey for &K {
    fn as_node(&self) -> Option<&str> {
        (**self).as_node()
    }
}

impl<K: NodeKey> NodeKey for Option<K> {
    fn as_node(&self) -> Option<&str> {
        self.as_ref().and_then(|key| key.as_node())
    }
}

/// The adjacency record of a materialized node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Node {
    /// Nodes that depend on this node.
    dependents: IndexSet<String>,

    /// Nodes this node depends on.
    dependees: IndexSet<String>,
}

impl Node {
    /// Get all dependents.
    pub(crate) fn dependents(&self) -> &IndexSet<String> {
        &self.dependents
    }

    /// Get all dependees.
    pub(crate) fn dependees(&self) -> &IndexSet<String> {
        &self.dependees
    }

    pub(crate) fn has_dependent(&self, node: &str) -> bool {
        self.dependents.contains(node)
    }

    pub(crate) fn has_dependee(&self, node: &str) -> bool {
        self.dependees.contains(node)
    }

    /// Add a dependent. Returns `false` if it was already present.
    pub(crate) fn add_dependent(&mut self, node: &str) -> bool {
        if self.dependents.contains(node) {
            return false;
        }
        self.dependents.insert(node.to_owned())
    }

    /// Add a dependee. Returns `false` if it was already present.
    pub(crate) fn add_dependee(&mut self, node: &str) -> bool {
        if self.dependees.contains(node) {
            return false;
        }
        self.dependees.insert(node.to_owned())
    }

    /// Remove a dependent. Returns `false` if it was not present.
    pub(crate) fn remove_dependent(&mut self, node: &str) -> bool {
        self.dependents.swap_remove(node)
    }

    /// Remove a dependee. Returns `false` if it was not present.
    pub(crate) fn remove_dependee(&mut self, node: &str) -> bool {
        self.dependees.swap_remove(node)
    }

    /// A record with no edges in either direction.
    pub(crate) fn is_isolated(&self) -> bool {
        self.dependents.is_empty() && self.dependees.is_empty()
    }
}

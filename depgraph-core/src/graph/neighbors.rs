//! Neighbor Snapshots
//!
//! Queries for dependents and dependees hand back a [`Neighbors`] value: an
//! owned copy of the set as it was when the query ran. Mutating the graph
//! afterwards never changes a snapshot, and a snapshot can be iterated any
//! number of times.

use indexmap::IndexSet;
use smallvec::SmallVec;

/// Most cells reference only a handful of others, so small neighbor sets
/// stay inline.
type Inline = SmallVec<[String; 4]>;

/// A snapshot of one adjacency view of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    nodes: Inline,
}

impl Neighbors {
    pub(crate) fn snapshot(set: &IndexSet<String>) -> Self {
        Self {
            nodes: set.iter().cloned().collect(),
        }
    }

    /// Number of nodes in the snapshot.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether `node` is part of the snapshot.
    pub fn contains(&self, node: &str) -> bool {
        self.nodes.iter().any(|n| n == node)
    }

    /// Iterate over the node names.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(String::as_str)
    }
}

impl IntoIterator for Neighbors {
    type Item = String;
    type IntoIter = smallvec::IntoIter<[String; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Neighbors {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> IndexSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn snapshot_copies_set() {
        let neighbors = Neighbors::snapshot(&set(&["b", "c"]));
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains("b"));
        assert!(neighbors.contains("c"));
        assert!(!neighbors.contains("d"));
        assert_eq!(neighbors.iter().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn default_is_empty() {
        let neighbors = Neighbors::default();
        assert!(neighbors.is_empty());
        assert_eq!(neighbors.iter().count(), 0);
    }

    #[test]
    fn iteration_is_restartable() {
        let neighbors = Neighbors::snapshot(&set(&["x", "y", "z", "w", "v"]));
        let first: Vec<&String> = (&neighbors).into_iter().collect();
        let second: Vec<&String> = (&neighbors).into_iter().collect();
        assert_eq!(first, second);

        let owned: Vec<String> = neighbors.into_iter().collect();
        assert_eq!(owned, vec!["x", "y", "z", "w", "v"]);
    }
}

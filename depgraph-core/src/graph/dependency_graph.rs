//! Dependency Graph
//!
//! The graph is a set of ordered pairs `(s, t)`, read as "t depends on s":
//! `s` must be evaluated before `t`. For a node `s`:
//!
//! - `dependents(s)` is every `t` such that `(s, t)` is in the graph
//! - `dependees(s)` is every `t` such that `(t, s)` is in the graph
//!
//! For example, with the pairs `("a", "b")`, `("a", "c")`, `("b", "d")` and
//! `("d", "d")`:
//!
//! ```text
//! dependents("a") = {"b", "c"}     dependees("a") = {}
//! dependents("b") = {"d"}          dependees("b") = {"a"}
//! dependents("c") = {}             dependees("c") = {"a"}
//! dependents("d") = {"d"}          dependees("d") = {"b", "d"}
//! ```
//!
//! Both views are stored, one per node record, and every mutation updates
//! them together. The graph never traverses past direct neighbors and never
//! checks for cycles; ordering recomputation is the caller's job.

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::neighbors::Neighbors;
use super::node::{Node, NodeKey};
use crate::error::{GraphError, Result};

/// A directed graph of "t depends on s" relationships between named nodes.
///
/// Nodes are materialized the first time they appear in an edge and keep
/// their record after their last edge is removed (see
/// [`remove_isolated_nodes`](Self::remove_isolated_nodes)).
///
/// # Example
///
/// ```rust
/// use depgraph_core::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
/// graph.add_dependency("A1", "B1"); // B1 = A1 + 1
/// graph.add_dependency("A1", "C1"); // C1 = A1 * 2
///
/// assert_eq!(graph.size(), 2);
/// assert!(graph.dependents("A1").contains("B1"));
/// assert_eq!(graph.dependee_count("C1"), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// Adjacency records, indexed by node name.
    nodes: IndexMap<String, Node>,

    /// Number of distinct edges.
    size: usize,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `nodes` records.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: IndexMap::with_capacity(nodes),
            size: 0,
        }
    }

    /// The number of ordered pairs in the graph.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the graph holds no edges. Stale node records may remain.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of materialized node records, including ones whose edges
    /// have all been removed.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `s` has a node record.
    pub fn contains_node(&self, s: impl NodeKey) -> bool {
        self.node(&s).is_some()
    }

    /// Iterate over every materialized node name.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// The size of `dependees(s)`. Zero for an absent or unknown node.
    pub fn dependee_count(&self, s: impl NodeKey) -> usize {
        self.node(&s).map_or(0, |node| node.dependees().len())
    }

    /// The size of `dependents(s)`. Zero for an absent or unknown node.
    pub fn dependent_count(&self, s: impl NodeKey) -> usize {
        self.node(&s).map_or(0, |node| node.dependents().len())
    }

    /// Reports whether `dependents(s)` is non-empty.
    pub fn has_dependents(&self, s: impl NodeKey) -> bool {
        self.dependent_count(s) > 0
    }

    /// Reports whether `dependees(s)` is non-empty.
    pub fn has_dependees(&self, s: impl NodeKey) -> bool {
        self.dependee_count(s) > 0
    }

    /// Snapshot of `dependents(s)`. Empty for an absent or unknown node.
    pub fn dependents(&self, s: impl NodeKey) -> Neighbors {
        self.node(&s)
            .map(|node| Neighbors::snapshot(node.dependents()))
            .unwrap_or_default()
    }

    /// Snapshot of `dependees(s)`. Empty for an absent or unknown node.
    pub fn dependees(&self, s: impl NodeKey) -> Neighbors {
        self.node(&s)
            .map(|node| Neighbors::snapshot(node.dependees()))
            .unwrap_or_default()
    }

    /// Whether the ordered pair `(s, t)` is in the graph.
    pub fn contains_dependency(&self, s: impl NodeKey, t: impl NodeKey) -> bool {
        match (self.node(&s), t.as_node()) {
            (Some(node), Some(t)) => node.has_dependent(t),
            _ => false,
        }
    }

    /// Iterate over every ordered pair `(s, t)`, grouped by `s`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.nodes.iter().flat_map(|(s, node)| {
            node.dependents()
                .iter()
                .map(move |t| (s.as_str(), t.as_str()))
        })
    }

    /// Adds the ordered pair `(s, t)`: `t` depends on `s`.
    ///
    /// Does nothing if either node is absent or the pair already exists.
    /// Returns `true` if a new pair was added.
    pub fn add_dependency(&mut self, s: impl NodeKey, t: impl NodeKey) -> bool {
        let (Some(s), Some(t)) = (s.as_node(), t.as_node()) else {
            trace!("ignoring dependency with an absent node");
            return false;
        };

        let inserted = self.materialize(s).add_dependent(t);
        if !inserted {
            debug_assert!(self.node(&t).is_some_and(|node| node.has_dependee(s)));
            return false;
        }
        self.materialize(t).add_dependee(s);
        self.size += 1;

        trace!(dependee = s, dependent = t, size = self.size, "added dependency");
        true
    }

    /// Removes the ordered pair `(s, t)`, if it exists.
    ///
    /// Node records are kept even when they lose their last edge.
    /// Returns `true` if a pair was removed.
    pub fn remove_dependency(&mut self, s: impl NodeKey, t: impl NodeKey) -> bool {
        let (Some(s), Some(t)) = (s.as_node(), t.as_node()) else {
            trace!("ignoring removal with an absent node");
            return false;
        };

        let removed = self
            .nodes
            .get_mut(s)
            .is_some_and(|node| node.remove_dependent(t));
        if !removed {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(t) {
            node.remove_dependee(s);
        }
        self.size -= 1;

        trace!(dependee = s, dependent = t, size = self.size, "removed dependency");
        true
    }

    /// Removes every pair `(s, r)`, then adds `(s, t)` for each `t` in
    /// `new_dependents`. `dependees(s)` is left untouched.
    ///
    /// Does nothing if `s` is absent or `new_dependents` is empty. Absent
    /// entries still count towards the replacement but add no pair, so
    /// passing only absent entries clears `dependents(s)`.
    pub fn replace_dependents<I>(&mut self, s: impl NodeKey, new_dependents: I)
    where
        I: IntoIterator,
        I::Item: NodeKey,
    {
        let Some(s) = s.as_node() else {
            return;
        };
        let new_dependents: Vec<I::Item> = new_dependents.into_iter().collect();
        if new_dependents.is_empty() {
            return;
        }

        let old = self.dependents(s);
        for r in &old {
            self.remove_dependency(s, r);
        }
        for t in &new_dependents {
            self.add_dependency(s, t);
        }

        debug!(
            node = s,
            removed = old.len(),
            dependents = self.dependent_count(s),
            "replaced dependents"
        );
    }

    /// Removes every pair `(r, s)`, then adds `(t, s)` for each `t` in
    /// `new_dependees`. `dependents(s)` is left untouched.
    ///
    /// The no-op conditions mirror [`replace_dependents`](Self::replace_dependents).
    pub fn replace_dependees<I>(&mut self, s: impl NodeKey, new_dependees: I)
    where
        I: IntoIterator,
        I::Item: NodeKey,
    {
        let Some(s) = s.as_node() else {
            return;
        };
        let new_dependees: Vec<I::Item> = new_dependees.into_iter().collect();
        if new_dependees.is_empty() {
            return;
        }

        let old = self.dependees(s);
        for r in &old {
            self.remove_dependency(r, s);
        }
        for t in &new_dependees {
            self.add_dependency(t, s);
        }

        debug!(
            node = s,
            removed = old.len(),
            dependees = self.dependee_count(s),
            "replaced dependees"
        );
    }

    /// Drop the records of nodes with no remaining edges.
    ///
    /// Returns the number of records removed.
    pub fn remove_isolated_nodes(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| !node.is_isolated());
        let removed = before - self.nodes.len();

        debug!(removed, remaining = self.nodes.len(), "removed isolated nodes");
        removed
    }

    /// Remove every edge and node record.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.size = 0;
    }

    /// Check that the dependents and dependees indexes mirror each other
    /// and that the edge count matches.
    pub fn verify(&self) -> Result<()> {
        let mut actual = 0;

        for (name, node) in &self.nodes {
            for t in node.dependents() {
                actual += 1;
                match self.nodes.get(t.as_str()) {
                    None => return Err(GraphError::DanglingNode { node: t.clone() }),
                    Some(target) if !target.has_dependee(name) => {
                        return Err(GraphError::MissingDependee {
                            dependee: name.clone(),
                            dependent: t.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }

            for r in node.dependees() {
                match self.nodes.get(r.as_str()) {
                    None => return Err(GraphError::DanglingNode { node: r.clone() }),
                    Some(source) if !source.has_dependent(name) => {
                        return Err(GraphError::MissingDependent {
                            dependee: r.clone(),
                            dependent: name.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        if actual != self.size {
            return Err(GraphError::SizeMismatch {
                recorded: self.size,
                actual,
            });
        }
        Ok(())
    }

    fn node(&self, s: &impl NodeKey) -> Option<&Node> {
        s.as_node().and_then(|s| self.nodes.get(s))
    }

    /// Get the record for `s`, creating an empty one first if needed.
    fn materialize(&mut self, s: &str) -> &mut Node {
        let index = match self.nodes.get_index_of(s) {
            Some(index) => index,
            None => self.nodes.insert_full(s.to_owned(), Node::default()).0,
        };
        &mut self.nodes[index]
    }
}

impl<S: NodeKey, T: NodeKey> Extend<(S, T)> for DependencyGraph {
    fn extend<I: IntoIterator<Item = (S, T)>>(&mut self, iter: I) {
        for (s, t) in iter {
            self.add_dependency(s, t);
        }
    }
}

impl<S: NodeKey, T: NodeKey> FromIterator<(S, T)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::DependencyGraph;

    /// Serialized as a sequence of `[dependee, dependent]` pairs. Records
    /// without edges are not carried over.
    impl Serialize for DependencyGraph {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.edges())
        }
    }

    impl<'de> Deserialize<'de> for DependencyGraph {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let edges = Vec::<(String, String)>::deserialize(deserializer)?;
            Ok(edges.into_iter().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(neighbors: Neighbors) -> Vec<String> {
        let mut nodes: Vec<String> = neighbors.into_iter().collect();
        nodes.sort();
        nodes
    }

    #[test]
    fn new_graph_is_empty() {
        let graph = DependencyGraph::new();
        assert_eq!(graph.size(), 0);
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn add_materializes_both_endpoints() {
        let mut graph = DependencyGraph::with_capacity(4);
        assert!(graph.add_dependency("a", "b"));

        assert!(graph.contains_node("a"));
        assert!(graph.contains_node("b"));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_dependency("a", "b"));
        assert!(!graph.add_dependency("a", "b"));
        assert_eq!(graph.size(), 1);
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn self_edge_counts_once() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_dependency("d", "d"));
        assert!(!graph.add_dependency("d", "d"));

        assert_eq!(graph.size(), 1);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains_dependency("d", "d"));
        assert!(graph.verify().is_ok());

        assert!(graph.remove_dependency("d", "d"));
        assert_eq!(graph.size(), 0);
        assert!(!graph.has_dependents("d"));
        assert!(!graph.has_dependees("d"));
    }

    #[test]
    fn remove_keeps_stale_records() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        assert!(graph.remove_dependency("a", "b"));
        assert!(!graph.remove_dependency("a", "b"));

        assert_eq!(graph.size(), 0);
        assert_eq!(graph.node_count(), 2);
        assert!(!graph.has_dependents("a"));
        assert!(!graph.has_dependees("b"));

        assert_eq!(graph.remove_isolated_nodes(), 2);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn remove_unknown_nodes_is_a_no_op() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        assert!(!graph.remove_dependency("x", "b"));
        assert!(!graph.remove_dependency("a", "y"));
        assert!(!graph.remove_dependency("b", "a"));
        assert_eq!(graph.size(), 1);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn absent_nodes_are_ignored() {
        let mut graph = DependencyGraph::new();
        assert!(!graph.add_dependency(None::<&str>, "b"));
        assert!(!graph.add_dependency("a", None::<&str>));
        assert_eq!(graph.node_count(), 0);

        graph.add_dependency("a", "b");
        assert!(!graph.remove_dependency(None::<&str>, "b"));
        assert_eq!(graph.size(), 1);
        assert_eq!(graph.dependee_count(None::<&str>), 0);
        assert!(graph.dependents(None::<&str>).is_empty());
    }

    #[test]
    fn replace_dependents_on_unknown_node_adds_edges() {
        let mut graph = DependencyGraph::new();
        graph.replace_dependents("a", ["b", "c"]);

        assert_eq!(graph.size(), 2);
        assert_eq!(sorted(graph.dependents("a")), vec!["b", "c"]);
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn replace_with_empty_set_is_a_no_op() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.replace_dependents("a", Vec::<String>::new());
        graph.replace_dependees("b", Option::<Vec<&str>>::None.into_iter().flatten());

        assert_eq!(graph.size(), 1);
        assert!(graph.contains_dependency("a", "b"));
    }

    #[test]
    fn replace_with_only_absent_entries_clears() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("a", "c");
        graph.replace_dependents("a", [None::<&str>]);

        assert_eq!(graph.size(), 0);
        assert!(!graph.has_dependents("a"));
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn clear_resets_everything() {
        let mut graph: DependencyGraph = [("a", "b"), ("b", "c")].into_iter().collect();
        graph.clear();
        assert_eq!(graph, DependencyGraph::new());
    }

    #[test]
    fn verify_reports_size_mismatch() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.size = 2;

        assert_eq!(
            graph.verify(),
            Err(GraphError::SizeMismatch { recorded: 2, actual: 1 })
        );
    }

    #[test]
    fn verify_reports_missing_mirror_entries() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        if let Some(node) = graph.nodes.get_mut("b") {
            node.remove_dependee("a");
        }
        assert_eq!(
            graph.verify(),
            Err(GraphError::MissingDependee {
                dependee: "a".to_string(),
                dependent: "b".to_string(),
            })
        );

        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        if let Some(node) = graph.nodes.get_mut("a") {
            node.remove_dependent("b");
        }
        assert_eq!(
            graph.verify(),
            Err(GraphError::MissingDependent {
                dependee: "a".to_string(),
                dependent: "b".to_string(),
            })
        );
    }

    #[test]
    fn verify_reports_dangling_nodes() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.nodes.shift_remove("b");

        assert_eq!(
            graph.verify(),
            Err(GraphError::DanglingNode {
                node: "b".to_string()
            })
        );
    }
}

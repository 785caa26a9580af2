//! Depgraph Core
//!
//! This crate provides the dependency graph behind spreadsheet recalculation:
//! a set of "t depends on s" relationships between named cells, indexed in
//! both directions.
//!
//! It implements:
//!
//! - Edge insertion and removal with set semantics
//! - Direct dependents/dependees queries returning snapshots
//! - Wholesale replacement of a node's outgoing or incoming edges
//! - An audit that checks the two indexes mirror each other
//!
//! The graph answers one-hop questions only. Transitive recomputation order
//! and cycle detection belong to the host.
//!
//! # Modules
//!
//! - `graph`: the graph, its node keys and neighbor snapshots
//! - `error`: inconsistencies reported by [`DependencyGraph::verify`]
//!
//! # Features
//!
//! - `serde`: serialize a graph as a list of `[dependee, dependent]` pairs
//!
//! # Example
//!
//! ```rust
//! use depgraph_core::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//!
//! // B1 = A1 + A2
//! graph.add_dependency("A1", "B1");
//! graph.add_dependency("A2", "B1");
//!
//! // A1 changed: B1 needs recomputing
//! assert!(graph.dependents("A1").contains("B1"));
//!
//! // B1 redefined as A3 * 2
//! graph.replace_dependees("B1", ["A3"]);
//! assert_eq!(graph.dependees("B1").iter().collect::<Vec<_>>(), vec!["A3"]);
//! assert!(!graph.has_dependents("A1"));
//! ```

pub mod graph;
mod error;

pub use error::{GraphError, Result};
pub use graph::{DependencyGraph, Neighbors, NodeKey};

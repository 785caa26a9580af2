//! Dependency Graph
//!
//! This module implements the graph that records which nodes depend on which.
//!
//! # Overview
//!
//! Every node that has appeared in an edge owns an adjacency record with two
//! sets:
//!
//! - dependents: nodes that depend on it (edges going out)
//! - dependees: nodes it depends on (edges coming in)
//!
//! An edge `(s, t)` is present exactly when `t` is a dependent of `s` and `s`
//! is a dependee of `t`. Every mutation goes through the single-edge add and
//! remove primitives, which keep the two sets and the edge count in step.
//!
//! # Design Decisions
//!
//! 1. Node existence is "has a record in the map". Records are created on
//!    first reference and are not reclaimed automatically.
//!
//! 2. Neighbor sets are `IndexSet`s: constant-time membership with a
//!    deterministic iteration order.
//!
//! 3. Queries return owned snapshots, so iterating never observes a
//!    concurrent mutation of the same graph.

mod dependency_graph;
mod neighbors;
mod node;

pub use dependency_graph::DependencyGraph;
pub use neighbors::Neighbors;
pub use node::NodeKey;

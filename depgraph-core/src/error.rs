//! Graph Errors
//!
//! Edge operations never fail: invalid input degrades to a no-op or an empty
//! result. The only fallible entry point is [`DependencyGraph::verify`], which
//! audits the mirrored indexes and reports the first inconsistency it finds.
//!
//! [`DependencyGraph::verify`]: crate::DependencyGraph::verify

use thiserror::Error;

/// An inconsistency between the dependents and dependees indexes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// `dependent` is listed in `dependents(dependee)`, but the mirror entry is missing.
    #[error("{dependent:?} is a dependent of {dependee:?}, but {dependee:?} is not among its dependees")]
    MissingDependee { dependee: String, dependent: String },

    /// `dependee` is listed in `dependees(dependent)`, but the mirror entry is missing.
    #[error("{dependee:?} is a dependee of {dependent:?}, but {dependent:?} is not among its dependents")]
    MissingDependent { dependee: String, dependent: String },

    /// A neighbor set names a node that has no adjacency record.
    #[error("node {node:?} is referenced by an edge but has no adjacency record")]
    DanglingNode { node: String },

    /// The running edge count disagrees with the edges actually stored.
    #[error("graph records {recorded} edges but {actual} are present")]
    SizeMismatch { recorded: usize, actual: usize },
}

/// Result alias for graph audits.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

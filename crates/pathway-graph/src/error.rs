//! Error types for pathway graph construction.
//!
//! Queries through [`GraphQueryPort`](crate::GraphQueryPort) never fail: ids
//! that are not in the graph are skipped. Errors only arise while a
//! [`PathwayGraph`](crate::PathwayGraph) is being built from caller data.

use crate::domain::{EdgeId, NodeId};
use thiserror::Error;

/// The error type for pathway graph operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A node with this id is already in the graph.
    #[error("duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// An edge with this id is already in the graph.
    #[error("duplicate edge: {0}")]
    DuplicateEdge(EdgeId),

    /// An edge endpoint or parent link names a node that does not exist.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// A node names itself as its parent.
    #[error("node cannot contain itself: {0}")]
    InvalidContainer(NodeId),

    /// A parent link would close a cycle in the containment forest.
    #[error("containment cycle through node: {0}")]
    ContainmentCycle(NodeId),
}

/// A specialized Result type for pathway graph operations.
pub type Result<T> = std::result::Result<T, Error>;

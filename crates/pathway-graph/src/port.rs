//! Read-only query interface over a pathway graph.
//!
//! The relevance algorithms never touch a concrete graph type. They read
//! through [`GraphQueryPort`], which a diagram view, a test fixture or the
//! bundled [`PathwayGraph`](crate::PathwayGraph) can implement.
//!
//! # Contract
//!
//! - The parent relation is a forest. Implementations that cannot guarantee
//!   this still get terminating traversals, but the results are unspecified.
//! - Every id referenced by an edge or a parent link exists in the node set.
//! - Ids passed in that are not part of the graph are skipped, never an error.
//! - Enumeration order is stable for an unchanged graph, so that callers
//!   iterating the port produce reproducible results.

use crate::domain::{Edge, MergedEdge, Node, NodeId};

/// Result of a first-degree neighbor query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstNeighbors<'g> {
    /// The query nodes that exist in the graph, deduplicated
    pub root_nodes: Vec<&'g Node>,

    /// Nodes joined to a root by an edge, excluding the roots themselves
    pub neighbors: Vec<&'g Node>,

    /// Edges incident to at least one root
    pub edges: Vec<&'g Edge>,

    /// Merged edges incident to at least one root (empty unless requested)
    pub merged_edges: Vec<MergedEdge>,
}

impl FirstNeighbors<'_> {
    /// Returns `true` if no root could be resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root_nodes.is_empty()
    }
}

/// Minimal graph-read operations needed by weight propagation and highlighting.
///
/// # Method Categories
///
/// - **Enumeration**: `all_nodes`, `all_edges`, `merged_edges`, `parent_nodes`
/// - **Lookup**: `node`, `parent_of`, `children_of`
/// - **Adjacency**: `first_neighbors`
pub trait GraphQueryPort {
    /// All nodes, in a stable order.
    fn all_nodes(&self) -> Vec<&Node>;

    /// All edges, in a stable order.
    fn all_edges(&self) -> Vec<&Edge>;

    /// All merged edges, in a stable order.
    fn merged_edges(&self) -> Vec<MergedEdge>;

    /// Look up a node by id.
    fn node(&self, id: &NodeId) -> Option<&Node>;

    /// Direct children of a node. Empty for leaves and unknown ids.
    fn children_of(&self, id: &NodeId) -> Vec<&Node>;

    /// First-degree neighbors of a node set.
    ///
    /// When `include_merged` is `false`, [`FirstNeighbors::merged_edges`] is empty.
    fn first_neighbors(&self, ids: &[NodeId], include_merged: bool) -> FirstNeighbors<'_>;

    /// Owning parent of a node, or `None` for top-level and unknown nodes.
    fn parent_of(&self, id: &NodeId) -> Option<&Node> {
        self.node(id)
            .and_then(|node| node.parent.as_ref())
            .and_then(|parent| self.node(parent))
    }

    /// Nodes owning at least one child.
    fn parent_nodes(&self) -> Vec<&Node> {
        self.all_nodes()
            .into_iter()
            .filter(|node| !self.children_of(&node.id).is_empty())
            .collect()
    }
}

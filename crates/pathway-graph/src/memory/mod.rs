//! In-memory compound graph backed by petgraph.
//!
//! [`PathwayGraph`] keeps nodes and edges of a pathway diagram in a
//! `petgraph::stable_graph::StableDiGraph` arena, with `HashMap` indexes from
//! ids to arena slots. Stable indices survive node and edge removal, so
//! deleting part of a diagram never invalidates the rest of the indexes.
//!
//! # Graph Representation and Edge Direction Convention
//!
//! Arena edges carry a [`Relation`]:
//!
//! - **Interaction**: an SBGN arc, stored from its source to its target.
//!   Neighbor queries walk interactions in both directions.
//! - **Containment**: stored from **child -> parent**. A node's parent is its
//!   single outgoing containment edge; its children are its incoming ones.
//!
//! The containment edges form a forest. Construction rejects any parent link
//! that would close a cycle, so traversals over a `PathwayGraph` always
//! terminate.
//!
//! # Enumeration Order
//!
//! Nodes and edges are enumerated in arena order, which is insertion order
//! until a removal frees slots for reuse. Children are listed in arena order
//! as well, and merged edges are sorted by id.

mod containment;
mod neighbors;
mod trait_impl;

use crate::domain::{Edge, EdgeId, Node, NodeId};
use crate::error::{Error, Result};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use std::collections::{HashMap, HashSet};

/// Kind of an arena edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Relation {
    /// SBGN arc between two nodes
    Interaction(Edge),

    /// Child -> parent link
    Containment,
}

/// Summary of a [`PathwayGraph::remove_nodes`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removal {
    /// Nodes removed, including descendants of the named nodes
    pub nodes: usize,

    /// Edges removed because an endpoint was removed
    pub edges: usize,
}

/// In-memory pathway diagram implementing [`GraphQueryPort`](crate::GraphQueryPort).
#[derive(Debug, Clone, Default)]
pub struct PathwayGraph {
    /// Node and edge arena.
    ///
    /// Interaction edges point source -> target, containment edges child -> parent.
    pub(crate) graph: StableDiGraph<Node, Relation>,

    /// Mapping from node id to arena index.
    pub(crate) node_map: HashMap<NodeId, NodeIndex>,

    /// Mapping from edge id to arena index. Holds interaction edges only.
    pub(crate) edge_map: HashMap<EdgeId, EdgeIndex>,
}

impl PathwayGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from unordered node and edge lists.
    ///
    /// Nodes may appear before their parents; parent links are resolved once
    /// every node is known.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateNode` / `Error::DuplicateEdge` on repeated ids
    /// - `Error::UnknownNode` if a parent link or edge endpoint is missing
    /// - `Error::InvalidContainer` if a node is its own parent
    /// - `Error::ContainmentCycle` if parent links do not form a forest
    pub fn from_parts(
        nodes: impl IntoIterator<Item = Node>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        let mut pending = Vec::new();

        for node in nodes {
            if graph.node_map.contains_key(&node.id) {
                return Err(Error::DuplicateNode(node.id));
            }
            if let Some(parent) = &node.parent {
                pending.push((node.id.clone(), parent.clone()));
            }
            let id = node.id.clone();
            let idx = graph.graph.add_node(node);
            graph.node_map.insert(id, idx);
        }

        for (child, parent) in pending {
            graph.link_parent(&child, &parent)?;
        }

        for edge in edges {
            graph.add_edge(edge)?;
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built pathway graph"
        );
        Ok(graph)
    }

    /// Add a single node.
    ///
    /// The node's parent, if any, must already be in the graph.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateNode` if the id is taken
    /// - `Error::UnknownNode` if the parent does not exist
    /// - `Error::InvalidContainer` if the node names itself as parent
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.node_map.contains_key(&node.id) {
            return Err(Error::DuplicateNode(node.id));
        }
        if let Some(parent) = &node.parent {
            if parent == &node.id {
                return Err(Error::InvalidContainer(node.id));
            }
            if !self.node_map.contains_key(parent) {
                return Err(Error::UnknownNode(parent.clone()));
            }
        }

        let link = node.parent.clone().map(|parent| (node.id.clone(), parent));
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_map.insert(id, idx);

        if let Some((child, parent)) = link {
            self.link_parent(&child, &parent)?;
        }
        Ok(())
    }

    /// Add a single edge between existing nodes.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateEdge` if the id is taken
    /// - `Error::UnknownNode` if either endpoint does not exist
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if self.edge_map.contains_key(&edge.id) {
            return Err(Error::DuplicateEdge(edge.id));
        }
        let source = *self
            .node_map
            .get(&edge.source)
            .ok_or_else(|| Error::UnknownNode(edge.source.clone()))?;
        let target = *self
            .node_map
            .get(&edge.target)
            .ok_or_else(|| Error::UnknownNode(edge.target.clone()))?;

        let id = edge.id.clone();
        let idx = self
            .graph
            .add_edge(source, target, Relation::Interaction(edge));
        self.edge_map.insert(id, idx);
        Ok(())
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_map.len()
    }

    /// Number of edges, not counting containment links.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_map.len()
    }

    /// Returns `true` if a node with this id exists.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Look up an edge by id.
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        let idx = self.edge_map.get(id)?;
        match self.graph.edge_weight(*idx)? {
            Relation::Interaction(edge) => Some(edge),
            Relation::Containment => None,
        }
    }

    /// Ancestors of a node, parent first and root last.
    ///
    /// Empty for top-level and unknown nodes.
    #[must_use]
    pub fn ancestors(&self, id: &NodeId) -> Vec<&Node> {
        let Some(&start) = self.node_map.get(id) else {
            return Vec::new();
        };
        self.ancestor_indices(start)
            .into_iter()
            .map(|idx| &self.graph[idx])
            .collect()
    }

    /// Remove nodes together with their descendants and incident edges.
    ///
    /// Ids that are not in the graph are skipped, so a selection captured
    /// before an earlier removal can be passed as-is.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> Removal {
        let mut doomed: Vec<NodeIndex> = Vec::new();
        let mut seen = HashSet::new();

        for id in ids {
            let Some(&idx) = self.node_map.get(id) else {
                tracing::debug!(node = %id, "Skipping removal of unknown node");
                continue;
            };
            for member in self.subtree_indices(idx) {
                if seen.insert(member) {
                    doomed.push(member);
                }
            }
        }

        let mut removal = Removal::default();
        for idx in doomed {
            let incident: Vec<EdgeId> = self
                .interaction_edges(idx)
                .into_iter()
                .filter_map(|edge_idx| match &self.graph[edge_idx] {
                    Relation::Interaction(edge) => Some(edge.id.clone()),
                    Relation::Containment => None,
                })
                .collect();
            for edge_id in incident {
                if self.edge_map.remove(&edge_id).is_some() {
                    removal.edges += 1;
                }
            }

            // Incident arena edges go with the node.
            if let Some(node) = self.graph.remove_node(idx) {
                self.node_map.remove(&node.id);
                removal.nodes += 1;
            }
        }

        tracing::debug!(
            nodes = removal.nodes,
            edges = removal.edges,
            "Removed nodes from pathway graph"
        );
        removal
    }

    /// Remove edges by id, returning how many were removed.
    ///
    /// Unknown ids are skipped.
    pub fn remove_edges(&mut self, ids: &[EdgeId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if let Some(idx) = self.edge_map.remove(id) {
                self.graph.remove_edge(idx);
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GlyphClass;
    use crate::port::GraphQueryPort;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn compartment_with_complex() -> PathwayGraph {
        PathwayGraph::from_parts(
            vec![
                Node::new("a", GlyphClass::Macromolecule).with_parent("x"),
                Node::new("b", GlyphClass::Macromolecule).with_parent("x"),
                Node::new("x", GlyphClass::Complex).with_parent("c"),
                Node::new("c", GlyphClass::Compartment),
                Node::new("p", GlyphClass::Process),
                Node::new("d", GlyphClass::SimpleChemical),
            ],
            vec![Edge::new("e1", "p", "a"), Edge::new("e2", "d", "p")],
        )
        .unwrap()
    }

    #[test]
    fn test_from_parts_resolves_parents_in_any_order() {
        let graph = compartment_with_complex();

        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.parent_of(&id("a")).unwrap().id, id("x"));
        assert_eq!(graph.parent_of(&id("x")).unwrap().id, id("c"));
        assert!(graph.parent_of(&id("c")).is_none());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = PathwayGraph::from_parts(
            vec![
                Node::new("a", GlyphClass::Macromolecule),
                Node::new("a", GlyphClass::SimpleChemical),
            ],
            vec![],
        );
        assert_eq!(result.unwrap_err(), Error::DuplicateNode(id("a")));
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut graph = compartment_with_complex();
        let err = graph.add_edge(Edge::new("e1", "a", "b")).unwrap_err();
        assert_eq!(err, Error::DuplicateEdge(EdgeId::from("e1")));
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let mut graph = compartment_with_complex();
        let err = graph.add_edge(Edge::new("e9", "a", "ghost")).unwrap_err();
        assert_eq!(err, Error::UnknownNode(id("ghost")));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut graph = PathwayGraph::new();
        let err = graph
            .add_node(Node::new("a", GlyphClass::Macromolecule).with_parent("nowhere"))
            .unwrap_err();
        assert_eq!(err, Error::UnknownNode(id("nowhere")));
    }

    #[test]
    fn test_self_containment_rejected() {
        let result = PathwayGraph::from_parts(
            vec![Node::new("x", GlyphClass::Complex).with_parent("x")],
            vec![],
        );
        assert_eq!(result.unwrap_err(), Error::InvalidContainer(id("x")));
    }

    #[test]
    fn test_containment_cycle_rejected() {
        let result = PathwayGraph::from_parts(
            vec![
                Node::new("x", GlyphClass::Complex).with_parent("y"),
                Node::new("y", GlyphClass::Complex).with_parent("z"),
                Node::new("z", GlyphClass::Compartment).with_parent("x"),
            ],
            vec![],
        );
        assert!(matches!(result, Err(Error::ContainmentCycle(_))));
    }

    #[test]
    fn test_ancestors_parent_first() {
        let graph = compartment_with_complex();
        let ancestors: Vec<&str> = graph
            .ancestors(&id("a"))
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ancestors, vec!["x", "c"]);
        assert!(graph.ancestors(&id("ghost")).is_empty());
    }

    #[test]
    fn test_remove_nodes_takes_descendants_and_edges() {
        let mut graph = compartment_with_complex();

        let removal = graph.remove_nodes(&[id("x"), id("ghost")]);

        assert_eq!(removal, Removal { nodes: 3, edges: 1 });
        assert!(!graph.contains_node(&id("a")));
        assert!(!graph.contains_node(&id("b")));
        assert!(graph.contains_node(&id("c")));
        assert!(graph.children_of(&id("c")).is_empty());
        assert!(graph.edge(&EdgeId::from("e1")).is_none());
        assert!(graph.edge(&EdgeId::from("e2")).is_some());
    }

    #[test]
    fn test_remove_nodes_overlapping_selection() {
        let mut graph = compartment_with_complex();
        let removal = graph.remove_nodes(&[id("a"), id("x"), id("c")]);
        assert_eq!(removal.nodes, 4);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_remove_edges_skips_unknown() {
        let mut graph = compartment_with_complex();
        let removed = graph.remove_edges(&[EdgeId::from("e2"), EdgeId::from("missing")]);
        assert_eq!(removed, 1);
        assert_eq!(graph.edge_count(), 1);
    }
}

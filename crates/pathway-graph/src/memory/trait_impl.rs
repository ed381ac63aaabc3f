//! [`GraphQueryPort`] implementation for [`PathwayGraph`].

use super::{PathwayGraph, Relation};
use crate::domain::{Edge, MergedEdge, Node, NodeId};
use crate::port::{FirstNeighbors, GraphQueryPort};

impl GraphQueryPort for PathwayGraph {
    fn all_nodes(&self) -> Vec<&Node> {
        self.graph
            .node_indices()
            .map(|idx| &self.graph[idx])
            .collect()
    }

    fn all_edges(&self) -> Vec<&Edge> {
        self.graph
            .edge_indices()
            .filter_map(|idx| match &self.graph[idx] {
                Relation::Interaction(edge) => Some(edge),
                Relation::Containment => None,
            })
            .collect()
    }

    fn merged_edges(&self) -> Vec<MergedEdge> {
        self.merged_edges_impl()
    }

    fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_map.get(id).map(|&idx| &self.graph[idx])
    }

    fn children_of(&self, id: &NodeId) -> Vec<&Node> {
        let Some(&idx) = self.node_map.get(id) else {
            return Vec::new();
        };
        self.children_indices(idx)
            .into_iter()
            .map(|child| &self.graph[child])
            .collect()
    }

    fn first_neighbors(&self, ids: &[NodeId], include_merged: bool) -> FirstNeighbors<'_> {
        self.first_neighbors_impl(ids, include_merged)
    }

    fn parent_of(&self, id: &NodeId) -> Option<&Node> {
        let idx = self.node_map.get(id)?;
        self.parent_index(*idx).map(|parent| &self.graph[parent])
    }

    fn parent_nodes(&self) -> Vec<&Node> {
        self.graph
            .node_indices()
            .filter(|&idx| !self.children_indices(idx).is_empty())
            .map(|idx| &self.graph[idx])
            .collect()
    }
}

//! Adjacency queries over interaction edges.
//!
//! Interactions are stored directed (source -> target) but are walked in
//! both directions here; containment edges are ignored.

use super::{PathwayGraph, Relation};
use crate::domain::{Edge, EdgeId, MergedEdge, NodeId};
use crate::port::FirstNeighbors;
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, HashSet};

impl PathwayGraph {
    /// Interaction edges touching a node, in arena order, each listed once.
    pub(crate) fn interaction_edges(&self, idx: NodeIndex) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .filter(|edge| matches!(edge.weight(), Relation::Interaction(_)))
            .map(|edge| edge.id())
            .collect();
        edges.sort_unstable();
        // Self-loops show up in both directions.
        edges.dedup();
        edges
    }

    fn interaction(&self, idx: EdgeIndex) -> Option<&Edge> {
        match self.graph.edge_weight(idx)? {
            Relation::Interaction(edge) => Some(edge),
            Relation::Containment => None,
        }
    }

    pub(super) fn first_neighbors_impl(
        &self,
        ids: &[NodeId],
        include_merged: bool,
    ) -> FirstNeighbors<'_> {
        let mut roots: Vec<NodeIndex> = Vec::new();
        let mut root_set = HashSet::new();
        for id in ids {
            match self.node_map.get(id) {
                Some(&idx) => {
                    if root_set.insert(idx) {
                        roots.push(idx);
                    }
                }
                None => tracing::debug!(node = %id, "Skipping unknown node in neighbor query"),
            }
        }

        let mut result = FirstNeighbors {
            root_nodes: roots.iter().map(|&idx| &self.graph[idx]).collect(),
            ..FirstNeighbors::default()
        };

        let mut seen_edges = HashSet::new();
        let mut seen_neighbors = HashSet::new();
        for &root in &roots {
            for edge_idx in self.interaction_edges(root) {
                if !seen_edges.insert(edge_idx) {
                    continue;
                }
                let Some(edge) = self.interaction(edge_idx) else {
                    continue;
                };
                result.edges.push(edge);

                let Some((a, b)) = self.graph.edge_endpoints(edge_idx) else {
                    continue;
                };
                let other = if a == root { b } else { a };
                if !root_set.contains(&other) && seen_neighbors.insert(other) {
                    result.neighbors.push(&self.graph[other]);
                }
            }
        }

        if include_merged {
            let root_ids: HashSet<&NodeId> =
                roots.iter().map(|&idx| &self.graph[idx].id).collect();
            result.merged_edges = self
                .merged_edges_impl()
                .into_iter()
                .filter(|merged| {
                    root_ids.contains(&merged.source) || root_ids.contains(&merged.target)
                })
                .collect();
        }

        result
    }

    /// Collapse parallel interactions into merged edges, sorted by id.
    pub(super) fn merged_edges_impl(&self) -> Vec<MergedEdge> {
        let mut groups: BTreeMap<(&NodeId, &NodeId), Vec<EdgeId>> = BTreeMap::new();

        for edge_idx in self.graph.edge_indices() {
            let Some(edge) = self.interaction(edge_idx) else {
                continue;
            };
            let pair = if edge.source <= edge.target {
                (&edge.source, &edge.target)
            } else {
                (&edge.target, &edge.source)
            };
            groups.entry(pair).or_default().push(edge.id.clone());
        }

        let mut merged: Vec<MergedEdge> = groups
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|((lo, hi), members)| MergedEdge {
                id: MergedEdge::id_for(lo, hi),
                source: lo.clone(),
                target: hi.clone(),
                members,
            })
            .collect();
        merged.sort_by(|a, b| a.id.cmp(&b.id));
        merged
    }
}

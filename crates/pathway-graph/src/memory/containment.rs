//! Containment forest operations.
//!
//! Containment edges point **child -> parent**:
//! - `Direction::Outgoing` from a node finds its parent
//! - `Direction::Incoming` to a node finds its children

use super::{PathwayGraph, Relation};
use crate::domain::NodeId;
use crate::error::{Error, Result};
use petgraph::Direction;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::{HashSet, VecDeque};

impl PathwayGraph {
    /// Record `parent` as the owner of `child`.
    ///
    /// Both nodes must already be in the arena.
    pub(super) fn link_parent(&mut self, child: &NodeId, parent: &NodeId) -> Result<()> {
        if child == parent {
            return Err(Error::InvalidContainer(child.clone()));
        }
        let child_idx = *self
            .node_map
            .get(child)
            .ok_or_else(|| Error::UnknownNode(child.clone()))?;
        let parent_idx = *self
            .node_map
            .get(parent)
            .ok_or_else(|| Error::UnknownNode(parent.clone()))?;

        // Linking closes a cycle exactly when the child is already above the parent.
        if self.ancestor_indices(parent_idx).contains(&child_idx) {
            return Err(Error::ContainmentCycle(child.clone()));
        }

        self.graph
            .add_edge(child_idx, parent_idx, Relation::Containment);
        Ok(())
    }

    /// Arena index of a node's parent.
    pub(crate) fn parent_index(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .find(|edge| matches!(edge.weight(), Relation::Containment))
            .map(|edge| edge.target())
    }

    /// Arena indices of a node's children, in arena order.
    pub(crate) fn children_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .filter(|edge| matches!(edge.weight(), Relation::Containment))
            .map(|edge| edge.source())
            .collect();
        children.sort_unstable();
        children
    }

    /// Arena indices of a node's ancestors, parent first.
    pub(crate) fn ancestor_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut ancestors = Vec::new();
        let mut visited = HashSet::from([idx]);
        let mut current = idx;

        while let Some(parent) = self.parent_index(current) {
            if !visited.insert(parent) {
                break;
            }
            ancestors.push(parent);
            current = parent;
        }
        ancestors
    }

    /// The node and all its descendants, breadth-first.
    pub(crate) fn subtree_indices(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut result = vec![root];
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for child in self.children_indices(current) {
                if visited.insert(child) {
                    result.push(child);
                    queue.push_back(child);
                }
            }
        }
        result
    }
}

//! Per-node relevance weights.

use pathway_graph::NodeId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Weight domain used by highlighting.
pub type Weight = u32;

/// Weight of a node outside the selection.
pub const UNSELECTED: Weight = 0;

/// Weight of a selected node, and of every node propagation deems relevant to it.
pub const SELECTED: Weight = 1;

/// Mapping from node id to weight.
///
/// Missing entries read as `W::default()`. Keys are kept sorted so that two
/// maps with the same content compare, iterate and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeightMap<W = Weight> {
    weights: BTreeMap<NodeId, W>,
}

impl<W: Copy + Ord + Default> WeightMap<W> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Weight of a node; zero when unset.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> W {
        self.weights.get(id).copied().unwrap_or_default()
    }

    /// Returns `true` if the node has an explicit entry.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.weights.contains_key(id)
    }

    /// Set a node's weight, replacing any previous value.
    pub fn set(&mut self, id: NodeId, weight: W) {
        self.weights.insert(id, weight);
    }

    /// Raise a node's weight to at least `weight`.
    ///
    /// Returns `true` if the stored weight changed.
    pub fn raise(&mut self, id: &NodeId, weight: W) -> bool {
        match self.weights.get_mut(id) {
            Some(current) if *current < weight => {
                *current = weight;
                true
            }
            Some(_) => false,
            None => {
                self.weights.insert(id.clone(), weight);
                weight > W::default()
            }
        }
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if there are no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, W)> {
        self.weights.iter().map(|(id, weight)| (id, *weight))
    }

    /// Ids whose weight equals `weight`, in id order.
    #[must_use]
    pub fn nodes_at(&self, weight: W) -> Vec<&NodeId> {
        self.iter()
            .filter(|(_, w)| *w == weight)
            .map(|(id, _)| id)
            .collect()
    }
}

impl<W: Copy + Ord + Default> FromIterator<(NodeId, W)> for WeightMap<W> {
    fn from_iter<I: IntoIterator<Item = (NodeId, W)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

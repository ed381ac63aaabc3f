//! Cumulative highlight tracking.
//!
//! A [`HighlightTracker`] owns the set of highlighted nodes and edges. Two
//! modes add to it:
//!
//! - **Neighbors**: the selection, its first neighbors, and every edge (and
//!   merged edge) incident to the selection.
//! - **Processes**: every node [`propagate`] weighs at [`SELECTED`], and every
//!   edge whose endpoints both are.
//!
//! Each call unions its result into the existing state and pushes the
//! re-projected [`StyleBypass`] to a [`StyleSink`]. Only
//! [`HighlightTracker::remove_highlights`] shrinks the state.

use crate::config::HighlightConfig;
use crate::propagate::propagate;
use crate::style::{StyleBypass, StyleSink, label_sizes};
use crate::weights::{SELECTED, WeightMap};
use pathway_graph::{EdgeId, GraphQueryPort, NodeId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

/// Highlighted node and edge ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    nodes: BTreeSet<NodeId>,
    edges: BTreeSet<EdgeId>,
}

impl HighlightState {
    /// Highlighted node ids, sorted.
    #[must_use]
    pub fn nodes(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }

    /// Highlighted edge and merged-edge ids, sorted.
    #[must_use]
    pub fn edges(&self) -> &BTreeSet<EdgeId> {
        &self.edges
    }

    /// Returns `true` if the node is highlighted.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    /// Returns `true` if the edge is highlighted.
    #[must_use]
    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains(id)
    }

    /// Returns `true` if nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Add nodes and edges, reporting how many were new.
    pub fn union<N, E>(&mut self, nodes: N, edges: E) -> HighlightDelta
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = EdgeId>,
    {
        HighlightDelta {
            added_nodes: nodes.into_iter().filter(|id| self.nodes.insert(id.clone())).count(),
            added_edges: edges.into_iter().filter(|id| self.edges.insert(id.clone())).count(),
        }
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

/// Growth of a [`HighlightState`] caused by one highlight call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightDelta {
    /// Nodes that were not highlighted before
    pub added_nodes: usize,

    /// Edges that were not highlighted before
    pub added_edges: usize,
}

impl HighlightDelta {
    /// Returns `true` if the call added nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added_nodes == 0 && self.added_edges == 0
    }
}

/// Owner of the persistent highlight state.
#[derive(Debug, Clone, Default)]
pub struct HighlightTracker {
    state: HighlightState,
    config: HighlightConfig,
}

/// A tracker shared between threads.
///
/// Both highlight modes read, extend and write back the state, so concurrent
/// callers must go through the mutex.
pub type SharedHighlightTracker = Arc<Mutex<HighlightTracker>>;

/// Create a [`SharedHighlightTracker`] with an empty state.
#[must_use]
pub fn new_shared_tracker(config: HighlightConfig) -> SharedHighlightTracker {
    Arc::new(Mutex::new(HighlightTracker::new(config)))
}

impl HighlightTracker {
    /// Create a tracker with an empty state.
    #[must_use]
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            state: HighlightState::default(),
            config,
        }
    }

    /// Create a tracker using [`HighlightConfig::default`].
    #[must_use]
    pub fn with_default_config() -> Self {
        Self::default()
    }

    /// Current highlight state.
    #[must_use]
    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Highlight the selection together with its first neighbors.
    ///
    /// Edges incident to the selection and the merged edges representing
    /// them are highlighted too. Ids no longer in the graph are skipped; if
    /// nothing remains the call is a no-op and the sink is not touched.
    pub fn highlight_neighbors<G, S>(
        &mut self,
        graph: &G,
        selection: &[NodeId],
        sink: &mut S,
    ) -> HighlightDelta
    where
        G: GraphQueryPort + ?Sized,
        S: StyleSink + ?Sized,
    {
        let selection = resolve(graph, selection);
        if selection.is_empty() {
            return HighlightDelta::default();
        }

        let found = graph.first_neighbors(&selection, true);
        let nodes = found
            .root_nodes
            .iter()
            .chain(&found.neighbors)
            .map(|node| node.id.clone());
        let edges = found
            .edges
            .iter()
            .map(|edge| edge.id.clone())
            .chain(found.merged_edges.into_iter().map(|merged| merged.id));
        let delta = self.state.union(nodes, edges);

        tracing::debug!(
            selected = selection.len(),
            added_nodes = delta.added_nodes,
            added_edges = delta.added_edges,
            "Highlighted neighbors"
        );
        sink.apply(&self.style_for(graph));
        delta
    }

    /// Highlight every node relevant to the selection, as decided by
    /// [`propagate`], and the edges running between relevant nodes.
    ///
    /// Ids no longer in the graph are skipped; if nothing remains the call is
    /// a no-op and the sink is not touched.
    pub fn highlight_processes<G, S>(
        &mut self,
        graph: &G,
        selection: &[NodeId],
        sink: &mut S,
    ) -> HighlightDelta
    where
        G: GraphQueryPort + ?Sized,
        S: StyleSink + ?Sized,
    {
        let selection = resolve(graph, selection);
        if selection.is_empty() {
            return HighlightDelta::default();
        }

        let initial: WeightMap = selection.iter().map(|id| (id.clone(), SELECTED)).collect();
        let weights = propagate(&initial, graph);
        let relevant = |id: &NodeId| weights.get(id) == SELECTED;

        let nodes = weights.nodes_at(SELECTED).into_iter().cloned();
        let edges = graph
            .all_edges()
            .into_iter()
            .filter(|edge| relevant(&edge.source) && relevant(&edge.target))
            .map(|edge| edge.id.clone())
            .chain(
                graph
                    .merged_edges()
                    .into_iter()
                    .filter(|merged| relevant(&merged.source) && relevant(&merged.target))
                    .map(|merged| merged.id),
            );
        let delta = self.state.union(nodes, edges);

        tracing::debug!(
            selected = selection.len(),
            added_nodes = delta.added_nodes,
            added_edges = delta.added_edges,
            "Highlighted connected processes"
        );
        sink.apply(&self.style_for(graph));
        delta
    }

    /// Project the current state onto `graph`.
    #[must_use]
    pub fn style_for<G>(&self, graph: &G) -> StyleBypass
    where
        G: GraphQueryPort + ?Sized,
    {
        StyleBypass::project(graph, &self.state, &self.config.emphasis)
    }

    /// Label font size for every node of `graph`, at the configured scale.
    #[must_use]
    pub fn label_sizes<G>(&self, graph: &G) -> BTreeMap<NodeId, u32>
    where
        G: GraphQueryPort + ?Sized,
    {
        label_sizes(graph, self.config.label_scale)
    }

    /// Empty the state and restore the renderer's default style.
    pub fn remove_highlights<S>(&mut self, sink: &mut S)
    where
        S: StyleSink + ?Sized,
    {
        let nodes = self.state.nodes.len();
        let edges = self.state.edges.len();
        self.state.clear();
        sink.clear();
        tracing::info!(nodes, edges, "Removed highlights");
    }
}

/// Selection ids that still name a node, in selection order, without repeats.
fn resolve<G>(graph: &G, selection: &[NodeId]) -> Vec<NodeId>
where
    G: GraphQueryPort + ?Sized,
{
    let mut seen = BTreeSet::new();
    let mut resolved = Vec::with_capacity(selection.len());
    for id in selection {
        if graph.node(id).is_none() {
            tracing::debug!(node = %id, "Skipping stale selection id");
            continue;
        }
        if seen.insert(id) {
            resolved.push(id.clone());
        }
    }
    resolved
}

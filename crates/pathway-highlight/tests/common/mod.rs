//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use pathway_graph::{Edge, GlyphClass, Node, NodeId, PathwayGraph};
use pathway_highlight::{SELECTED, StyleBypass, StyleSink, WeightMap};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::HashSet;

/// Route `tracing` output through the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ids<'a>(nodes: impl IntoIterator<Item = &'a NodeId>) -> Vec<&'a str> {
    nodes.into_iter().map(NodeId::as_str).collect()
}

/// Compartment `C` holds complex `X` with components `A` and `B`.
/// Process `P` joins `A` with `D`, which sits outside every container.
pub fn complex_scenario() -> PathwayGraph {
    PathwayGraph::from_parts(
        vec![
            Node::new("C", GlyphClass::Compartment),
            Node::new("X", GlyphClass::Complex).with_parent("C"),
            Node::new("A", GlyphClass::Macromolecule).with_parent("X"),
            Node::new("B", GlyphClass::Macromolecule).with_parent("X"),
            Node::new("P", GlyphClass::Process),
            Node::new("D", GlyphClass::SimpleChemical),
        ],
        vec![Edge::new("pa", "P", "A"), Edge::new("dp", "D", "P")],
    )
    .unwrap()
}

/// Two unrelated reactions sharing nothing, plus a pair of parallel edges
/// that collapse into a merged edge.
///
/// ```text
/// glc -> hk -> g6p        f6p -> pfk -> f16bp
///                          atp => pfk (twice)
/// ```
pub fn two_reactions() -> PathwayGraph {
    PathwayGraph::from_parts(
        vec![
            Node::new("cytosol", GlyphClass::Compartment),
            Node::new("glc", GlyphClass::SimpleChemical).with_parent("cytosol"),
            Node::new("hk", GlyphClass::Process).with_parent("cytosol"),
            Node::new("g6p", GlyphClass::SimpleChemical).with_parent("cytosol"),
            Node::new("f6p", GlyphClass::SimpleChemical),
            Node::new("pfk", GlyphClass::Process),
            Node::new("f16bp", GlyphClass::SimpleChemical),
            Node::new("atp", GlyphClass::SimpleChemical),
        ],
        vec![
            Edge::new("c_glc", "glc", "hk"),
            Edge::new("p_g6p", "hk", "g6p"),
            Edge::new("c_f6p", "f6p", "pfk"),
            Edge::new("p_f16bp", "pfk", "f16bp"),
            Edge::new("c_atp", "atp", "pfk"),
            Edge::new("mod_atp", "atp", "pfk"),
        ],
    )
    .unwrap()
}

/// Sink that keeps every instruction it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub applied: Vec<StyleBypass>,
    pub clears: usize,
}

impl RecordingSink {
    pub fn last(&self) -> Option<&StyleBypass> {
        self.applied.last()
    }
}

impl StyleSink for RecordingSink {
    fn apply(&mut self, bypass: &StyleBypass) {
        self.applied.push(bypass.clone());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

/// Blueprint of a random containment forest with interaction edges.
///
/// Node `i` is named `n{i}`; its parent, if any, has a smaller index, so the
/// containment relation is always a forest.
#[derive(Debug, Clone)]
pub struct ForestPlan {
    pub glyphs: Vec<GlyphClass>,
    pub parents: Vec<Option<usize>>,
    pub edges: Vec<(usize, usize)>,
    pub selected: Vec<bool>,
}

fn node_id(i: usize) -> NodeId {
    NodeId::new(format!("n{i}"))
}

impl ForestPlan {
    pub fn graph(&self) -> PathwayGraph {
        let nodes = self.glyphs.iter().enumerate().map(|(i, glyph)| {
            let node = Node::new(node_id(i), *glyph);
            match self.parents[i] {
                Some(parent) => node.with_parent(node_id(parent)),
                None => node,
            }
        });
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(k, (a, b))| Edge::new(format!("e{k}"), node_id(*a), node_id(*b)));
        PathwayGraph::from_parts(nodes, edges).unwrap()
    }

    pub fn initial(&self) -> WeightMap {
        self.selected
            .iter()
            .enumerate()
            .filter(|(_, selected)| **selected)
            .map(|(i, _)| (node_id(i), SELECTED))
            .collect()
    }

    fn is_process(&self, i: usize) -> bool {
        self.glyphs[i] == GlyphClass::Process
    }

    /// Keep processes out of complexes, never let a process contain
    /// anything, and drop edges joining two processes.
    ///
    /// On such graphs one pass already closes every process over its
    /// participants.
    #[must_use]
    pub fn with_free_processes(mut self) -> Self {
        for i in 0..self.glyphs.len() {
            let Some(parent) = self.parents[i] else {
                continue;
            };
            let inside_complex = self.glyphs[parent] == GlyphClass::Complex;
            if self.is_process(parent) || (self.is_process(i) && inside_complex) {
                self.parents[i] = None;
            }
        }
        self.drop_process_links();
        self
    }

    /// Remove all containment, drop edges joining two processes, and let
    /// every participant take part in at most one process.
    ///
    /// On such graphs a second pass finds nothing new.
    #[must_use]
    pub fn flattened(mut self) -> Self {
        self.parents.iter_mut().for_each(|parent| *parent = None);
        self.drop_process_links();

        let mut owner: Vec<Option<usize>> = vec![None; self.glyphs.len()];
        let glyphs = self.glyphs.clone();
        self.edges.retain(|&(a, b)| {
            let (process, participant) = match (
                glyphs[a] == GlyphClass::Process,
                glyphs[b] == GlyphClass::Process,
            ) {
                (true, false) => (a, b),
                (false, true) => (b, a),
                _ => return true,
            };
            match owner[participant] {
                Some(existing) => existing == process,
                None => {
                    owner[participant] = Some(process);
                    true
                }
            }
        });
        self
    }

    fn drop_process_links(&mut self) {
        let glyphs = &self.glyphs;
        self.edges.retain(|&(a, b)| {
            !(glyphs[a] == GlyphClass::Process && glyphs[b] == GlyphClass::Process)
        });
    }
}

fn arb_glyph() -> impl Strategy<Value = GlyphClass> {
    prop_oneof![
        3 => Just(GlyphClass::Process),
        3 => Just(GlyphClass::Macromolecule),
        2 => Just(GlyphClass::SimpleChemical),
        2 => Just(GlyphClass::Complex),
        1 => Just(GlyphClass::Compartment),
        1 => Just(GlyphClass::Association),
    ]
}

/// Random forest of up to `max_nodes` nodes.
pub fn arb_forest(max_nodes: usize) -> impl Strategy<Value = ForestPlan> {
    (1..=max_nodes)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(arb_glyph(), n),
                prop::collection::vec(prop::option::of(any::<Index>()), n),
                prop::collection::vec((0..n, 0..n), 0..=2 * n),
                prop::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(|(glyphs, parent_picks, edges, selected)| {
            let parents = parent_picks
                .iter()
                .enumerate()
                .map(|(i, pick)| match pick {
                    Some(index) if i > 0 => Some(index.index(i)),
                    _ => None,
                })
                .collect();
            let edges = edges.into_iter().filter(|(a, b)| a != b).collect();
            ForestPlan {
                glyphs,
                parents,
                edges,
                selected,
            }
        })
}

/// Every node below `id`, at any depth.
pub fn descendants(graph: &PathwayGraph, id: &NodeId) -> Vec<NodeId> {
    use pathway_graph::GraphQueryPort;

    let mut found = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![id.clone()];
    while let Some(current) = stack.pop() {
        for child in graph.children_of(&current) {
            if seen.insert(child.id.clone()) {
                found.push(child.id.clone());
                stack.push(child.id.clone());
            }
        }
    }
    found
}

//! Relevance weight propagation.
//!
//! Given initial weights (typically 1 on the user's selection and 0
//! elsewhere), [`propagate`] computes which part of a pathway diagram is
//! relevant to the selection. The result satisfies five display principles:
//!
//! 1. A node with a positive weight is displayed.
//! 2. A displayed non-process node pulls in every process it takes part in.
//! 3. A displayed process pulls in all of its substrates, products and effectors.
//! 4. A compartment or complex is displayed when any of its descendants is.
//! 5. A complex is always displayed as a whole, with all of its components.
//!
//! # Algorithm
//!
//! Five phases run in strict order, each reading the previous phase's output:
//!
//! 1. **Classify**: collect processes and leaves, and record each node's parent.
//! 2. **Seed processes**: raise every process to the largest weight among its
//!    first neighbors.
//! 3. **Push from processes**: raise every neighbor of a process to the
//!    process weight.
//! 4. **Raise ancestors**: walk from every leaf to its root, raising each
//!    ancestor to at least the weight carried up from below.
//! 5. **Broadcast complexes**: starting from the outermost complexes, overwrite
//!    every child with its complex's weight, descending generation by
//!    generation into nested complexes.
//!
//! Phases 2 to 4 only take maxima. Phase 5 assigns, so a complex is
//! all-or-nothing; after phase 4 every complex already weighs at least as
//! much as any of its descendants, so on a forest the assignment never lowers
//! a weight.
//!
//! A single call expands one reaction hop. Feeding the output back in can
//! reach further when a participant raised by phases 3 to 5 also takes part
//! in another process.
//!
//! # Malformed Graphs
//!
//! The parent relation must be a forest. If a [`GraphQueryPort`] implementation
//! reports a cycle anyway, both containment walks stop at the first repeated
//! node and log a warning instead of looping.

use crate::weights::WeightMap;
use pathway_graph::{GlyphClass, GraphQueryPort, Node, NodeId};
use std::collections::{HashMap, HashSet};

/// Nodes grouped by the role they play in propagation.
struct Classification<'g> {
    processes: Vec<&'g Node>,
    leaves: Vec<&'g Node>,
    parent_of: HashMap<&'g NodeId, &'g NodeId>,
}

/// Propagate relevance weights over a pathway graph.
///
/// The result has one entry per graph node. Nodes missing from `initial`
/// start at zero; entries of `initial` that are not in the graph are ignored.
/// The graph is only read, and the same inputs always produce the same map.
pub fn propagate<W, G>(initial: &WeightMap<W>, graph: &G) -> WeightMap<W>
where
    W: Copy + Ord + Default,
    G: GraphQueryPort + ?Sized,
{
    let nodes = graph.all_nodes();
    let mut weights: WeightMap<W> = nodes
        .iter()
        .map(|node| (node.id.clone(), initial.get(&node.id)))
        .collect();

    let stale = initial
        .iter()
        .filter(|(id, _)| !weights.contains(id))
        .count();
    if stale > 0 {
        tracing::debug!(stale, "Ignoring initial weights for unknown nodes");
    }

    let classes = classify(graph, &nodes);
    seed_processes(graph, &classes, &mut weights);
    push_from_processes(graph, &classes, &mut weights);
    raise_ancestors(&classes, &mut weights);
    broadcast_complexes(graph, &classes, &mut weights);

    weights
}

fn classify<'g, G>(graph: &'g G, nodes: &[&'g Node]) -> Classification<'g>
where
    G: GraphQueryPort + ?Sized,
{
    let mut classes = Classification {
        processes: Vec::new(),
        leaves: Vec::new(),
        parent_of: HashMap::new(),
    };

    for &node in nodes {
        if node.glyph_class.is_process() {
            classes.processes.push(node);
        }

        let children = graph.children_of(&node.id);
        if children.is_empty() {
            classes.leaves.push(node);
        }
        for child in children {
            classes.parent_of.insert(&child.id, &node.id);
        }
    }

    tracing::debug!(
        processes = classes.processes.len(),
        leaves = classes.leaves.len(),
        contained = classes.parent_of.len(),
        "Classified pathway nodes"
    );
    classes
}

fn neighbors_of<'g, G>(graph: &'g G, node: &Node) -> Vec<&'g Node>
where
    G: GraphQueryPort + ?Sized,
{
    graph
        .first_neighbors(std::slice::from_ref(&node.id), false)
        .neighbors
}

fn seed_processes<W, G>(graph: &G, classes: &Classification<'_>, weights: &mut WeightMap<W>)
where
    W: Copy + Ord + Default,
    G: GraphQueryPort + ?Sized,
{
    let mut raised = 0usize;
    for process in &classes.processes {
        let strongest = neighbors_of(graph, process)
            .iter()
            .map(|neighbor| weights.get(&neighbor.id))
            .max()
            .unwrap_or_default();
        if weights.raise(&process.id, strongest) {
            raised += 1;
        }
    }
    tracing::debug!(raised, "Seeded process weights from participants");
}

fn push_from_processes<W, G>(graph: &G, classes: &Classification<'_>, weights: &mut WeightMap<W>)
where
    W: Copy + Ord + Default,
    G: GraphQueryPort + ?Sized,
{
    let mut raised = 0usize;
    for process in &classes.processes {
        let weight = weights.get(&process.id);
        for neighbor in neighbors_of(graph, process) {
            if weights.raise(&neighbor.id, weight) {
                raised += 1;
            }
        }
    }
    tracing::debug!(raised, "Pushed process weights to participants");
}

fn raise_ancestors<W>(classes: &Classification<'_>, weights: &mut WeightMap<W>)
where
    W: Copy + Ord + Default,
{
    let mut raised = 0usize;
    for leaf in &classes.leaves {
        let mut current = &leaf.id;
        let mut visited = HashSet::from([current]);

        while let Some(&parent) = classes.parent_of.get(current) {
            if !visited.insert(parent) {
                tracing::warn!(node = %parent, "Containment cycle while raising ancestors");
                break;
            }
            if weights.raise(parent, weights.get(current)) {
                raised += 1;
            }
            current = parent;
        }
    }
    tracing::debug!(raised, "Raised ancestor weights");
}

fn broadcast_complexes<W, G>(graph: &G, classes: &Classification<'_>, weights: &mut WeightMap<W>)
where
    W: Copy + Ord + Default,
    G: GraphQueryPort + ?Sized,
{
    let is_complex = |id: &NodeId| {
        graph
            .node(id)
            .is_some_and(|node| node.glyph_class == GlyphClass::Complex)
    };

    let mut frontier: Vec<&Node> = graph
        .parent_nodes()
        .into_iter()
        .filter(|node| node.glyph_class.is_complex())
        .filter(|node| {
            classes
                .parent_of
                .get(&node.id)
                .is_none_or(|parent| !is_complex(parent))
        })
        .collect();

    let mut visited: HashSet<NodeId> = frontier.iter().map(|node| node.id.clone()).collect();
    let mut overwritten = 0usize;
    let mut generations = 0usize;

    while !frontier.is_empty() {
        let mut next_generation = Vec::new();

        for complex in &frontier {
            let weight = weights.get(&complex.id);
            for child in graph.children_of(&complex.id) {
                weights.set(child.id.clone(), weight);
                overwritten += 1;

                if child.glyph_class.is_complex() {
                    if visited.insert(child.id.clone()) {
                        next_generation.push(child);
                    } else {
                        tracing::warn!(node = %child.id, "Containment cycle while broadcasting complexes");
                    }
                }
            }
        }

        frontier = next_generation;
        generations += 1;
    }

    tracing::debug!(overwritten, generations, "Broadcast complex weights to components");
}

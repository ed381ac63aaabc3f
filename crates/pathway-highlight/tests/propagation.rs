//! Property tests for relevance weight propagation over random forests.

mod common;

use common::{arb_forest, complex_scenario, descendants, ids, init_tracing};
use pathway_graph::{GlyphClass, GraphQueryPort, NodeId};
use pathway_highlight::{SELECTED, UNSELECTED, WeightMap, propagate};
use proptest::prelude::*;
use rstest::rstest;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_node_gets_a_weight(plan in arb_forest(12)) {
        let graph = plan.graph();
        let result = propagate(&plan.initial(), &graph);
        prop_assert_eq!(result.len(), graph.node_count());
    }

    #[test]
    fn weights_never_decrease(plan in arb_forest(12)) {
        let graph = plan.graph();
        let initial = plan.initial();
        let result = propagate(&initial, &graph);

        for node in graph.all_nodes() {
            prop_assert!(
                result.get(&node.id) >= initial.get(&node.id),
                "{} dropped from {} to {}",
                node.id,
                initial.get(&node.id),
                result.get(&node.id)
            );
        }
    }

    #[test]
    fn relevant_nodes_have_relevant_ancestors(plan in arb_forest(12)) {
        let graph = plan.graph();
        let result = propagate(&plan.initial(), &graph);

        for (id, _) in result.iter().filter(|(_, w)| *w == SELECTED) {
            for ancestor in graph.ancestors(id) {
                prop_assert_eq!(result.get(&ancestor.id), SELECTED, "ancestor {} of {}", ancestor.id, id);
            }
        }
    }

    #[test]
    fn complexes_are_all_or_nothing(plan in arb_forest(12)) {
        let graph = plan.graph();
        let result = propagate(&plan.initial(), &graph);

        for complex in graph.all_nodes().into_iter().filter(|n| n.glyph_class == GlyphClass::Complex) {
            let weight = result.get(&complex.id);
            if weight == SELECTED {
                let mut pending = vec![complex.id.clone()];
                while let Some(current) = pending.pop() {
                    for child in graph.children_of(&current) {
                        prop_assert_eq!(result.get(&child.id), SELECTED, "component {} of {}", child.id, current);
                        if child.glyph_class == GlyphClass::Complex {
                            pending.push(child.id.clone());
                        }
                    }
                }
            } else {
                for descendant in descendants(&graph, &complex.id) {
                    prop_assert_eq!(result.get(&descendant), UNSELECTED, "{} inside {}", descendant, complex.id);
                }
            }
        }
    }

    #[test]
    fn relevant_processes_pull_in_participants(plan in arb_forest(12)) {
        let plan = plan.with_free_processes();
        let graph = plan.graph();
        let result = propagate(&plan.initial(), &graph);

        for process in graph.all_nodes().into_iter().filter(|n| n.glyph_class.is_process()) {
            if result.get(&process.id) != SELECTED {
                continue;
            }
            let found = graph.first_neighbors(std::slice::from_ref(&process.id), false);
            for neighbor in found.neighbors {
                prop_assert_eq!(result.get(&neighbor.id), SELECTED, "participant {} of {}", neighbor.id, process.id);
            }
        }
    }

    #[test]
    fn second_pass_is_a_fixed_point_on_flat_graphs(plan in arb_forest(12)) {
        let plan = plan.flattened();
        let graph = plan.graph();
        let once = propagate(&plan.initial(), &graph);
        let twice = propagate(&once, &graph);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn same_inputs_same_output(plan in arb_forest(12)) {
        let graph = plan.graph();
        let initial = plan.initial();
        prop_assert_eq!(propagate(&initial, &graph), propagate(&initial, &graph));
    }
}

fn selecting(selection: &[&str]) -> WeightMap {
    selection
        .iter()
        .map(|id| (NodeId::from(*id), SELECTED))
        .collect()
}

#[rstest]
#[case::outside_leaf(&["D"], &["A", "B", "C", "D", "P", "X"])]
#[case::component(&["B"], &["A", "B", "C", "X"])]
#[case::compartment_only(&["C"], &["C"])]
#[case::complex(&["X"], &["A", "B", "C", "X"])]
#[case::nothing(&[], &[])]
fn test_scenario_relevance(#[case] selection: &[&str], #[case] expected: &[&str]) {
    init_tracing();
    let graph = complex_scenario();

    let result = propagate(&selecting(selection), &graph);

    assert_eq!(ids(result.nodes_at(SELECTED)), expected);
}

#[test]
fn test_scenario_is_a_fixed_point() {
    let graph = complex_scenario();
    let once = propagate(&selecting(&["D"]), &graph);
    let twice = propagate(&once, &graph);
    assert_eq!(once, twice);
}

#[test]
fn test_one_hop_per_pass() {
    // Selecting B reaches A through the complex, but P, which consumes A,
    // only joins on the next pass.
    let graph = complex_scenario();
    let once = propagate(&selecting(&["B"]), &graph);
    assert_eq!(once.get(&NodeId::from("P")), UNSELECTED);

    let twice = propagate(&once, &graph);
    assert_eq!(ids(twice.nodes_at(SELECTED)), ["A", "B", "C", "D", "P", "X"]);
}

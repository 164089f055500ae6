use std::collections::HashMap;

use glauber_core::{Color, Palette, RngHandle, VertexId};
use glauber_graph::AdjacencyGraph;
use glauber_mcmc::{
    build_transition_graph, enumerate_transitions, sample_coloring, step, PartialColoring,
    TransitionKind,
};

fn v(raw: u64) -> VertexId {
    VertexId::from_raw(raw)
}

fn c(raw: u32) -> Color {
    Color::from_raw(raw)
}

fn triangle() -> AdjacencyGraph {
    AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).unwrap()
}

fn path3() -> AdjacencyGraph {
    AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap()
}

fn single_edge() -> AdjacencyGraph {
    AdjacencyGraph::from_edges(2, &[(0, 1)]).unwrap()
}

#[test]
fn triangle_with_two_colors_never_fills_up() {
    let graph = triangle();
    let space = build_transition_graph(&graph, 2).unwrap();
    // 1 empty + 3 vertices x 2 colors + 3 edges x 2 proper pairs
    assert_eq!(space.state_count(), 13);
    assert!(space.states().all(|node| node.coloring.len() <= 2));
    assert_eq!(space.stats().full_states, 0);
    assert_eq!(space.stats().max_colored, 2);

    for seed in 0..50 {
        let mut rng = RngHandle::from_seed(seed);
        let coloring = sample_coloring(&graph, 2, 200, None, &mut rng).unwrap();
        assert!(coloring.len() <= 2, "seed {seed} produced {coloring:?}");
    }
}

#[test]
fn path_enumeration_from_empty_has_six_equal_moves() {
    let graph = path3();
    let distribution = enumerate_transitions(&graph, &PartialColoring::empty(), 2).unwrap();
    assert_eq!(distribution.len(), 7);

    let moves: Vec<_> = distribution
        .entries()
        .iter()
        .filter(|entry| matches!(entry.kind, TransitionKind::Color { .. }))
        .collect();
    assert_eq!(moves.len(), 6);
    for entry in &moves {
        assert!((entry.probability - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(entry.next.len(), 1);
    }
    assert_eq!(distribution.self_loop_probability(), 0.0);
    assert!((distribution.total_mass() - 1.0).abs() < 1e-12);
}

#[test]
fn single_edge_with_one_color_accumulates_self_loop_mass() {
    let graph = single_edge();

    let from_empty = enumerate_transitions(&graph, &PartialColoring::empty(), 1).unwrap();
    assert_eq!(from_empty.len(), 3);
    assert!((from_empty.total_mass() - 1.0).abs() < 1e-12);
    assert_eq!(from_empty.self_loop_probability(), 0.0);

    let one_colored: PartialColoring = [(v(0), c(0))].into_iter().collect();
    let distribution = enumerate_transitions(&graph, &one_colored, 1).unwrap();
    assert!((distribution.probability_of(&PartialColoring::empty()) - 0.5).abs() < 1e-12);
    assert!((distribution.self_loop_probability() - 0.5).abs() < 1e-12);
    assert!((distribution.total_mass() - 1.0).abs() < 1e-12);

    let space = build_transition_graph(&graph, 1).unwrap();
    assert_eq!(space.state_count(), 3);
    let both: PartialColoring = [(v(0), c(0)), (v(1), c(0))].into_iter().collect();
    assert!(!space.contains(&both));
}

#[test]
fn empty_coloring_always_carries_a_self_loop() {
    for (graph, colors) in [(path3(), 2), (single_edge(), 1), (triangle(), 3)] {
        let space = build_transition_graph(&graph, colors).unwrap();
        let empty = space.index_of(&PartialColoring::empty()).unwrap();
        assert_eq!(empty, space.initial);
        assert!(space.graph.contains_edge(empty, empty));
        for node in space.graph.node_indices() {
            assert!((space.outgoing_mass(node) - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn empirical_step_frequencies_match_enumeration() {
    let graph = path3();
    let palette = Palette::new(2).unwrap();
    let start: PartialColoring = [(v(0), c(0))].into_iter().collect();
    let distribution = enumerate_transitions(&graph, &start, 2).unwrap();

    let trials = 20_000;
    let mut rng = RngHandle::from_seed(2024);
    let mut counts: HashMap<PartialColoring, usize> = HashMap::new();
    for _ in 0..trials {
        let mut state = start.clone();
        step(&graph, &mut state, palette, &mut rng).unwrap();
        *counts.entry(state).or_default() += 1;
    }

    for (state, count) in &counts {
        let expected = distribution.probability_of(state);
        let observed = *count as f64 / trials as f64;
        assert!(
            (observed - expected).abs() < 0.02,
            "state {state:?}: observed {observed}, expected {expected}"
        );
    }
    for entry in distribution.entries() {
        if entry.probability > 0.0 {
            assert!(counts.contains_key(&entry.next));
        }
    }
}

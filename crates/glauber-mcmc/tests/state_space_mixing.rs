use glauber_core::{Color, VertexId};
use glauber_graph::AdjacencyGraph;
use glauber_mcmc::{
    build_transition_graph, enumerate_transitions, evolve_distribution, is_proper, point_mass,
    MixingConfig, PartialColoring, TransitionGraph,
};

fn single_edge_space() -> TransitionGraph {
    let graph = AdjacencyGraph::from_edges(2, &[(0, 1)]).unwrap();
    build_transition_graph(&graph, 1).unwrap()
}

#[test]
fn every_discovered_state_is_proper() {
    let graph = AdjacencyGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
    let space = build_transition_graph(&graph, 3).unwrap();
    assert!(!space.truncated);
    for node in space.states() {
        assert!(is_proper(&graph, &node.coloring).unwrap());
        assert_eq!(node.hash, node.coloring.canonical_hash());
        assert_eq!(space.index_of(&node.coloring).unwrap().index(), node.index);
    }
}

#[test]
fn propagation_preserves_mass() {
    let graph = AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    let space = build_transition_graph(&graph, 2).unwrap();
    let mut distribution = point_mass(&space, &PartialColoring::empty()).unwrap();
    for _ in 0..5 {
        distribution = space.propagate(&distribution).unwrap();
        let mass: f64 = distribution.iter().sum();
        assert!((mass - 1.0).abs() < 1e-9);
    }
}

#[test]
fn single_edge_chain_converges_to_uniform() {
    let space = single_edge_space();
    let config = MixingConfig {
        max_steps: 500,
        stopping_threshold: 1e-6,
    };
    let report = evolve_distribution(&space, &PartialColoring::empty(), &config).unwrap();
    let converged_at = report.converged_at.unwrap();
    assert!(converged_at > 0 && converged_at < 100);
    assert_eq!(report.records.len(), converged_at + 1);
    assert!(report.final_distance() <= 1e-6);
    assert_eq!(report.state_count, 3);
    for mass in &report.final_distribution {
        assert!((mass - 1.0 / 3.0).abs() < 1e-5);
    }
}

#[test]
fn periodic_chain_never_reaches_threshold() {
    let graph = AdjacencyGraph::with_vertices(1);
    let space = build_transition_graph(&graph, 2).unwrap();
    let config = MixingConfig {
        max_steps: 10,
        stopping_threshold: 0.01,
    };
    let report = evolve_distribution(&space, &PartialColoring::empty(), &config).unwrap();
    assert!(report.converged_at.is_none());
    assert_eq!(report.records.len(), 11);
    // empty -> colored -> empty: distance alternates between 2/3 and 1/3
    assert!((report.records[0].tv_from_uniform - 2.0 / 3.0).abs() < 1e-12);
    assert!((report.records[1].tv_from_uniform - 1.0 / 3.0).abs() < 1e-12);
    assert!((report.records[2].tv_from_uniform - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn unknown_start_state_is_rejected() {
    let space = single_edge_space();
    let both: PartialColoring = [
        (VertexId::from_raw(0), Color::from_raw(0)),
        (VertexId::from_raw(1), Color::from_raw(0)),
    ]
    .into_iter()
    .collect();
    let err = evolve_distribution(&space, &both, &MixingConfig::default()).unwrap_err();
    assert_eq!(err.code(), "unknown-state");
}

#[test]
fn json_export_lists_states_and_edges() {
    let space = single_edge_space();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("space.json");
    space.write_json(&path).unwrap();
    let exported: glauber_mcmc::state_space::TransitionGraphExport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(exported, space.export());
    assert_eq!(exported.states.len(), 3);
    assert_eq!(exported.edges.len(), space.edge_count());
    assert_eq!(exported.colors, 1);

    let dot_path = dir.path().join("dot").join("space.dot");
    space.write_dot(&dot_path).unwrap();
    assert!(std::fs::read_to_string(&dot_path).unwrap().contains("s2"));
}

#[test]
fn edge_weights_match_enumerated_probabilities() {
    let graph = AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    let space = build_transition_graph(&graph, 2).unwrap();
    for from in space.graph.node_indices() {
        let distribution = enumerate_transitions(&graph, &space.node(from).coloring, 2).unwrap();
        for to in space.graph.node_indices() {
            let expected = distribution.probability_of(&space.node(to).coloring);
            let actual = space.transition_probability(from, to);
            assert!(
                (actual - expected).abs() < 1e-12,
                "s{} -> s{}: graph {actual}, enumerated {expected}",
                from.index(),
                to.index()
            );
        }
    }
}

#[test]
fn large_step_budget_still_stops_at_convergence() {
    let space = single_edge_space();
    for max_steps in [1usize << 40, usize::MAX] {
        let config = MixingConfig {
            max_steps,
            stopping_threshold: 1e-6,
        };
        let report = evolve_distribution(&space, &PartialColoring::empty(), &config).unwrap();
        let converged_at = report.converged_at.unwrap();
        assert!(converged_at < 100);
        assert_eq!(report.records.len(), converged_at + 1);
    }
}

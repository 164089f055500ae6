use glauber_graph::{
    canonical_hash, graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json,
    AdjacencyGraph,
};
use glauber_core::VertexId;
use proptest::prelude::*;

#[test]
fn json_round_trip_preserves_hash() {
    let graph = AdjacencyGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    let json = graph_to_json(&graph).unwrap();
    let restored = graph_from_json(&json).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(canonical_hash(&restored).unwrap(), canonical_hash(&graph).unwrap());
}

#[test]
fn hash_ignores_edge_insertion_order() {
    let a = AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    let b = AdjacencyGraph::from_edges(3, &[(2, 1), (1, 0)]).unwrap();
    let c = AdjacencyGraph::from_edges(3, &[(0, 1), (0, 2)]).unwrap();
    assert_eq!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
    assert_ne!(canonical_hash(&a).unwrap(), canonical_hash(&c).unwrap());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = graph_from_json("{\"vertices\": 3}").unwrap_err();
    assert_eq!(err.code(), "deserialize-json");
}

proptest! {
    #[test]
    fn random_graphs_round_trip_bytes(count in 1usize..8, raw_edges in proptest::collection::vec((0u64..8, 0u64..8), 0..16)) {
        let mut graph = AdjacencyGraph::with_vertices(count);
        for (a, b) in raw_edges {
            let (a, b) = (a % count as u64, b % count as u64);
            let _ = graph.add_edge(VertexId::from_raw(a), VertexId::from_raw(b));
        }
        let bytes = graph_to_bytes(&graph).unwrap();
        let restored = graph_from_bytes(&bytes).unwrap();
        prop_assert_eq!(canonical_hash(&graph).unwrap(), canonical_hash(&restored).unwrap());
        prop_assert_eq!(restored.edge_count(), graph.edge_count());
    }
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glauber_graph::AdjacencyGraph;

fn ring_edges(n: u64) -> Vec<(u64, u64)> {
    (0..n).map(|i| (i, (i + 1) % n)).collect()
}

fn build_graph_bench(c: &mut Criterion) {
    let edges = ring_edges(5_000);
    c.bench_function("build_ring_5k", |b| {
        b.iter(|| {
            let graph = AdjacencyGraph::from_edges(5_000, &edges).unwrap();
            black_box(graph);
        });
    });
}

criterion_group!(benches, build_graph_bench);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glauber_core::GraphView;
use glauber_graph::AdjacencyGraph;

fn queries_bench(c: &mut Criterion) {
    let edges: Vec<(u64, u64)> = (0..2_000u64)
        .flat_map(|i| [(i, (i + 1) % 2_000), (i, (i + 7) % 2_000)])
        .collect();
    let graph = AdjacencyGraph::from_edges(2_000, &edges).unwrap();
    let vertices: Vec<_> = graph.vertices().collect();

    c.bench_function("neighbor_scan", |b| {
        b.iter(|| {
            for vertex in &vertices {
                black_box(graph.neighbors(*vertex).unwrap().count());
            }
        });
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);

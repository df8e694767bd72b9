use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tablegraph::{Direction, Graph, RowRecord, RowStore, Visit};

/// Ring graph of `size` nodes with one chord per ten nodes, plus its row store
fn build_ring(size: usize) -> (Graph, RowStore) {
    let mut graph = Graph::new(true);
    let mut rows = RowStore::new();
    let mut ids = Vec::with_capacity(size);
    for i in 0..size {
        let raw = rows.push_row(RowRecord::new().with_value("value", (i % 100) as f64));
        ids.push(graph.add_node(&format!("n{}", i), Some(raw)));
    }
    for i in 0..size {
        graph.add_edge(ids[i], ids[(i + 1) % size], None);
        if i % 10 == 0 {
            graph.add_edge(ids[i], ids[(i + size / 2) % size], None);
        }
    }
    (graph, rows)
}

/// Benchmark node insertion throughput
fn bench_node_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_insertion");

    for size in [100, 1000, 10_000].iter() {
        let names: Vec<String> = (0..*size).map(|i| format!("n{}", i)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut graph = Graph::new(false);
                for (i, name) in names.iter().enumerate() {
                    graph.add_node(name, Some(i));
                }
                criterion::black_box(graph.node_count());
            });
        });
    }
    group.finish();
}

/// Benchmark edge lookup by name pair
fn bench_edge_lookup(c: &mut Criterion) {
    let (graph, _) = build_ring(1000);
    c.bench_function("edge_lookup", |b| {
        b.iter(|| {
            criterion::black_box(graph.get_edge("n500", "n501").is_some());
            criterion::black_box(graph.get_edge("n501", "n500").is_none());
        });
    });
}

/// Benchmark full breadth-first traversal
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfs");

    for size in [100, 1000, 10_000].iter() {
        let (graph, _) = build_ring(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut visited = 0usize;
                graph.breadth_first_traverse("n0", Direction::Out, |_, _| {
                    visited += 1;
                    Visit::Continue
                });
                criterion::black_box(visited);
            });
        });
    }
    group.finish();
}

/// Benchmark projection rebuild after a filter
fn bench_resynchronize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resynchronize");

    for size in [1000, 10_000].iter() {
        let (mut graph, mut rows) = build_ring(*size);
        rows.filter_by_value("value", |v| v >= 50.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                graph.resynchronize(&rows);
                criterion::black_box(graph.active_nodes().count());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_node_insertion,
    bench_edge_lookup,
    bench_traversal,
    bench_resynchronize
);
criterion_main!(benches);

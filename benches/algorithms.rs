use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use densegraph::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// A connected random graph: a spine through all vertices plus `extra` edges.
fn random_graph<D: Direction>(n: u32, extra: usize, seed: u64) -> Graph<u32, D> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = Graph::from_vertices(0..n);
    for v in 1..n {
        graph.update_edge(v - 1, v, rng.gen_range(0.0..10.0));
    }
    for _ in 0..extra {
        let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
        graph.update_edge(u, v, rng.gen_range(0.0..10.0));
    }
    graph
}

fn bench_spanning(c: &mut Criterion) {
    let mut group = c.benchmark_group("spanning");
    for n in [50u32, 200] {
        let graph: UnGraph<u32> = random_graph(n, 4 * n as usize, 7);
        group.bench_with_input(BenchmarkId::new("kruskal", n), &graph, |b, g| {
            b.iter(|| kruskal(black_box(g)))
        });
        group.bench_with_input(BenchmarkId::new("prim", n), &graph, |b, g| {
            b.iter(|| prim(black_box(g), None))
        });
    }
    group.finish();
}

fn bench_directed(c: &mut Criterion) {
    let mut group = c.benchmark_group("directed");
    for n in [50u32, 200] {
        let graph: DiGraph<u32> = random_graph(n, 2 * n as usize, 11);
        group.bench_with_input(BenchmarkId::new("scc", n), &graph, |b, g| {
            b.iter(|| black_box(g).strongly_connected_components())
        });
        group.bench_with_input(BenchmarkId::new("condensation", n), &graph, |b, g| {
            b.iter(|| black_box(g).condensation())
        });
    }
    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let graph: UnGraph<u32> = random_graph(200, 800, 3);
    c.bench_function("remove_vertex/200", |b| {
        b.iter_batched(
            || graph.clone(),
            |mut g| g.remove_vertex(&0),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(graph_benches, bench_spanning, bench_directed, bench_mutation);
criterion_main!(graph_benches);

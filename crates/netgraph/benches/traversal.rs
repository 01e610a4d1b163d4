use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use netgraph::{
    Graph, UndirectedGraph, WeightedGraph, WeightedUndirectedGraph,
    algorithms::{components::connected_components, dijkstra, search::Search},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_weighted_graph(node_count: usize, average_degree: usize) -> WeightedUndirectedGraph<u32> {
    let mut rng = SmallRng::seed_from_u64(0xB0A7);
    let mut graph = WeightedUndirectedGraph::with_nodes(node_count);

    while graph.edge_count() < node_count * average_degree / 2 {
        let from = rng.random_range(0..node_count);
        let to = rng.random_range(0..node_count);
        if from != to && !graph.has_edge(from, to) {
            graph.add_edge(from, to, rng.random_range(1..100));
        }
    }

    graph
}

pub fn search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for node_count in SIZES {
        let graph: UndirectedGraph = random_weighted_graph(node_count, 8).to_unweighted();

        group.bench_with_input(BenchmarkId::new("bfs", node_count), &graph, |b, g| {
            b.iter(|| Search::breadth_first(g, black_box(0)).run())
        });
        group.bench_with_input(BenchmarkId::new("dfs", node_count), &graph, |b, g| {
            b.iter(|| Search::depth_first(g, black_box(0)).run())
        });
        group.bench_with_input(
            BenchmarkId::new("connected_components", node_count),
            &graph,
            |b, g| b.iter(|| connected_components(g)),
        );
    }

    group.finish();
}

pub fn dijkstra_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");

    for node_count in SIZES {
        let graph = random_weighted_graph(node_count, 8);

        group.sample_size(10);
        group.bench_with_input(
            BenchmarkId::new("shortest_paths", node_count),
            &graph,
            |b, g| b.iter(|| dijkstra::shortest_paths(g, black_box(0))),
        );
    }

    group.finish();
}

criterion_group!(benches, search_bench, dijkstra_bench);
criterion_main!(benches);

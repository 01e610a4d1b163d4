#![allow(dead_code)]

use netgraph::{
    DirectedGraph, Graph, UndirectedGraph, WeightedDirectedGraph, WeightedUndirectedGraph,
    types::Node,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// 0 - 1 - 2 - 3 - 0
pub fn four_cycle() -> UndirectedGraph {
    UndirectedGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)])
}

/// Shortest-path tree from 0: 0 -> 2 (3), 2 -> 1 (4), 1 -> 3 (6), 2 -> 4 (5).
pub fn five_node_weighted() -> WeightedUndirectedGraph<u32> {
    WeightedUndirectedGraph::from_weighted_edges(
        5,
        &[
            (0, 1, 10),
            (0, 2, 3),
            (1, 2, 1),
            (1, 3, 2),
            (2, 3, 8),
            (2, 4, 2),
            (3, 4, 7),
        ],
    )
}

fn random_pairs(rng: &mut SmallRng, node_count: usize, tries: usize) -> Vec<(Node, Node)> {
    (0..tries)
        .map(|_| {
            (
                rng.random_range(0..node_count),
                rng.random_range(0..node_count),
            )
        })
        .collect()
}

pub fn random_undirected(seed: u64, node_count: usize, tries: usize) -> UndirectedGraph {
    let mut rng = rng(seed);
    let mut graph = UndirectedGraph::with_nodes(node_count);

    for (u, v) in random_pairs(&mut rng, node_count, tries) {
        if u != v && !graph.has_edge(u, v) {
            graph.add_edge(u, v, ());
        }
    }

    graph
}

pub fn random_directed(seed: u64, node_count: usize, tries: usize) -> DirectedGraph {
    let mut rng = rng(seed);
    let mut graph = DirectedGraph::with_nodes(node_count);

    for (u, v) in random_pairs(&mut rng, node_count, tries) {
        if u != v && !graph.has_edge(u, v) {
            graph.add_edge(u, v, ());
        }
    }

    graph
}

pub fn random_weighted_directed(
    seed: u64,
    node_count: usize,
    tries: usize,
) -> WeightedDirectedGraph<u64> {
    let mut rng = rng(seed);
    let mut graph = WeightedDirectedGraph::with_nodes(node_count);

    for (u, v) in random_pairs(&mut rng, node_count, tries) {
        if u != v && !graph.has_edge(u, v) {
            graph.add_edge(u, v, rng.random_range(1..20));
        }
    }

    graph
}

/// All-pairs hop distances by repeated relaxation.
pub fn brute_force_hops<G: Graph>(graph: &G, source: Node) -> Vec<Option<usize>> {
    let mut distances = vec![None; graph.node_count()];
    distances[source] = Some(0);

    for _ in graph.nodes() {
        for (u, v) in graph.edges() {
            relax_hop(&mut distances, u, v);
            if !graph.is_directed() {
                relax_hop(&mut distances, v, u);
            }
        }
    }

    distances
}

fn relax_hop(distances: &mut [Option<usize>], u: Node, v: Node) {
    if let Some(d) = distances[u] {
        if distances[v].is_none_or(|known| d + 1 < known) {
            distances[v] = Some(d + 1);
        }
    }
}

/// Bellman-Ford distances over a directed weighted graph.
pub fn bellman_ford(graph: &WeightedDirectedGraph<u64>, source: Node) -> Vec<Option<u64>> {
    let mut distances = vec![None; graph.node_count()];
    distances[source] = Some(0);

    for _ in graph.nodes() {
        for (u, v, w) in graph.weighted_edges() {
            if let Some(d) = distances[u] {
                if distances[v].is_none_or(|known| d + w < known) {
                    distances[v] = Some(d + w);
                }
            }
        }
    }

    distances
}

//! Hop-count distances and shortest paths in unweighted terms, built on
//! breadth-first search.

use crate::{
    Graph,
    algorithms::search::{bfs, hooks},
    graph::Path,
    types::Node,
};

/// Hop distance from `source` to every node, `None` where unreachable.
pub fn hop_distances<G: Graph>(graph: &G, source: Node) -> Vec<Option<usize>> {
    let mut distances = vec![None; graph.node_count()];
    if graph.has_node(source) {
        distances[source] = Some(0);
    }

    bfs(graph, source, hooks::never, hooks::ignore, |u, v| {
        if distances[v].is_none() {
            distances[v] = distances[u].map(|d| d + 1);
        }
    });

    distances
}

/// Searches until `target` (if any) is expanded and records for each node
/// every neighbour one layer closer to `source`.
fn predecessor_sets<G: Graph>(graph: &G, source: Node, target: Option<Node>) -> Vec<Vec<Node>> {
    let mut distances: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut predecessors = vec![Vec::new(); graph.node_count()];
    if graph.has_node(source) {
        distances[source] = Some(0);
    }

    bfs(
        graph,
        source,
        |node| Some(node) == target,
        hooks::ignore,
        |u, v| {
            let Some(next) = distances[u].map(|d| d + 1) else {
                return;
            };
            match distances[v] {
                None => {
                    distances[v] = Some(next);
                    predecessors[v].push(u);
                }
                Some(d) if d == next => predecessors[v].push(u),
                Some(_) => {}
            }
        },
    );

    predecessors
}

/// For every node, all neighbours on some shortest path from `source`, in
/// discovery order. Empty for the source and for unreachable nodes.
pub fn predecessors<G: Graph>(graph: &G, source: Node) -> Vec<Vec<Node>> {
    predecessor_sets(graph, source, None)
}

/// One path with the fewest hops from `source` to `target`. Among those the
/// one found first by breadth-first search is returned.
pub fn shortest_path<G: Graph>(graph: &G, source: Node, target: Node) -> Option<Path> {
    if graph.node_count() == 0 {
        return None;
    }
    assert!(
        graph.has_node(target),
        "node {} is out of range for a graph with {} nodes",
        target,
        graph.node_count()
    );

    let mut parent = vec![None; graph.node_count()];
    let visited = bfs(
        graph,
        source,
        |node| node == target,
        hooks::ignore,
        |u, v| {
            if v != source && parent[v].is_none() {
                parent[v] = Some(u);
            }
        },
    );

    if !visited.contains(target) {
        return None;
    }

    let mut nodes = vec![target];
    let mut current = target;
    while let Some(prev) = parent[current] {
        nodes.push(prev);
        current = prev;
    }
    nodes.reverse();

    Some(Path::from_nodes(nodes))
}

/// Every path with the fewest hops from `source` to `target`, in
/// lexicographic order.
pub fn all_shortest_paths<G: Graph>(graph: &G, source: Node, target: Node) -> Vec<Vec<Node>> {
    if graph.node_count() == 0 {
        return Vec::new();
    }
    assert!(
        graph.has_node(target),
        "node {} is out of range for a graph with {} nodes",
        target,
        graph.node_count()
    );

    let predecessors = predecessor_sets(graph, source, Some(target));
    if target != source && predecessors[target].is_empty() {
        return Vec::new();
    }

    // Walk the predecessor DAG backwards from the target.
    let mut paths = Vec::new();
    let mut stack = vec![vec![target]];
    while let Some(partial) = stack.pop() {
        let Some(&head) = partial.last() else {
            continue;
        };
        if head == source {
            let mut path = partial;
            path.reverse();
            paths.push(path);
            continue;
        }

        for &prev in &predecessors[head] {
            let mut extended = partial.clone();
            extended.push(prev);
            stack.push(extended);
        }
    }

    paths.sort();
    paths
}

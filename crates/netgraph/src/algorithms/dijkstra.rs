//! Hook-driven Dijkstra search over graphs with non-negative weights.
//!
//! Nodes are settled in non-decreasing distance from the source; among equal
//! distances the smaller node id is settled first. Hooks:
//!
//! - `process_current(u, d)`: called once when `u` is settled at distance `d`.
//! - `terminate(u)`: checked right after `u` was settled.
//! - `process_neighbour(u, v, w)`: called for every arc `(u, v)` of weight
//!   `w`; only when it returns `true` is `v` offered at distance `d + w`.
//!
//! As with [`bfs`](crate::algorithms::search::bfs), an empty graph visits
//! nothing.

use std::{cmp::Reverse, marker::PhantomData};

use log::{debug, trace};
use num_traits::{Num, Zero};
use priority_queue::PriorityQueue;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::{
    Graph, WeightedGraph,
    algorithms::{
        search::{hooks, traversable},
        visited::Visited,
    },
    graph::Path,
    types::Node,
};

pub fn dijkstra<G, T, C, N>(
    graph: &G,
    source: Node,
    mut terminate: T,
    mut process_current: C,
    mut process_neighbour: N,
) -> Visited
where
    G: WeightedGraph,
    G::Weight: Num + Ord,
    T: FnMut(Node) -> bool,
    C: FnMut(Node, G::Weight),
    N: FnMut(Node, Node, G::Weight) -> bool,
{
    let mut visited = Visited::new(graph.node_count());
    if !traversable(graph, source) {
        return visited;
    }

    let mut frontier: PriorityQueue<Node, Reverse<(G::Weight, Node)>, FxBuildHasher> =
        PriorityQueue::with_hasher(FxBuildHasher);
    frontier.push(source, Reverse((G::Weight::zero(), source)));

    while let Some((current, Reverse((distance, _)))) = frontier.pop() {
        if !visited.visit(current) {
            continue;
        }

        trace!("settled node {} at distance {:?}", current, distance);
        process_current(current, distance);
        if terminate(current) {
            debug!("Dijkstra from {} terminated at node {}", source, current);
            break;
        }

        for (neighbour, weight) in graph.weighted_neighbours(current) {
            if process_neighbour(current, neighbour, weight) && !visited.contains(neighbour) {
                // Keeps the smaller of the queued and the offered distance.
                frontier.push_increase(neighbour, Reverse((distance + weight, neighbour)));
            }
        }
    }

    visited
}

/// Builder over [`dijkstra`] where unset hooks fall back to [`hooks`].
pub struct ShortestPathSearch<
    'g,
    G: Graph,
    T = fn(Node) -> bool,
    C = fn(Node, <G as Graph>::Weight),
    N = fn(Node, Node, <G as Graph>::Weight) -> bool,
> {
    graph: &'g G,
    source: Node,
    terminate: T,
    process_current: C,
    process_neighbour: N,
}

impl<'g, G: WeightedGraph> ShortestPathSearch<'g, G> {
    pub fn new(graph: &'g G, source: Node) -> Self {
        Self {
            graph,
            source,
            terminate: hooks::never,
            process_current: hooks::ignore_settled,
            process_neighbour: hooks::accept,
        }
    }
}

impl<'g, G, T, C, N> ShortestPathSearch<'g, G, T, C, N>
where
    G: WeightedGraph,
{
    pub fn terminate<T2>(self, terminate: T2) -> ShortestPathSearch<'g, G, T2, C, N>
    where
        T2: FnMut(Node) -> bool,
    {
        ShortestPathSearch {
            graph: self.graph,
            source: self.source,
            terminate,
            process_current: self.process_current,
            process_neighbour: self.process_neighbour,
        }
    }

    pub fn on_current<C2>(self, process_current: C2) -> ShortestPathSearch<'g, G, T, C2, N>
    where
        C2: FnMut(Node, G::Weight),
    {
        ShortestPathSearch {
            graph: self.graph,
            source: self.source,
            terminate: self.terminate,
            process_current,
            process_neighbour: self.process_neighbour,
        }
    }

    pub fn on_neighbour<N2>(self, process_neighbour: N2) -> ShortestPathSearch<'g, G, T, C, N2>
    where
        N2: FnMut(Node, Node, G::Weight) -> bool,
    {
        ShortestPathSearch {
            graph: self.graph,
            source: self.source,
            terminate: self.terminate,
            process_current: self.process_current,
            process_neighbour,
        }
    }

    pub fn run(self) -> Visited
    where
        G::Weight: Num + Ord,
        T: FnMut(Node) -> bool,
        C: FnMut(Node, G::Weight),
        N: FnMut(Node, Node, G::Weight) -> bool,
    {
        dijkstra(
            self.graph,
            self.source,
            self.terminate,
            self.process_current,
            self.process_neighbour,
        )
    }
}

/// Distance and predecessor of a reached node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultNode<W> {
    cost: W,
    prev_node_id: Option<Node>,
}

impl<W> ResultNode<W> {
    pub fn new(cost: W, prev_node_id: Option<Node>) -> Self {
        Self { cost, prev_node_id }
    }

    pub fn cost(&self) -> &W {
        &self.cost
    }

    /// `None` for the source.
    pub fn prev_node_id(&self) -> Option<Node> {
        self.prev_node_id
    }
}

/// Shortest-path tree rooted at a single source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DijkstraResult<W> {
    source: Node,
    nodes: Vec<Option<ResultNode<W>>>,
}

impl<W: Num + Copy> DijkstraResult<W> {
    pub fn source(&self) -> Node {
        self.source
    }

    pub fn get(&self, node: Node) -> Option<&ResultNode<W>> {
        self.nodes.get(node)?.as_ref()
    }

    pub fn distance(&self, node: Node) -> Option<W> {
        self.get(node).map(|result| *result.cost())
    }

    pub fn is_reached(&self, node: Node) -> bool {
        self.get(node).is_some()
    }

    /// Reached nodes in ascending order.
    pub fn reached(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(node, result)| result.is_some().then_some(node))
    }

    /// Shortest path from the source to `node`, or `None` if it was not
    /// reached.
    pub fn path(&self, node: Node) -> Option<Path<W>> {
        let target = self.get(node)?;

        let mut nodes = vec![node];
        let mut prev = target.prev_node_id();
        while let Some(node) = prev {
            nodes.push(node);
            prev = self.get(node).and_then(ResultNode::prev_node_id);
        }
        nodes.reverse();

        Some(Path::new(nodes, *target.cost()))
    }
}

/// Relaxation hook shared by [`shortest_paths`] and [`shortest_path`]: records
/// `from` as predecessor of `to` whenever it strictly improves `to`'s best
/// known distance.
fn relax<W: Num + Ord + Copy>(
    best: &mut [Option<ResultNode<W>>],
    from: Node,
    to: Node,
    weight: W,
) -> bool {
    let Some(reached) = best[from] else {
        return false;
    };
    let candidate = *reached.cost() + weight;

    match best[to] {
        Some(known) if *known.cost() <= candidate => false,
        _ => {
            best[to] = Some(ResultNode::new(candidate, Some(from)));
            true
        }
    }
}

fn search_tree<G>(graph: &G, source: Node, target: Option<Node>) -> DijkstraResult<G::Weight>
where
    G: WeightedGraph,
    G::Weight: Num + Ord,
{
    if !traversable(graph, source) {
        return DijkstraResult {
            source,
            nodes: Vec::new(),
        };
    }

    let mut best = vec![None; graph.node_count()];
    best[source] = Some(ResultNode::new(G::Weight::zero(), None));

    let visited = dijkstra(
        graph,
        source,
        |node| Some(node) == target,
        hooks::ignore_settled,
        |from, to, weight| relax(&mut best, from, to, weight),
    );

    // Entries of nodes that were offered but never settled are tentative.
    for (node, result) in best.iter_mut().enumerate() {
        if !visited.contains(node) {
            *result = None;
        }
    }

    debug!(
        "Dijkstra from {} settled {} of {} nodes",
        source,
        visited.count(),
        graph.node_count()
    );

    DijkstraResult {
        source,
        nodes: best,
    }
}

/// Distances and predecessors of every node reachable from `source`.
pub fn shortest_paths<G>(graph: &G, source: Node) -> DijkstraResult<G::Weight>
where
    G: WeightedGraph,
    G::Weight: Num + Ord,
{
    search_tree(graph, source, None)
}

/// Shortest path from `source` to `target`. The search stops as soon as
/// `target` is settled. An empty graph has no paths.
pub fn shortest_path<G>(graph: &G, source: Node, target: Node) -> Option<Path<G::Weight>>
where
    G: WeightedGraph,
    G::Weight: Num + Ord,
{
    if graph.node_count() == 0 {
        return None;
    }
    assert!(
        graph.has_node(target),
        "node {} is out of range for a graph with {} nodes",
        target,
        graph.node_count()
    );

    search_tree(graph, source, Some(target)).path(target)
}

#[cfg(test)]
mod tests {
    use ordered_float::OrderedFloat;

    use super::*;
    use crate::{WeightedDirectedGraph, WeightedUndirectedGraph};

    fn setup_graph() -> WeightedUndirectedGraph<u32> {
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

    #[test]
    fn settle_order() {
        let graph = setup_graph();
        let mut settled = Vec::new();

        dijkstra(
            &graph,
            0,
            hooks::never,
            |node, distance| settled.push((node, distance)),
            hooks::accept,
        );

        assert_eq!(settled, vec![(0, 0), (2, 3), (1, 4), (4, 5), (3, 6)]);
    }

    #[test]
    fn distances_and_paths() {
        let result = shortest_paths(&setup_graph(), 0);

        let distances = (0..5).map(|n| result.distance(n)).collect::<Vec<_>>();
        assert_eq!(distances, vec![Some(0), Some(4), Some(3), Some(6), Some(5)]);

        let path = result.path(3).unwrap();
        assert_eq!(path.nodes(), &[0, 2, 1, 3]);
        assert_eq!(*path.cost(), 6);

        assert_eq!(result.path(0).unwrap().nodes(), &[0]);
        assert_eq!(result.get(0).unwrap().prev_node_id(), None);
    }

    #[test]
    fn ties_break_by_node_id() {
        let graph = WeightedUndirectedGraph::from_weighted_edges(
            4,
            &[(0, 3, 1u8), (0, 1, 1), (0, 2, 1)],
        );
        let mut order = Vec::new();

        ShortestPathSearch::new(&graph, 0)
            .on_current(|node, _| order.push(node))
            .run();

        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn terminate_at_target() {
        let graph = setup_graph();
        let mut settled = Vec::new();

        let visited = ShortestPathSearch::new(&graph, 0)
            .on_current(|node, _| settled.push(node))
            .terminate(|node| node == 1)
            .run();

        assert_eq!(settled, vec![0, 2, 1]);
        assert_eq!(visited.count(), 3);
    }

    #[test]
    fn rejected_arcs_are_not_followed() {
        let graph = setup_graph();

        let visited = ShortestPathSearch::new(&graph, 0)
            .on_neighbour(|_, to, _| to != 2)
            .run();

        // Without node 2 every other node is still reachable over 1.
        assert_eq!(visited.iter().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn unreachable_target() {
        let graph = WeightedDirectedGraph::from_weighted_edges(3, &[(0, 1, 2u64), (2, 1, 1)]);

        assert_eq!(shortest_path(&graph, 0, 2), None);
        assert_eq!(shortest_path(&graph, 2, 1).map(|p| *p.cost()), Some(1));

        let result = shortest_paths(&graph, 0);
        assert_eq!(result.reached().collect::<Vec<_>>(), vec![0, 1]);
        assert!(!result.is_reached(2));
    }

    #[test]
    fn float_weights() {
        let graph = WeightedDirectedGraph::from_weighted_edges(
            3,
            &[
                (0, 1, OrderedFloat(0.5)),
                (1, 2, OrderedFloat(0.25)),
                (0, 2, OrderedFloat(1.0)),
            ],
        );

        let path = shortest_path(&graph, 0, 2).unwrap();

        assert_eq!(path.nodes(), &[0, 1, 2]);
        assert_eq!(*path.cost(), OrderedFloat(0.75));
    }

    #[test]
    #[should_panic(expected = "source node 9 is out of range")]
    fn source_out_of_range() {
        shortest_paths(&setup_graph(), 9);
    }

    #[test]
    fn empty_graph() {
        let graph = WeightedUndirectedGraph::<u32>::new();
        let mut settled = 0;

        let visited = ShortestPathSearch::new(&graph, 0)
            .on_current(|_, _| settled += 1)
            .run();

        assert_eq!(settled, 0);
        assert!(visited.is_empty());
        assert_eq!(shortest_paths(&graph, 0).reached().count(), 0);
        assert_eq!(shortest_paths(&graph, 0).distance(0), None);
        assert_eq!(shortest_path(&graph, 0, 0), None);
    }
}

//! Hook-driven breadth-first and depth-first search.
//!
//! Both searches share one engine that only differs in the frontier: a FIFO
//! queue yields breadth-first order, a LIFO stack depth-first order. A node is
//! marked visited when it enters the frontier, so it is expanded at most once.
//!
//! The caller customizes a search through three hooks:
//!
//! - `terminate(u)`: checked after `u` was processed; `true` stops the search
//!   and leaves the rest of the frontier unexplored.
//! - `process_current(u)`: called when `u` leaves the frontier.
//! - `process_neighbour(u, v)`: called for every neighbour `v` of `u` in row
//!   order, before `v`'s visited state is checked.
//!
//! An empty graph visits nothing. On any other graph a source out of range
//! panics.

use std::{collections::VecDeque, marker::PhantomData};

use log::debug;

use crate::{Graph, algorithms::visited::Visited, types::Node};

/// Order in which discovered nodes are expanded.
pub trait Frontier {
    fn start(source: Node) -> Self;

    fn push(&mut self, node: Node);

    fn pop(&mut self) -> Option<Node>;
}

impl Frontier for VecDeque<Node> {
    fn start(source: Node) -> Self {
        VecDeque::from([source])
    }

    fn push(&mut self, node: Node) {
        self.push_back(node);
    }

    fn pop(&mut self) -> Option<Node> {
        self.pop_front()
    }
}

impl Frontier for Vec<Node> {
    fn start(source: Node) -> Self {
        vec![source]
    }

    fn push(&mut self, node: Node) {
        Vec::push(self, node);
    }

    fn pop(&mut self) -> Option<Node> {
        Vec::pop(self)
    }
}

pub type BreadthFirst = VecDeque<Node>;
pub type DepthFirst = Vec<Node>;

/// Default hooks.
pub mod hooks {
    use crate::types::Node;

    pub fn never(_: Node) -> bool {
        false
    }

    pub fn ignore(_: Node) {}

    pub fn ignore_neighbour(_: Node, _: Node) {}

    pub fn ignore_settled<W>(_: Node, _: W) {}

    pub fn accept<W>(_: Node, _: Node, _: W) -> bool {
        true
    }
}

/// `false` for an empty graph, which is traversed without calling any hook.
/// Otherwise panics unless `source` is a node of `graph`.
pub(crate) fn traversable<G: Graph>(graph: &G, source: Node) -> bool {
    if graph.node_count() == 0 {
        return false;
    }

    assert!(
        graph.has_node(source),
        "source node {} is out of range for a graph with {} nodes",
        source,
        graph.node_count()
    );
    true
}

fn traverse<G, F, T, C, N>(
    graph: &G,
    source: Node,
    mut terminate: T,
    mut process_current: C,
    mut process_neighbour: N,
) -> Visited
where
    G: Graph,
    F: Frontier,
    T: FnMut(Node) -> bool,
    C: FnMut(Node),
    N: FnMut(Node, Node),
{
    let mut visited = Visited::new(graph.node_count());
    if !traversable(graph, source) {
        return visited;
    }
    visited.visit(source);
    let mut frontier = F::start(source);

    while let Some(current) = frontier.pop() {
        process_current(current);
        if terminate(current) {
            debug!("Search from {} terminated at node {}", source, current);
            break;
        }

        for &neighbour in graph.neighbours(current) {
            process_neighbour(current, neighbour);
            if visited.visit(neighbour) {
                frontier.push(neighbour);
            }
        }
    }

    visited
}

/// Breadth-first search from `source`. Nodes are processed in non-decreasing
/// hop distance from `source`.
pub fn bfs<G, T, C, N>(
    graph: &G,
    source: Node,
    terminate: T,
    process_current: C,
    process_neighbour: N,
) -> Visited
where
    G: Graph,
    T: FnMut(Node) -> bool,
    C: FnMut(Node),
    N: FnMut(Node, Node),
{
    traverse::<G, BreadthFirst, T, C, N>(
        graph,
        source,
        terminate,
        process_current,
        process_neighbour,
    )
}

/// Depth-first search from `source` with the hook contract of [`bfs`].
pub fn dfs<G, T, C, N>(
    graph: &G,
    source: Node,
    terminate: T,
    process_current: C,
    process_neighbour: N,
) -> Visited
where
    G: Graph,
    T: FnMut(Node) -> bool,
    C: FnMut(Node),
    N: FnMut(Node, Node),
{
    traverse::<G, DepthFirst, T, C, N>(
        graph,
        source,
        terminate,
        process_current,
        process_neighbour,
    )
}

/// Builder over [`bfs`] and [`dfs`] where unset hooks fall back to
/// [`hooks`].
///
/// ```
/// use netgraph::{UndirectedGraph, algorithms::search::Search};
///
/// let graph = UndirectedGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
///
/// let mut order = Vec::new();
/// let visited = Search::breadth_first(&graph, 0)
///     .on_current(|node| order.push(node))
///     .run();
///
/// assert_eq!(visited.count(), 4);
/// assert_eq!(order, vec![0, 1, 3, 2]);
/// ```
pub struct Search<'g, G, F, T = fn(Node) -> bool, C = fn(Node), N = fn(Node, Node)> {
    graph: &'g G,
    source: Node,
    terminate: T,
    process_current: C,
    process_neighbour: N,
    frontier: PhantomData<F>,
}

impl<'g, G: Graph> Search<'g, G, BreadthFirst> {
    pub fn breadth_first(graph: &'g G, source: Node) -> Self {
        Self::with_defaults(graph, source)
    }
}

impl<'g, G: Graph> Search<'g, G, DepthFirst> {
    pub fn depth_first(graph: &'g G, source: Node) -> Self {
        Self::with_defaults(graph, source)
    }
}

impl<'g, G: Graph, F: Frontier> Search<'g, G, F> {
    fn with_defaults(graph: &'g G, source: Node) -> Self {
        Self {
            graph,
            source,
            terminate: hooks::never,
            process_current: hooks::ignore,
            process_neighbour: hooks::ignore_neighbour,
            frontier: PhantomData,
        }
    }
}

impl<'g, G, F, T, C, N> Search<'g, G, F, T, C, N>
where
    G: Graph,
    F: Frontier,
{
    pub fn terminate<T2>(self, terminate: T2) -> Search<'g, G, F, T2, C, N>
    where
        T2: FnMut(Node) -> bool,
    {
        Search {
            graph: self.graph,
            source: self.source,
            terminate,
            process_current: self.process_current,
            process_neighbour: self.process_neighbour,
            frontier: PhantomData,
        }
    }

    pub fn on_current<C2>(self, process_current: C2) -> Search<'g, G, F, T, C2, N>
    where
        C2: FnMut(Node),
    {
        Search {
            graph: self.graph,
            source: self.source,
            terminate: self.terminate,
            process_current,
            process_neighbour: self.process_neighbour,
            frontier: PhantomData,
        }
    }

    pub fn on_neighbour<N2>(self, process_neighbour: N2) -> Search<'g, G, F, T, C, N2>
    where
        N2: FnMut(Node, Node),
    {
        Search {
            graph: self.graph,
            source: self.source,
            terminate: self.terminate,
            process_current: self.process_current,
            process_neighbour,
            frontier: PhantomData,
        }
    }

    pub fn run(self) -> Visited
    where
        T: FnMut(Node) -> bool,
        C: FnMut(Node),
        N: FnMut(Node, Node),
    {
        traverse::<G, F, T, C, N>(
            self.graph,
            self.source,
            self.terminate,
            self.process_current,
            self.process_neighbour,
        )
    }
}

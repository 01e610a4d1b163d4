use std::ops::Range;

use log::{debug, info};
use num_traits::Num;
use serde::{Deserialize, Serialize};

use crate::{
    Graph, Weight, WeightedGraph,
    graph::{adjacency::AdjacencyLists, neighbourhood::Neighbourhood, undirected::UndirectedGraph},
    types::{Edge, Node, WeightedEdge},
};

/// Directed adjacency-list graph. Row `u` holds the heads of the arcs leaving
/// `u`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawDirectedGraph<W>",
    bound(deserialize = "W: Weight + Deserialize<'de>")
)]
pub struct DirectedGraph<W = ()> {
    adjacency: AdjacencyLists<W>,
}

#[derive(Deserialize)]
struct RawDirectedGraph<W> {
    adjacency: AdjacencyLists<W>,
}

impl<W: Weight> TryFrom<RawDirectedGraph<W>> for DirectedGraph<W> {
    type Error = String;

    fn try_from(raw: RawDirectedGraph<W>) -> Result<Self, Self::Error> {
        let adjacency = raw.adjacency;
        if adjacency.edge_count() != adjacency.arc_count() {
            return Err(format!(
                "edge count {} does not match the {} stored arcs",
                adjacency.edge_count(),
                adjacency.arc_count()
            ));
        }

        Ok(Self { adjacency })
    }
}

pub type WeightedDirectedGraph<W> = DirectedGraph<W>;

impl<W: Weight> DirectedGraph<W> {
    pub fn new() -> Self {
        Self::with_nodes(0)
    }

    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: AdjacencyLists::with_nodes(node_count),
        }
    }

    /// Builds a graph from adjacency rows, counting the arcs.
    ///
    /// Panics if a row references an unknown node, holds a self-loop or a
    /// duplicate.
    pub fn from_neighbourhoods(rows: Vec<Neighbourhood<W>>) -> Self {
        let adjacency = AdjacencyLists::from_rows(rows, 0);
        adjacency.validate();

        let edge_count = adjacency.arc_count();
        Self::from_neighbourhoods_unchecked(adjacency.into_rows(), edge_count)
    }

    pub fn from_neighbourhoods_unchecked(rows: Vec<Neighbourhood<W>>, edge_count: usize) -> Self {
        let adjacency = AdjacencyLists::from_rows(rows, edge_count);
        debug_assert_eq!(adjacency.arc_count(), edge_count);

        Self { adjacency }
    }

    pub fn from_weighted_edges(node_count: usize, edges: &[WeightedEdge<W>]) -> Self {
        let mut graph = Self::with_nodes(node_count);
        graph.add_edges(edges.iter().copied());
        graph
    }

    pub fn reset(&mut self, node_count: usize) {
        self.adjacency.reset(node_count);
    }

    pub fn adjacency(&self) -> &AdjacencyLists<W> {
        &self.adjacency
    }

    pub fn out_degrees(&self) -> Vec<usize> {
        self.degrees()
    }

    pub fn in_degrees(&self) -> Vec<usize> {
        let mut in_degrees = vec![0; self.node_count()];
        self.adjacency.arcs().for_each(|(_, to)| in_degrees[to] += 1);

        in_degrees
    }

    /// Graph with every arc flipped.
    pub fn reversed(&self) -> Self {
        let mut reversed = AdjacencyLists::with_nodes(self.node_count());
        for (from, row) in self.adjacency.rows().iter().enumerate() {
            for (to, &weight) in row.iter() {
                reversed.push_arc(to, from, weight);
            }
        }

        Self::from_neighbourhoods_unchecked(reversed.into_rows(), self.edge_count())
    }

    /// Undirected graph on the same nodes with an edge wherever an arc exists
    /// in either direction. If both directions exist, the weight of the arc
    /// leaving the smaller id is kept.
    pub fn to_undirected(&self) -> UndirectedGraph<W> {
        let mut undirected = UndirectedGraph::with_nodes(self.node_count());
        for (from, row) in self.adjacency.rows().iter().enumerate() {
            for (to, &weight) in row.iter() {
                if !undirected.has_edge(from, to) {
                    undirected.add_edge(from, to, weight);
                }
            }
        }

        undirected
    }

    pub fn subgraph<I>(&self, nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let induced = self.adjacency.induced(nodes);
        let edge_count = induced.arc_count();

        Self::from_neighbourhoods_unchecked(induced.into_rows(), edge_count)
    }

    fn assert_edge_endpoints(&self, from: Node, to: Node) {
        self.adjacency.assert_node(from);
        self.adjacency.assert_node(to);
    }
}

impl DirectedGraph<()> {
    pub fn from_adjacency(rows: Vec<Vec<Node>>) -> Self {
        Self::from_neighbourhoods(rows.into_iter().map(Neighbourhood::from).collect())
    }

    pub fn from_edges(node_count: usize, edges: &[Edge]) -> Self {
        let mut graph = Self::with_nodes(node_count);
        graph.add_edges(edges.iter().map(|&(from, to)| (from, to, ())));
        graph
    }
}

impl<W: Weight> Default for DirectedGraph<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Weight> Graph for DirectedGraph<W> {
    type Weight = W;

    fn is_directed(&self) -> bool {
        true
    }

    fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    fn has_edge(&self, from: Node, to: Node) -> bool {
        self.assert_edge_endpoints(from, to);
        self.adjacency.has_arc(from, to)
    }

    fn degree(&self, node: Node) -> usize {
        self.adjacency.assert_node(node);
        self.adjacency.degree(node)
    }

    fn neighbours(&self, node: Node) -> &[Node] {
        self.adjacency.assert_node(node);
        self.adjacency.row(node).nodes()
    }

    fn weighted_edges(&self) -> Vec<WeightedEdge<W>> {
        let mut edges: Vec<WeightedEdge<W>> = self
            .adjacency
            .rows()
            .iter()
            .enumerate()
            .flat_map(|(from, row)| row.iter().map(move |(to, &weight)| (from, to, weight)))
            .collect();
        edges.sort_unstable_by_key(|&(from, to, _)| (from, to));

        edges
    }

    fn add_node(&mut self) -> Node {
        self.adjacency.add_nodes(1).start
    }

    fn add_nodes(&mut self, count: usize) -> Range<Node> {
        self.adjacency.add_nodes(count)
    }

    fn add_edge(&mut self, from: Node, to: Node, weight: W) {
        self.assert_edge_endpoints(from, to);
        assert_ne!(from, to, "self-loop on node {} is not allowed", from);
        assert!(
            !self.adjacency.has_arc(from, to),
            "edge ({}, {}) already exists",
            from,
            to
        );

        self.adjacency.push_arc(from, to, weight);
        self.adjacency.increment_edge_count();
    }

    fn remove_edge(&mut self, from: Node, to: Node) -> W {
        self.assert_edge_endpoints(from, to);

        let weight = self
            .adjacency
            .remove_arc(from, to)
            .unwrap_or_else(|| panic!("edge ({}, {}) does not exist", from, to));
        self.adjacency.decrement_edge_count(1);

        weight
    }

    fn remove_node(&mut self, node: Node) {
        self.adjacency.assert_node(node);

        let out_degree = self.adjacency.degree(node);
        self.adjacency.decrement_edge_count(out_degree);
        let in_degree = self.adjacency.erase_and_renumber(node);
        self.adjacency.decrement_edge_count(in_degree);

        debug!(
            "Removed node {} ({} outgoing, {} incoming arcs, {} nodes left)",
            node,
            out_degree,
            in_degree,
            self.node_count()
        );
    }

    fn clear(&mut self) {
        self.adjacency.clear();
    }

    /// Triangles of the underlying undirected graph.
    fn triangle_count(&self) -> usize {
        self.to_undirected().triangle_count()
    }
}

impl<W: Weight + Num> WeightedGraph for DirectedGraph<W> {
    type Unweighted = DirectedGraph<()>;

    fn edge_weight(&self, from: Node, to: Node) -> W {
        self.assert_edge_endpoints(from, to);
        self.adjacency
            .row(from)
            .weight_of(to)
            .unwrap_or_else(|| panic!("edge ({}, {}) does not exist", from, to))
    }

    fn set_edge_weight(&mut self, from: Node, to: Node, weight: W) {
        self.assert_edge_endpoints(from, to);

        let index = self
            .adjacency
            .find_arc(from, to)
            .unwrap_or_else(|| panic!("edge ({}, {}) does not exist", from, to));
        self.adjacency.row_mut(from).set_weight_at(index, weight);
    }

    fn neighbour_weights(&self, node: Node) -> &[W] {
        self.adjacency.assert_node(node);
        self.adjacency.row(node).weights()
    }

    fn to_unweighted(&self) -> DirectedGraph<()> {
        let rows = self
            .adjacency
            .rows()
            .iter()
            .map(Neighbourhood::to_unweighted)
            .collect();

        info!(
            "Projected weighted digraph to unweighted (node_count: {}, edge_count: {})",
            self.node_count(),
            self.edge_count()
        );

        DirectedGraph::from_neighbourhoods_unchecked(rows, self.edge_count())
    }
}

use std::ops::Range;

use log::{debug, info};
use num_traits::Num;
use serde::{Deserialize, Serialize};

use crate::{
    Graph, Weight, WeightedGraph,
    graph::{adjacency::AdjacencyLists, directed::DirectedGraph, neighbourhood::Neighbourhood},
    types::{Edge, Node, WeightedEdge},
};

/// Undirected adjacency-list graph.
///
/// Every edge `{u, v}` is stored in the rows of both endpoints with the same
/// weight and counted once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawUndirectedGraph<W>",
    bound(deserialize = "W: Weight + Deserialize<'de>")
)]
pub struct UndirectedGraph<W = ()> {
    adjacency: AdjacencyLists<W>,
}

#[derive(Deserialize)]
struct RawUndirectedGraph<W> {
    adjacency: AdjacencyLists<W>,
}

impl<W: Weight> TryFrom<RawUndirectedGraph<W>> for UndirectedGraph<W> {
    type Error = String;

    fn try_from(raw: RawUndirectedGraph<W>) -> Result<Self, Self::Error> {
        let adjacency = raw.adjacency;
        check_symmetric(&adjacency)?;

        let stored = adjacency.arc_count() / 2;
        if adjacency.edge_count() != stored {
            return Err(format!(
                "edge count {} does not match the {} stored edges",
                adjacency.edge_count(),
                stored
            ));
        }

        Ok(Self { adjacency })
    }
}

/// Every entry `to` in the row of `from` has a reverse entry with the same
/// weight.
fn check_symmetric<W: Weight>(adjacency: &AdjacencyLists<W>) -> Result<(), String> {
    for (from, row) in adjacency.rows().iter().enumerate() {
        for (to, weight) in row.iter() {
            match adjacency.row(to).weight_of(from) {
                None => {
                    return Err(format!(
                        "edge ({}, {}) is missing its reverse entry",
                        from, to
                    ));
                }
                Some(reverse) if reverse != *weight => {
                    return Err(format!("edge ({}, {}) has asymmetric weights", from, to));
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

pub type WeightedUndirectedGraph<W> = UndirectedGraph<W>;

impl<W: Weight> UndirectedGraph<W> {
    pub fn new() -> Self {
        Self::with_nodes(0)
    }

    /// Creates a graph of `node_count` isolated nodes.
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: AdjacencyLists::with_nodes(node_count),
        }
    }

    /// Builds a graph from adjacency rows.
    ///
    /// Panics if a row references an unknown node, holds a self-loop or a
    /// duplicate, or if the rows are not symmetric.
    pub fn from_neighbourhoods(rows: Vec<Neighbourhood<W>>) -> Self {
        let adjacency = AdjacencyLists::from_rows(rows, 0);
        adjacency.validate();
        if let Err(message) = check_symmetric(&adjacency) {
            panic!("{}", message);
        }

        let edge_count = adjacency.arc_count() / 2;
        Self::from_neighbourhoods_unchecked(adjacency.into_rows(), edge_count)
    }

    /// Builds a graph from rows the caller vouches for, without validation.
    pub fn from_neighbourhoods_unchecked(rows: Vec<Neighbourhood<W>>, edge_count: usize) -> Self {
        let adjacency = AdjacencyLists::from_rows(rows, edge_count);
        debug_assert_eq!(adjacency.arc_count(), 2 * edge_count);

        Self { adjacency }
    }

    pub fn from_weighted_edges(node_count: usize, edges: &[WeightedEdge<W>]) -> Self {
        let mut graph = Self::with_nodes(node_count);
        graph.add_edges(edges.iter().copied());
        graph
    }

    /// Discards every edge and resizes the graph to `node_count` isolated
    /// nodes.
    pub fn reset(&mut self, node_count: usize) {
        self.adjacency.reset(node_count);
    }

    pub fn adjacency(&self) -> &AdjacencyLists<W> {
        &self.adjacency
    }

    /// Subgraph induced by `nodes`. Kept nodes are renumbered in ascending
    /// order of their ids.
    pub fn subgraph<I>(&self, nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let induced = self.adjacency.induced(nodes);
        let edge_count = induced.arc_count() / 2;

        Self {
            adjacency: AdjacencyLists::from_rows(induced.into_rows(), edge_count),
        }
    }

    /// Directed graph with two opposite arcs per edge.
    pub fn to_directed(&self) -> DirectedGraph<W> {
        DirectedGraph::from_neighbourhoods_unchecked(
            self.adjacency.rows().to_vec(),
            2 * self.edge_count(),
        )
    }

    /// Index of `to` in the row of `from` and of `from` in the row of `to`.
    fn edge_positions(&self, from: Node, to: Node) -> Option<(usize, usize)> {
        let forward = self.adjacency.find_arc(from, to)?;
        let backward = self.adjacency.find_arc(to, from)?;
        Some((forward, backward))
    }

    fn assert_edge_endpoints(&self, from: Node, to: Node) {
        self.adjacency.assert_node(from);
        self.adjacency.assert_node(to);
    }
}

impl UndirectedGraph<()> {
    pub fn from_adjacency(rows: Vec<Vec<Node>>) -> Self {
        Self::from_neighbourhoods(rows.into_iter().map(Neighbourhood::from).collect())
    }

    pub fn from_edges(node_count: usize, edges: &[Edge]) -> Self {
        let mut graph = Self::with_nodes(node_count);
        graph.add_edges(edges.iter().map(|&(from, to)| (from, to, ())));
        graph
    }
}

impl<W: Weight> Default for UndirectedGraph<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Weight> Graph for UndirectedGraph<W> {
    type Weight = W;

    fn is_directed(&self) -> bool {
        false
    }

    fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Scans the shorter of the two rows.
    fn has_edge(&self, from: Node, to: Node) -> bool {
        self.assert_edge_endpoints(from, to);

        if self.adjacency.degree(from) <= self.adjacency.degree(to) {
            self.adjacency.has_arc(from, to)
        } else {
            self.adjacency.has_arc(to, from)
        }
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
            .flat_map(|(from, row)| {
                row.iter()
                    .filter(move |&(to, _)| from < to)
                    .map(move |(to, &weight)| (from, to, weight))
            })
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
            !self.has_edge(from, to),
            "edge ({}, {}) already exists",
            from,
            to
        );

        self.adjacency.push_arc(from, to, weight);
        self.adjacency.push_arc(to, from, weight);
        self.adjacency.increment_edge_count();
    }

    fn remove_edge(&mut self, from: Node, to: Node) -> W {
        self.assert_edge_endpoints(from, to);
        assert!(
            self.has_edge(from, to),
            "edge ({}, {}) does not exist",
            from,
            to
        );

        let weight = self.adjacency.remove_arc(from, to);
        self.adjacency.remove_arc(to, from);
        self.adjacency.decrement_edge_count(1);

        weight.unwrap_or_else(|| unreachable!("edge ({}, {}) vanished", from, to))
    }

    fn remove_node(&mut self, node: Node) {
        self.adjacency.assert_node(node);

        let degree = self.adjacency.degree(node);
        self.adjacency.decrement_edge_count(degree);
        let dropped = self.adjacency.erase_and_renumber(node);
        debug_assert_eq!(dropped, degree, "asymmetric rows around node {}", node);

        debug!(
            "Removed node {} and {} incident edges ({} nodes left)",
            node,
            degree,
            self.node_count()
        );
    }

    fn clear(&mut self) {
        self.adjacency.clear();
    }

    fn triangle_count(&self) -> usize {
        let mut triangles = 0;

        for node in self.nodes() {
            let row = self.adjacency.row(node).nodes();
            for (i, &second) in row.iter().enumerate() {
                if second < node {
                    continue;
                }
                for &third in &row[i + 1..] {
                    if third > node && self.has_edge(second, third) {
                        triangles += 1;
                    }
                }
            }
        }

        triangles
    }
}

impl<W: Weight + Num> WeightedGraph for UndirectedGraph<W> {
    type Unweighted = UndirectedGraph<()>;

    fn edge_weight(&self, from: Node, to: Node) -> W {
        self.assert_edge_endpoints(from, to);

        let (row, target) = if self.adjacency.degree(from) <= self.adjacency.degree(to) {
            (from, to)
        } else {
            (to, from)
        };

        self.adjacency
            .row(row)
            .weight_of(target)
            .unwrap_or_else(|| panic!("edge ({}, {}) does not exist", from, to))
    }

    fn set_edge_weight(&mut self, from: Node, to: Node, weight: W) {
        self.assert_edge_endpoints(from, to);

        let (forward, backward) = self
            .edge_positions(from, to)
            .unwrap_or_else(|| panic!("edge ({}, {}) does not exist", from, to));

        self.adjacency.row_mut(from).set_weight_at(forward, weight);
        self.adjacency.row_mut(to).set_weight_at(backward, weight);
    }

    fn neighbour_weights(&self, node: Node) -> &[W] {
        self.adjacency.assert_node(node);
        self.adjacency.row(node).weights()
    }

    fn to_unweighted(&self) -> UndirectedGraph<()> {
        let rows = self
            .adjacency
            .rows()
            .iter()
            .map(Neighbourhood::to_unweighted)
            .collect();

        info!(
            "Projected weighted graph to unweighted (node_count: {}, edge_count: {})",
            self.node_count(),
            self.edge_count()
        );

        UndirectedGraph::from_neighbourhoods_unchecked(rows, self.edge_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> UndirectedGraph {
        UndirectedGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)])
    }

    fn weighted() -> UndirectedGraph<u32> {
        UndirectedGraph::from_weighted_edges(4, &[(0, 1, 4), (1, 2, 1), (0, 2, 7), (2, 3, 2)])
    }

    #[test]
    fn cycle_counts() {
        let graph = cycle();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.nodes().all(|node| graph.degree(node) == 2));
        assert_eq!(graph.edges(), vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
        assert!(!graph.is_directed());
        assert!(!graph.is_weighted());
    }

    #[test]
    fn has_edge_is_symmetric() {
        let graph = cycle();

        for u in graph.nodes() {
            for v in graph.nodes() {
                assert_eq!(graph.has_edge(u, v), graph.has_edge(v, u));
            }
        }
        assert!(graph.has_edge(3, 0));
        assert!(!graph.has_edge(0, 2));
    }

    #[test]
    fn remove_node_renumbers() {
        let mut graph = cycle();

        graph.remove_node(1);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges(), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn remove_edge() {
        let mut graph = cycle();

        graph.remove_edge(2, 1);

        assert_eq!(graph.edge_count(), 3);
        assert!(!graph.has_edge(1, 2));
        assert_eq!(graph.neighbours(1), &[0]);
        assert_eq!(graph.neighbours(2), &[3]);
    }

    #[test]
    #[should_panic(expected = "edge (0, 2) does not exist")]
    fn remove_missing_edge() {
        cycle().remove_edge(0, 2);
    }

    #[test]
    #[should_panic(expected = "edge (1, 0) already exists")]
    fn add_duplicate_edge() {
        cycle().add_edge(1, 0, ());
    }

    #[test]
    #[should_panic(expected = "self-loop on node 2")]
    fn add_self_loop() {
        cycle().add_edge(2, 2, ());
    }

    #[test]
    #[should_panic(expected = "node 4 is out of range")]
    fn add_edge_out_of_range() {
        cycle().add_edge(0, 4, ());
    }

    #[test]
    fn add_nodes_and_clear() {
        let mut graph = cycle();

        assert_eq!(graph.add_node(), 4);
        assert_eq!(graph.add_nodes(3), 5..8);
        assert_eq!(graph.degree(6), 0);
        assert_eq!(graph.edge_count(), 4);

        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges().is_empty());

        graph.reset(3);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn from_adjacency_counts_edges() {
        let graph = UndirectedGraph::from_adjacency(vec![vec![1, 2], vec![0], vec![0]]);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    #[should_panic(expected = "edge (0, 2) is missing its reverse entry")]
    fn from_adjacency_asymmetric() {
        UndirectedGraph::from_adjacency(vec![vec![1, 2], vec![0], vec![]]);
    }

    #[test]
    fn weights() {
        let mut graph = weighted();

        assert!(graph.is_weighted());
        assert_eq!(graph.edge_weight(1, 0), 4);
        assert_eq!(graph.edge_weight(2, 3), 2);
        assert_eq!(graph.total_weight(), 14);

        graph.set_edge_weight(2, 0, 3);
        assert_eq!(graph.edge_weight(0, 2), 3);
        assert_eq!(graph.weighted_neighbours(2).collect::<Vec<_>>(), vec![(1, 1), (0, 3), (3, 2)]);

        assert_eq!(graph.remove_edge(0, 1), 4);
        assert_eq!(
            graph.weighted_edges(),
            vec![(0, 2, 3), (1, 2, 1), (2, 3, 2)]
        );
    }

    #[test]
    #[should_panic(expected = "edge (0, 3) does not exist")]
    fn missing_edge_weight() {
        weighted().edge_weight(0, 3);
    }

    #[test]
    fn weighted_remove_node_keeps_alignment() {
        let mut graph = weighted();

        graph.remove_node(0);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weighted_edges(), vec![(0, 1, 1), (1, 2, 2)]);
        assert_eq!(graph.neighbour_weights(1), &[1, 2]);
    }

    #[test]
    fn to_unweighted() {
        let graph = weighted();

        let unweighted = graph.to_unweighted();

        assert_eq!(unweighted.edges(), graph.edges());
        assert_eq!(unweighted.edge_count(), graph.edge_count());
        assert!(!unweighted.is_weighted());
    }

    #[test]
    fn triangles_and_histogram() {
        let graph = weighted();

        assert_eq!(graph.triangle_count(), 1);
        assert_eq!(graph.degrees(), vec![2, 2, 3, 1]);
        assert_eq!(graph.degree_histogram(), vec![0, 1, 2, 1]);
        assert!(UndirectedGraph::<()>::new().degree_histogram().is_empty());
    }

    #[test]
    fn subgraph() {
        let graph = weighted();

        let subgraph = graph.subgraph([3, 2, 1]);

        assert_eq!(subgraph.node_count(), 3);
        assert_eq!(subgraph.weighted_edges(), vec![(0, 1, 1), (1, 2, 2)]);
        assert_eq!(subgraph.edge_count(), 2);
    }

    #[test]
    fn to_directed() {
        let directed = cycle().to_directed();

        assert!(directed.is_directed());
        assert_eq!(directed.edge_count(), 8);
        assert!(directed.has_edge(0, 3) && directed.has_edge(3, 0));
    }

    #[test]
    fn serde_json() {
        let graph = weighted();

        let json = serde_json::to_string(&graph).unwrap();
        let restored: UndirectedGraph<u32> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, graph);
    }

    fn deserialize_error(json: &str) -> String {
        serde_json::from_str::<UndirectedGraph<u32>>(json)
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn deserialize_rejects_broken_rows() {
        let misaligned = r#"{"adjacency":{"rows":[{"nodes":[1,1],"weights":[3]},{"nodes":[],"weights":[]}],"edge_count":7}}"#;
        assert!(deserialize_error(misaligned).contains("row holds 2 neighbours but 1 weights"));

        let parallel = r#"{"adjacency":{"rows":[{"nodes":[1,1],"weights":[3,3]},{"nodes":[0,0],"weights":[3,3]}],"edge_count":2}}"#;
        assert!(deserialize_error(parallel).contains("parallel edges in the row of node 0"));
    }

    #[test]
    fn deserialize_rejects_asymmetry() {
        let one_sided = r#"{"adjacency":{"rows":[{"nodes":[1],"weights":[3]},{"nodes":[],"weights":[]}],"edge_count":1}}"#;
        assert!(deserialize_error(one_sided).contains("edge (0, 1) is missing its reverse entry"));

        let uneven = r#"{"adjacency":{"rows":[{"nodes":[1],"weights":[3]},{"nodes":[0],"weights":[4]}],"edge_count":1}}"#;
        assert!(deserialize_error(uneven).contains("edge (0, 1) has asymmetric weights"));
    }

    #[test]
    fn deserialize_rejects_wrong_edge_count() {
        let json = r#"{"adjacency":{"rows":[{"nodes":[1],"weights":[3]},{"nodes":[0],"weights":[3]}],"edge_count":7}}"#;

        assert!(deserialize_error(json).contains("edge count 7 does not match the 1 stored edges"));
    }
}

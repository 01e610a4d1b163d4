use std::{error::Error, fmt::Debug, fmt::Display, io, ops::Range};

use num_traits::{Num, Zero};
use ordered_float::OrderedFloat;

use types::{Edge, Node, WeightedEdge};

#[macro_use]
mod macros;

pub mod algorithms;
pub mod graph;
pub mod input;
pub mod types;

pub use graph::{
    Path,
    directed::{DirectedGraph, WeightedDirectedGraph},
    neighbourhood::Neighbourhood,
    undirected::{UndirectedGraph, WeightedUndirectedGraph},
};

#[derive(Debug)]
pub enum GraphError {
    NodeNotFound(usize),
    Io(io::Error),
    Parse { line: usize, message: String },
}

impl Error for GraphError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(node) => write!(f, "node_id: {} not found in graph", node),
            Self::Io(err) => write!(f, "i/o error: {}", err),
            Self::Parse { line, message } => write!(f, "line {}: {}", line, message),
        }
    }
}

impl From<io::Error> for GraphError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Value stored on every edge.
///
/// `()` marks an unweighted graph. Numeric types (and [`OrderedFloat`], which
/// gives floats the total order Dijkstra's algorithm needs) are weights.
pub trait Weight: Copy + Debug + PartialEq {
    const WEIGHTED: bool;

    /// Parses the optional third column of an edge-list line.
    fn parse_token(token: Option<&str>) -> Result<Self, String>;

    fn to_token(&self) -> Option<String>;
}

impl Weight for () {
    const WEIGHTED: bool = false;

    fn parse_token(token: Option<&str>) -> Result<Self, String> {
        match token {
            None => Ok(()),
            Some(token) => Err(format!("unexpected weight '{}' for unweighted edge", token)),
        }
    }

    fn to_token(&self) -> Option<String> {
        None
    }
}

impl_weight!(
    u8,
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize,
    f32,
    f64,
    OrderedFloat<f32>,
    OrderedFloat<f64>,
);

/// Read and mutation surface shared by every adjacency-list graph.
///
/// Invalid node ids, self-loops, duplicate insertions and removal of absent
/// edges are caller bugs: the methods panic before touching the graph.
pub trait Graph {
    type Weight: Weight;

    fn is_directed(&self) -> bool;

    fn is_weighted(&self) -> bool {
        Self::Weight::WEIGHTED
    }

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn has_node(&self, node: Node) -> bool {
        node < self.node_count()
    }

    fn has_edge(&self, from: Node, to: Node) -> bool;

    /// Number of neighbours of `node`; the out-degree for directed graphs.
    fn degree(&self, node: Node) -> usize;

    /// Neighbours of `node` in insertion order.
    fn neighbours(&self, node: Node) -> &[Node];

    fn nodes(&self) -> Range<Node> {
        0..self.node_count()
    }

    /// All edges with their values, sorted by `(from, to)`.
    fn weighted_edges(&self) -> Vec<WeightedEdge<Self::Weight>>;

    /// All edges sorted lexicographically. Undirected edges appear once as
    /// `(u, v)` with `u < v`.
    fn edges(&self) -> Vec<Edge> {
        self.weighted_edges()
            .into_iter()
            .map(|(from, to, _)| (from, to))
            .collect()
    }

    fn add_node(&mut self) -> Node;

    /// Appends `count` isolated nodes and returns their ids.
    fn add_nodes(&mut self, count: usize) -> Range<Node>;

    fn add_edge(&mut self, from: Node, to: Node, weight: Self::Weight);

    fn add_edges<I>(&mut self, edges: I)
    where
        Self: Sized,
        I: IntoIterator<Item = WeightedEdge<Self::Weight>>,
    {
        for (from, to, weight) in edges {
            self.add_edge(from, to, weight);
        }
    }

    /// Removes the edge and returns the value it carried.
    fn remove_edge(&mut self, from: Node, to: Node) -> Self::Weight;

    fn remove_edges<I>(&mut self, edges: I)
    where
        Self: Sized,
        I: IntoIterator<Item = Edge>,
    {
        for (from, to) in edges {
            self.remove_edge(from, to);
        }
    }

    /// Removes `node` with all incident edges and renumbers every node with
    /// a larger id down by one.
    fn remove_node(&mut self, node: Node);

    /// Removes every node and edge.
    fn clear(&mut self);

    fn triangle_count(&self) -> usize;

    fn degrees(&self) -> Vec<usize> {
        self.nodes().map(|node| self.degree(node)).collect()
    }

    /// `histogram[k]` is the number of nodes with degree `k`.
    fn degree_histogram(&self) -> Vec<usize> {
        let degrees = self.degrees();
        let Some(max_degree) = degrees.iter().copied().max() else {
            return Vec::new();
        };

        let mut histogram = vec![0; max_degree + 1];
        degrees.into_iter().for_each(|degree| histogram[degree] += 1);

        histogram
    }
}

/// Graphs whose edges carry a numeric weight.
pub trait WeightedGraph: Graph<Weight: Num> {
    type Unweighted: Graph<Weight = ()>;

    /// Weight of the edge `(from, to)`. Panics if the edge does not exist.
    fn edge_weight(&self, from: Node, to: Node) -> Self::Weight;

    fn set_edge_weight(&mut self, from: Node, to: Node, weight: Self::Weight);

    /// Weights of the edges leaving `node`, index-aligned with
    /// [`Graph::neighbours`].
    fn neighbour_weights(&self, node: Node) -> &[Self::Weight];

    fn weighted_neighbours(&self, node: Node) -> impl Iterator<Item = (Node, Self::Weight)> + '_ {
        self.neighbours(node)
            .iter()
            .copied()
            .zip(self.neighbour_weights(node).iter().copied())
    }

    fn total_weight(&self) -> Self::Weight {
        self.weighted_edges()
            .into_iter()
            .fold(Self::Weight::zero(), |total, (_, _, weight)| total + weight)
    }

    /// Same connectivity without the weights.
    fn to_unweighted(&self) -> Self::Unweighted;
}

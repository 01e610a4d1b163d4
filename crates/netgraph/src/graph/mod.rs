use num_traits::Num;
use serde::{Deserialize, Serialize};

use crate::types::Node;

pub mod adjacency;
pub mod directed;
pub mod neighbourhood;
pub mod undirected;

/// A walk through the graph together with its total cost.
///
/// For hop-count paths `W = ()` and the cost is implied by [`Path::hops`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path<W = ()> {
    nodes: Vec<Node>,
    cost: W,
}

impl<W> Path<W> {
    pub fn new(nodes: Vec<Node>, cost: W) -> Self {
        assert!(!nodes.is_empty(), "a path contains at least its source");
        Self { nodes, cost }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn source(&self) -> Node {
        self.nodes[0]
    }

    pub fn target(&self) -> Node {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn cost(&self) -> &W {
        &self.cost
    }
}

impl Path<()> {
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self::new(nodes, ())
    }
}

impl<W: Num + Copy> Path<W> {
    /// Appends `node`, reached over an edge of weight `weight`.
    pub fn push(&mut self, node: Node, weight: W) {
        self.nodes.push(node);
        self.cost = self.cost + weight;
    }
}

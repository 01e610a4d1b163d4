use serde::{Deserialize, Serialize};

use crate::types::Node;

/// Adjacency row of a single node.
///
/// Neighbour ids and edge values live in two parallel vectors that are only
/// ever changed together, so `weights()[i]` always belongs to `nodes()[i]`.
/// For unweighted graphs `W = ()` and the weight vector holds no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawNeighbourhood<W>",
    bound(deserialize = "W: Deserialize<'de>")
)]
pub struct Neighbourhood<W> {
    nodes: Vec<Node>,
    weights: Vec<W>,
}

#[derive(Deserialize)]
struct RawNeighbourhood<W> {
    nodes: Vec<Node>,
    weights: Vec<W>,
}

impl<W> TryFrom<RawNeighbourhood<W>> for Neighbourhood<W> {
    type Error = String;

    fn try_from(raw: RawNeighbourhood<W>) -> Result<Self, Self::Error> {
        if raw.nodes.len() != raw.weights.len() {
            return Err(format!(
                "row holds {} neighbours but {} weights",
                raw.nodes.len(),
                raw.weights.len()
            ));
        }

        Ok(Self {
            nodes: raw.nodes,
            weights: raw.weights,
        })
    }
}

impl<W> Neighbourhood<W> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn weights(&self) -> &[W] {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (Node, &W)> + '_ {
        self.nodes.iter().copied().zip(self.weights.iter())
    }

    /// Index of `node` in this row.
    pub fn position(&self, node: Node) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    pub fn contains(&self, node: Node) -> bool {
        self.nodes.contains(&node)
    }

    pub fn push(&mut self, node: Node, weight: W) {
        self.nodes.push(node);
        self.weights.push(weight);
    }

    /// Removes the entry at `index`, keeping the order of the others.
    pub fn remove_at(&mut self, index: usize) -> (Node, W) {
        (self.nodes.remove(index), self.weights.remove(index))
    }

    /// Removes `node` from this row and returns the weight it carried.
    pub fn remove(&mut self, node: Node) -> Option<W> {
        let index = self.position(node)?;
        Some(self.remove_at(index).1)
    }

    pub fn weight_at(&self, index: usize) -> &W {
        &self.weights[index]
    }

    pub fn set_weight_at(&mut self, index: usize, weight: W) {
        self.weights[index] = weight;
    }

    /// Drops every reference to `removed` and shifts every id above it down by
    /// one. Returns the number of dropped references.
    pub fn drop_and_renumber(&mut self, removed: Node) -> usize {
        let mut write = 0;
        for read in 0..self.nodes.len() {
            let target = self.nodes[read];
            if target == removed {
                continue;
            }

            self.nodes[write] = if target > removed { target - 1 } else { target };
            self.weights.swap(write, read);
            write += 1;
        }

        let dropped = self.nodes.len() - write;
        self.nodes.truncate(write);
        self.weights.truncate(write);

        dropped
    }

    /// Keeps the entries whose node `map` sends to `Some`, relabelled.
    pub fn filter_map_nodes<F>(&self, map: F) -> Neighbourhood<W>
    where
        F: Fn(Node) -> Option<Node>,
        W: Clone,
    {
        self.iter()
            .filter_map(|(node, weight)| map(node).map(|node| (node, weight.clone())))
            .collect()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.weights.clear();
    }
}

impl<W: Copy> Neighbourhood<W> {
    pub fn weight_of(&self, node: Node) -> Option<W> {
        self.position(node).map(|index| self.weights[index])
    }

    pub fn to_unweighted(&self) -> Neighbourhood<()> {
        Neighbourhood {
            nodes: self.nodes.clone(),
            weights: vec![(); self.nodes.len()],
        }
    }
}

impl<W> Default for Neighbourhood<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> FromIterator<(Node, W)> for Neighbourhood<W> {
    fn from_iter<T: IntoIterator<Item = (Node, W)>>(iter: T) -> Self {
        let (nodes, weights) = iter.into_iter().unzip();
        Self { nodes, weights }
    }
}

impl From<Vec<Node>> for Neighbourhood<()> {
    fn from(nodes: Vec<Node>) -> Self {
        let weights = vec![(); nodes.len()];
        Self { nodes, weights }
    }
}

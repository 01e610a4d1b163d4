use bit_vec::BitVec;

use crate::types::Node;

/// Visited bits of a single traversal, one per node of the traversed graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visited {
    bits: BitVec,
}

impl Visited {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            bits: BitVec::from_elem(node_count, false),
        }
    }

    /// Marks `node` and returns `true` if it was not marked before.
    #[inline]
    pub(crate) fn visit(&mut self, node: Node) -> bool {
        if self.bits[node] {
            false
        } else {
            self.bits.set(node, true);
            true
        }
    }

    #[inline]
    pub fn contains(&self, node: Node) -> bool {
        self.bits.get(node).unwrap_or(false)
    }

    /// Number of visited nodes.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&bit| bit).count()
    }

    /// Visited nodes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(node, bit)| bit.then_some(node))
    }

    /// Number of nodes of the traversed graph.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

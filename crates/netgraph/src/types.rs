/// Dense, zero-based node id.
///
/// Ids are positions, not handles: removing node `k` shifts every id greater
/// than `k` down by one.
pub type Node = usize;

/// An edge `(from, to)`. Undirected graphs report each edge once, smaller
/// endpoint first.
pub type Edge = (Node, Node);

pub type WeightedEdge<W> = (Node, Node, W);

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{graph::neighbourhood::Neighbourhood, types::Node};

/// Storage shared by every graph variant: one [`Neighbourhood`] per node and
/// the number of edges.
///
/// The edge count is maintained by the owning variant, since an undirected
/// edge occupies two rows and a directed arc one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawAdjacencyLists<W>",
    bound(deserialize = "W: Deserialize<'de>")
)]
pub struct AdjacencyLists<W> {
    rows: Vec<Neighbourhood<W>>,
    edge_count: usize,
}

#[derive(Deserialize)]
struct RawAdjacencyLists<W> {
    rows: Vec<Neighbourhood<W>>,
    edge_count: usize,
}

/// Checks the rows only. The edge count depends on the owning variant and is
/// checked there.
impl<W> TryFrom<RawAdjacencyLists<W>> for AdjacencyLists<W> {
    type Error = String;

    fn try_from(raw: RawAdjacencyLists<W>) -> Result<Self, Self::Error> {
        let adjacency = Self::from_rows(raw.rows, raw.edge_count);
        adjacency.check_rows()?;

        Ok(adjacency)
    }
}

impl<W> AdjacencyLists<W> {
    pub fn with_nodes(node_count: usize) -> Self {
        let mut rows = Vec::with_capacity(node_count);
        rows.resize_with(node_count, Neighbourhood::new);

        Self {
            rows,
            edge_count: 0,
        }
    }

    pub(crate) fn from_rows(rows: Vec<Neighbourhood<W>>, edge_count: usize) -> Self {
        Self { rows, edge_count }
    }

    pub(crate) fn into_rows(self) -> Vec<Neighbourhood<W>> {
        self.rows
    }

    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Total number of row entries.
    pub fn arc_count(&self) -> usize {
        self.rows.iter().map(Neighbourhood::len).sum()
    }

    pub(crate) fn increment_edge_count(&mut self) {
        self.edge_count += 1;
    }

    pub(crate) fn decrement_edge_count(&mut self, by: usize) {
        self.edge_count -= by;
    }

    pub fn has_node(&self, node: Node) -> bool {
        node < self.rows.len()
    }

    pub fn assert_node(&self, node: Node) {
        assert!(
            self.has_node(node),
            "node {} is out of range for a graph with {} nodes",
            node,
            self.rows.len()
        );
    }

    pub fn rows(&self) -> &[Neighbourhood<W>] {
        &self.rows
    }

    pub fn row(&self, node: Node) -> &Neighbourhood<W> {
        &self.rows[node]
    }

    pub(crate) fn row_mut(&mut self, node: Node) -> &mut Neighbourhood<W> {
        &mut self.rows[node]
    }

    pub fn degree(&self, node: Node) -> usize {
        self.rows[node].len()
    }

    /// Position of `to` in the row of `from`.
    pub fn find_arc(&self, from: Node, to: Node) -> Option<usize> {
        self.rows[from].position(to)
    }

    pub fn has_arc(&self, from: Node, to: Node) -> bool {
        self.rows[from].contains(to)
    }

    pub(crate) fn push_arc(&mut self, from: Node, to: Node, weight: W) {
        self.rows[from].push(to, weight);
    }

    pub(crate) fn remove_arc(&mut self, from: Node, to: Node) -> Option<W> {
        self.rows[from].remove(to)
    }

    pub fn add_nodes(&mut self, count: usize) -> Range<Node> {
        let first = self.rows.len();
        self.rows.resize_with(first + count, Neighbourhood::new);

        first..self.rows.len()
    }

    /// Erases the row of `node`, then drops every reference to it from the
    /// remaining rows and renumbers larger ids. Returns the number of
    /// references dropped from the remaining rows.
    ///
    /// The caller must have already adjusted the edge count for the arcs
    /// leaving `node`.
    pub(crate) fn erase_and_renumber(&mut self, node: Node) -> usize {
        self.rows.remove(node);
        self.rows
            .iter_mut()
            .map(|row| row.drop_and_renumber(node))
            .sum()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.edge_count = 0;
    }

    pub fn reset(&mut self, node_count: usize) {
        self.rows.clear();
        self.rows.resize_with(node_count, Neighbourhood::new);
        self.edge_count = 0;
    }

    /// Every `(from, to)` pair stored in the rows, in row order.
    pub fn arcs(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(from, row)| row.nodes().iter().map(move |&to| (from, to)))
    }

    /// Rows of the subgraph induced by `nodes`, renumbered in ascending order
    /// of the kept ids. The edge count of the result is left at zero.
    pub(crate) fn induced<I>(&self, nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
        W: Clone,
    {
        let mut kept: Vec<Node> = nodes.into_iter().inspect(|&n| self.assert_node(n)).collect();
        kept.sort_unstable();
        kept.dedup();

        let mut relabel = vec![None; self.rows.len()];
        kept.iter()
            .enumerate()
            .for_each(|(new_id, &old_id)| relabel[old_id] = Some(new_id));

        let rows = kept
            .iter()
            .map(|&old_id| self.rows[old_id].filter_map_nodes(|n| relabel[n]))
            .collect();

        Self::from_rows(rows, 0)
    }

    /// Every row holds in-range, distinct, non-self neighbours.
    pub(crate) fn check_rows(&self) -> Result<(), String> {
        for (node, row) in self.rows.iter().enumerate() {
            let mut seen = row.nodes().to_vec();
            seen.sort_unstable();

            for &neighbour in &seen {
                if !self.has_node(neighbour) {
                    return Err(format!(
                        "node {} is out of range for a graph with {} nodes",
                        neighbour,
                        self.rows.len()
                    ));
                }
                if neighbour == node {
                    return Err(format!("self-loop on node {}", node));
                }
            }

            if seen.windows(2).any(|pair| pair[0] == pair[1]) {
                return Err(format!("parallel edges in the row of node {}", node));
            }
        }

        Ok(())
    }

    pub(crate) fn validate(&self) {
        if let Err(message) = self.check_rows() {
            panic!("{}", message);
        }
    }
}

impl<W> Default for AdjacencyLists<W> {
    fn default() -> Self {
        Self::with_nodes(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> AdjacencyLists<()> {
        AdjacencyLists::from_rows(
            vec![
                Neighbourhood::from(vec![1, 3]),
                Neighbourhood::from(vec![2]),
                Neighbourhood::from(vec![0, 3]),
                Neighbourhood::from(vec![]),
            ],
            5,
        )
    }

    #[test]
    fn erase_and_renumber() {
        let mut adjacency = setup();

        let dropped = adjacency.erase_and_renumber(1);

        assert_eq!(dropped, 1);
        assert_eq!(adjacency.node_count(), 3);
        assert_eq!(adjacency.row(0).nodes(), &[2]);
        assert_eq!(adjacency.row(1).nodes(), &[0, 2]);
        assert!(adjacency.row(2).is_empty());
    }

    #[test]
    fn arcs() {
        let adjacency = setup();

        assert_eq!(
            adjacency.arcs().collect::<Vec<_>>(),
            vec![(0, 1), (0, 3), (1, 2), (2, 0), (2, 3)]
        );
        assert_eq!(adjacency.arc_count(), 5);
    }

    #[test]
    fn induced() {
        let adjacency = setup();

        let induced = adjacency.induced([3, 0, 2, 0]);

        assert_eq!(induced.node_count(), 3);
        assert_eq!(induced.row(0).nodes(), &[2]);
        assert_eq!(induced.row(1).nodes(), &[0, 2]);
        assert!(induced.row(2).is_empty());
    }

    #[test]
    fn add_nodes() {
        let mut adjacency = setup();

        assert_eq!(adjacency.add_nodes(2), 4..6);
        assert_eq!(adjacency.node_count(), 6);
        assert_eq!(adjacency.degree(5), 0);
    }

    #[test]
    #[should_panic(expected = "node 7 is out of range")]
    fn assert_node() {
        setup().assert_node(7);
    }

    #[test]
    #[should_panic(expected = "parallel edges")]
    fn validate_parallel_edges() {
        AdjacencyLists::from_rows(
            vec![Neighbourhood::from(vec![1, 1]), Neighbourhood::from(vec![])],
            2,
        )
        .validate();
    }

    #[test]
    fn deserialize_checks_rows() {
        let err = serde_json::from_str::<AdjacencyLists<()>>(
            r#"{"rows":[{"nodes":[0],"weights":[null]}],"edge_count":0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("self-loop on node 0"), "{}", err);

        let err = serde_json::from_str::<AdjacencyLists<()>>(
            r#"{"rows":[{"nodes":[3],"weights":[null]}],"edge_count":0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("node 3 is out of range"), "{}", err);
    }
}

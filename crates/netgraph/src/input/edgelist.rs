//! Plain-text edge lists: one edge per line, `source target [weight]`,
//! separated by whitespace. Blank lines and lines starting with `#` are
//! skipped.

use std::{fs, io::Write, iter::Copied, slice::Iter, str::FromStr};

use log::{info, warn};

use crate::{
    DirectedGraph, Graph, GraphError, UndirectedGraph, Weight,
    types::{Node, WeightedEdge},
};

/// Largest node id an edge list may mention. Ids are positional, so every
/// id below the largest one gets a node of its own.
pub const MAX_NODE_ID: Node = u32::MAX as Node;

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeList<W> {
    edges: Box<[WeightedEdge<W>]>,
    node_count: usize,
}

impl<W: Weight> EdgeList<W> {
    /// Panics if an edge mentions a node above [`MAX_NODE_ID`].
    pub fn new(edges: Vec<WeightedEdge<W>>) -> Self {
        let node_count = edges
            .iter()
            .map(|&(s, t, _)| s.max(t))
            .max()
            .map_or(0, |id| match check_node_id(id).map(|id| id.checked_add(1)) {
                Ok(Some(count)) => count,
                Ok(None) => panic!("node id {} leaves no room for a node count", id),
                Err(message) => panic!("{}", message),
            });

        Self {
            edges: edges.into_boxed_slice(),
            node_count,
        }
    }

    /// Loads an edge list from a file.
    pub fn read(path: impl AsRef<std::path::Path>) -> Result<Self, GraphError> {
        let content = fs::read_to_string(path.as_ref())?;
        let edge_list = Self::try_from(content.as_str())?;

        info!(
            "read {} edges over {} nodes from {}",
            edge_list.len(),
            edge_list.node_count(),
            path.as_ref().display()
        );

        Ok(edge_list)
    }

    /// Largest node id plus one, 0 for an empty list.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn max_node_id(&self) -> Option<Node> {
        self.node_count.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> Copied<Iter<'_, WeightedEdge<W>>> {
        self.edges.iter().copied()
    }

    /// Builds an undirected graph. Self-loops and repeated edges (in either
    /// orientation) are skipped; the first occurrence wins.
    pub fn into_undirected(self) -> UndirectedGraph<W> {
        let mut graph = UndirectedGraph::with_nodes(self.node_count);
        let skipped = fill(&mut graph, &self.edges);

        info!(
            "built undirected graph with {} nodes and {} edges ({} input edges skipped)",
            graph.node_count(),
            graph.edge_count(),
            skipped
        );

        graph
    }

    /// Builds a directed graph. Self-loops and repeated arcs are skipped; the
    /// first occurrence wins.
    pub fn into_directed(self) -> DirectedGraph<W> {
        let mut graph = DirectedGraph::with_nodes(self.node_count);
        let skipped = fill(&mut graph, &self.edges);

        info!(
            "built directed graph with {} nodes and {} arcs ({} input edges skipped)",
            graph.node_count(),
            graph.edge_count(),
            skipped
        );

        graph
    }
}

fn fill<G: Graph>(graph: &mut G, edges: &[WeightedEdge<G::Weight>]) -> usize {
    let mut skipped = 0;

    for &(source, target, weight) in edges {
        if source == target {
            warn!("skipping self-loop on node {}", source);
            skipped += 1;
        } else if graph.has_edge(source, target) {
            warn!("skipping repeated edge ({}, {})", source, target);
            skipped += 1;
        } else {
            graph.add_edge(source, target, weight);
        }
    }

    skipped
}

fn check_node_id(id: Node) -> Result<Node, String> {
    if id > MAX_NODE_ID {
        return Err(format!(
            "node id {} exceeds the largest supported id {}",
            id, MAX_NODE_ID
        ));
    }

    Ok(id)
}

fn parse_node(token: Option<&str>, missing: &str) -> Result<Node, String> {
    let token = token.ok_or(missing)?;
    let id = Node::from_str(token).map_err(|e| format!("invalid node id '{}': {}", token, e))?;
    check_node_id(id)
}

fn parse_line<W: Weight>(line: &str) -> Result<WeightedEdge<W>, String> {
    let mut tokens = line.split_whitespace();

    let source = parse_node(tokens.next(), "No source found!")?;
    let target = parse_node(tokens.next(), "No target found!")?;
    let weight = W::parse_token(tokens.next())?;

    if let Some(token) = tokens.next() {
        return Err(format!("unexpected token '{}'", token));
    }

    Ok((source, target, weight))
}

impl<W: Weight> TryFrom<&str> for EdgeList<W> {
    type Error = GraphError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut result = vec![];

        for (index, line) in value.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let edge = parse_line(line).map_err(|message| GraphError::Parse {
                line: index + 1,
                message,
            })?;
            result.push(edge);
        }

        Ok(EdgeList::new(result))
    }
}

impl<W: Weight> FromStr for EdgeList<W> {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Writes every edge of `graph` in the format [`EdgeList`] parses, weights
/// included for weighted graphs. Isolated nodes above the largest connected
/// id are not representable and get lost.
pub fn write_edge_list<G: Graph>(graph: &G, mut writer: impl Write) -> Result<(), GraphError> {
    for (source, target, weight) in graph.weighted_edges() {
        match weight.to_token() {
            Some(weight) => writeln!(writer, "{} {} {}", source, target, weight)?,
            None => writeln!(writer, "{} {}", source, target)?,
        }
    }
    writer.flush()?;

    Ok(())
}

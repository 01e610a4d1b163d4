use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    Graph, UndirectedGraph, Weight,
    algorithms::search::{bfs, hooks},
    types::Node,
};

/// Partition of the nodes of a graph into components.
///
/// Components are numbered in ascending order of their smallest member, so
/// node 0 is always in component 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    labels: Vec<usize>,
    sizes: Vec<usize>,
}

impl Components {
    /// Builds the partition from arbitrary labels, renumbering them by
    /// smallest member.
    pub(crate) fn from_labels(raw: &[usize]) -> Self {
        let mut renumber = vec![None; raw.len()];
        let mut labels = Vec::with_capacity(raw.len());
        let mut sizes = Vec::new();

        for &label in raw {
            let component = *renumber[label].get_or_insert_with(|| {
                sizes.push(0);
                sizes.len() - 1
            });
            sizes[component] += 1;
            labels.push(component);
        }

        Self { labels, sizes }
    }

    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    pub fn label(&self, node: Node) -> usize {
        self.labels[node]
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn size(&self, component: usize) -> usize {
        self.sizes[component]
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn same_component(&self, u: Node, v: Node) -> bool {
        self.labels[u] == self.labels[v]
    }

    /// Members of every component, each in ascending order.
    pub fn groups(&self) -> Vec<Vec<Node>> {
        let mut groups: Vec<Vec<Node>> = self
            .sizes
            .iter()
            .map(|&size| Vec::with_capacity(size))
            .collect();

        for (node, &label) in self.labels.iter().enumerate() {
            groups[label].push(node);
        }

        groups
    }

    /// Label of the largest component; the smaller label wins ties.
    pub fn largest(&self) -> Option<usize> {
        self.sizes
            .iter()
            .enumerate()
            .max_by(|(a, size_a), (b, size_b)| size_a.cmp(size_b).then(b.cmp(a)))
            .map(|(label, _)| label)
    }
}

pub fn connected_components<W: Weight>(graph: &UndirectedGraph<W>) -> Components {
    const UNLABELED: usize = usize::MAX;

    let mut labels = vec![UNLABELED; graph.node_count()];
    let mut count = 0;

    for start in graph.nodes() {
        if labels[start] != UNLABELED {
            continue;
        }

        bfs(
            graph,
            start,
            hooks::never,
            |node| labels[node] = count,
            hooks::ignore_neighbour,
        );
        count += 1;
    }

    debug!(
        "found {} connected components in a graph with {} nodes",
        count,
        graph.node_count()
    );

    Components::from_labels(&labels)
}

pub fn is_connected<W: Weight>(graph: &UndirectedGraph<W>) -> bool {
    match graph.nodes().next() {
        None => true,
        Some(source) => bfs(
            graph,
            source,
            hooks::never,
            hooks::ignore,
            hooks::ignore_neighbour,
        )
        .count()
            == graph.node_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles_and_a_loner() -> UndirectedGraph {
        UndirectedGraph::from_edges(
            7,
            &[(0, 4), (4, 6), (6, 0), (1, 2), (2, 5), (5, 1)],
        )
    }

    #[test]
    fn components() {
        let components = connected_components(&two_triangles_and_a_loner());

        assert_eq!(components.count(), 3);
        assert_eq!(components.labels(), &[0, 1, 1, 2, 0, 1, 0]);
        assert_eq!(components.sizes(), &[3, 3, 1]);
        assert_eq!(
            components.groups(),
            vec![vec![0, 4, 6], vec![1, 2, 5], vec![3]]
        );
        assert_eq!(components.largest(), Some(0));
        assert!(components.same_component(2, 5));
        assert!(!components.same_component(0, 3));
    }

    #[test]
    fn connectivity() {
        assert!(!is_connected(&two_triangles_and_a_loner()));
        assert!(is_connected(&UndirectedGraph::from_edges(3, &[(0, 2), (2, 1)])));
        assert!(is_connected(&UndirectedGraph::<()>::new()));
    }

    #[test]
    fn empty_graph() {
        let components = connected_components(&UndirectedGraph::<()>::new());

        assert_eq!(components.count(), 0);
        assert_eq!(components.largest(), None);
        assert!(components.groups().is_empty());
    }

    #[test]
    fn renumber_by_smallest_member() {
        let components = Components::from_labels(&[2, 0, 2, 1]);

        assert_eq!(components.labels(), &[0, 1, 0, 2]);
        assert_eq!(components.sizes(), &[2, 1, 1]);
    }
}

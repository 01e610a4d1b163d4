use log::{debug, info};

use crate::{DirectedGraph, Graph, Weight, algorithms::components::Components, types::Node};

#[derive(Clone, Copy, Debug)]
struct NodeData {
    index: Option<usize>,
    lowlink: usize,
    on_stack: bool,
}

struct TarjanSccData {
    index: usize,
    nodes: Vec<NodeData>,
    stack: Vec<Node>,
    sccs: Vec<Vec<Node>>,
}

impl TarjanSccData {
    fn new(node_count: usize) -> Self {
        TarjanSccData {
            index: 0,
            nodes: vec![
                NodeData {
                    index: None,
                    lowlink: 0,
                    on_stack: false,
                };
                node_count
            ],
            stack: Vec::new(),
            sccs: Vec::new(),
        }
    }

    fn run<W: Weight>(&mut self, g: &DirectedGraph<W>) {
        info!("SCC for graph with {} nodes", g.node_count());

        for v in g.nodes() {
            if self.nodes[v].index.is_none() {
                self.visit(g, v);
            }
        }
    }

    fn open(&mut self, v: Node) {
        self.nodes[v] = NodeData {
            index: Some(self.index),
            lowlink: self.index,
            on_stack: true,
        };
        self.index += 1;
        self.stack.push(v);
    }

    /// Iterative depth-first visit; each call-stack frame is a node and the
    /// position of the next out-neighbour to look at.
    fn visit<W: Weight>(&mut self, g: &DirectedGraph<W>, root: Node) {
        let mut call_stack = vec![(root, 0)];
        self.open(root);

        while let Some(&mut (v, ref mut next)) = call_stack.last_mut() {
            if let Some(&w) = g.neighbours(v).get(*next) {
                *next += 1;

                match self.nodes[w].index {
                    None => {
                        self.open(w);
                        call_stack.push((w, 0));
                    }
                    Some(index) if self.nodes[w].on_stack => {
                        self.nodes[v].lowlink = self.nodes[v].lowlink.min(index);
                    }
                    // w belongs to an SCC that is already complete.
                    Some(_) => {}
                }
                continue;
            }

            call_stack.pop();
            if let Some(&(parent, _)) = call_stack.last() {
                self.nodes[parent].lowlink = self.nodes[parent].lowlink.min(self.nodes[v].lowlink);
            }

            if Some(self.nodes[v].lowlink) == self.nodes[v].index {
                let mut scc = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.nodes[w].on_stack = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }

                debug!("closed SCC of size {} rooted at {}", scc.len(), v);
                self.sccs.push(scc);
            }
        }
    }
}

/// Strongly connected components in reverse topological order of the
/// condensation: no arc leaves a component towards a later one.
pub trait TarjanScc {
    fn tarjan_scc(&self) -> Vec<Vec<Node>>;
}

impl<W: Weight> TarjanScc for DirectedGraph<W> {
    fn tarjan_scc(&self) -> Vec<Vec<Node>> {
        let mut tarjan_scc = TarjanSccData::new(self.node_count());

        tarjan_scc.run(self);

        tarjan_scc.sccs
    }
}

/// Strongly connected components as a [`Components`] partition.
pub fn strongly_connected_components<W: Weight>(graph: &DirectedGraph<W>) -> Components {
    let mut labels = vec![0; graph.node_count()];
    for (label, scc) in graph.tarjan_scc().iter().enumerate() {
        for &node in scc {
            labels[node] = label;
        }
    }

    Components::from_labels(&labels)
}

use std::fmt::{Display, Formatter, Result};

use netgraph::types::Node;
use serde::Serialize;

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub directed: bool,
    pub weighted: bool,
    pub nodes: usize,
    pub edges: usize,
    pub triangles: usize,
    pub components: usize,
    pub largest_component: usize,
    pub degree_histogram: Vec<usize>,
    pub total_weight: Option<f64>,
}

impl Display for InfoReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "directed: \t {}", self.directed)?;
        writeln!(f, "weighted: \t {}", self.weighted)?;
        writeln!(f, "nodes: \t\t {}", self.nodes)?;
        writeln!(f, "edges: \t\t {}", self.edges)?;
        writeln!(f, "triangles: \t {}", self.triangles)?;
        writeln!(
            f,
            "components: \t {} (largest has {} nodes)",
            self.components, self.largest_component
        )?;
        if let Some(total_weight) = self.total_weight {
            writeln!(f, "total weight: \t {}", total_weight)?;
        }
        writeln!(f, "degree \t count")?;
        for (degree, count) in self.degree_histogram.iter().enumerate() {
            if *count > 0 {
                writeln!(f, "{} \t {}", degree, count)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct TraversalReport {
    pub source: Node,
    pub order: Vec<Node>,
    pub reached: usize,
}

impl Display for TraversalReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "reached {} nodes from {}", self.reached, self.source)?;
        writeln!(f, "{}", join(&self.order, " "))
    }
}

#[derive(Debug, Serialize)]
pub struct DistanceReport {
    pub source: Node,
    pub distances: Vec<Option<f64>>,
}

impl Display for DistanceReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "node \t distance from {}", self.source)?;
        for (node, distance) in self.distances.iter().enumerate() {
            match distance {
                Some(distance) => writeln!(f, "{} \t {}", node, distance)?,
                None => writeln!(f, "{} \t unreachable", node)?,
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PathReport {
    pub source: Node,
    pub target: Node,
    pub cost: Option<f64>,
    pub paths: Vec<Vec<Node>>,
}

impl Display for PathReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.paths.is_empty() {
            return writeln!(f, "no path from {} to {}", self.source, self.target);
        }

        if let Some(cost) = self.cost {
            writeln!(f, "cost: {}", cost)?;
        }
        for path in &self.paths {
            writeln!(f, "{}", join(path, " -> "))?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ComponentsReport {
    pub strong: bool,
    pub count: usize,
    pub groups: Vec<Vec<Node>>,
}

impl Display for ComponentsReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let kind = if self.strong {
            "strongly connected"
        } else {
            "connected"
        };
        writeln!(f, "{} {} components", self.count, kind)?;
        for (label, group) in self.groups.iter().enumerate() {
            writeln!(f, "{}: {}", label, join(group, " "))?;
        }

        Ok(())
    }
}

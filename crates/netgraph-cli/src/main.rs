use std::{
    error::Error,
    fmt::Display,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use log::{debug, info};
use netgraph::{
    DirectedGraph, Graph, GraphError, UndirectedGraph, WeightedDirectedGraph, WeightedGraph,
    WeightedUndirectedGraph,
    algorithms::{
        components::{Components, connected_components},
        dijkstra,
        paths,
        search::Search,
        tarjan_scc::strongly_connected_components,
    },
    input::edgelist::{EdgeList, write_edge_list},
    types::Node,
};
use ordered_float::OrderedFloat;
use serde::Serialize;

use report::{ComponentsReport, DistanceReport, InfoReport, PathReport, TraversalReport};

mod report;

type Cost = OrderedFloat<f64>;

#[derive(Parser)]
#[command(version, about = "Inspect and search graphs stored as edge lists")]
struct Cli {
    /// Edge list with one 'source target [weight]' line per edge
    in_file: PathBuf,

    /// Treat every line as an arc from source to target
    #[arg(short, long, global = true)]
    directed: bool,

    /// Read a third column of edge weights
    #[arg(short, long, global = true)]
    weighted: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Node, edge and degree statistics
    Info,

    /// Breadth-first order from <SOURCE>
    Bfs {
        source: Node,

        /// Stop once <TARGET> was reached
        #[arg(short, long)]
        target: Option<Node>,
    },

    /// Depth-first order from <SOURCE>
    Dfs {
        source: Node,

        /// Stop once <TARGET> was reached
        #[arg(short, long)]
        target: Option<Node>,
    },

    /// Weighted distances from <SOURCE>, or the cheapest path to <TARGET>
    Dijkstra {
        source: Node,

        #[arg(short, long)]
        target: Option<Node>,
    },

    /// Connected components, strongly connected ones for directed graphs
    Components,

    /// Paths with the fewest edges from <SOURCE> to <TARGET>
    Path {
        source: Node,

        target: Node,

        /// List every shortest path instead of one
        #[arg(short, long)]
        all: bool,
    },

    /// Write the normalized edge list to stdout
    Edges,
}

enum LoadedGraph {
    Undirected(UndirectedGraph),
    Directed(DirectedGraph),
    WeightedUndirected(WeightedUndirectedGraph<Cost>),
    WeightedDirected(WeightedDirectedGraph<Cost>),
}

/// Evaluates `$body` with `$graph` bound to the concrete graph.
macro_rules! with_graph {
    ($loaded:expr, $graph:ident => $body:expr) => {
        match $loaded {
            LoadedGraph::Undirected($graph) => $body,
            LoadedGraph::Directed($graph) => $body,
            LoadedGraph::WeightedUndirected($graph) => $body,
            LoadedGraph::WeightedDirected($graph) => $body,
        }
    };
}

impl LoadedGraph {
    fn load(in_file: &Path, directed: bool, weighted: bool) -> Result<Self, GraphError> {
        Ok(match (directed, weighted) {
            (false, false) => Self::Undirected(EdgeList::<()>::read(in_file)?.into_undirected()),
            (true, false) => Self::Directed(EdgeList::<()>::read(in_file)?.into_directed()),
            (false, true) => {
                Self::WeightedUndirected(EdgeList::<Cost>::read(in_file)?.into_undirected())
            }
            (true, true) => {
                Self::WeightedDirected(EdgeList::<Cost>::read(in_file)?.into_directed())
            }
        })
    }

    fn check_node(&self, node: Node) -> Result<(), GraphError> {
        if with_graph!(self, graph => graph.has_node(node)) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(node))
        }
    }

    fn components(&self) -> (Components, bool) {
        match self {
            Self::Undirected(graph) => (connected_components(graph), false),
            Self::WeightedUndirected(graph) => (connected_components(graph), false),
            Self::Directed(graph) => (strongly_connected_components(graph), true),
            Self::WeightedDirected(graph) => (strongly_connected_components(graph), true),
        }
    }

    fn total_weight(&self) -> Option<f64> {
        match self {
            Self::WeightedUndirected(graph) => Some(graph.total_weight().0),
            Self::WeightedDirected(graph) => Some(graph.total_weight().0),
            _ => None,
        }
    }
}

fn info(loaded: &LoadedGraph) -> InfoReport {
    let (components, _) = loaded.components();
    let largest_component = components
        .largest()
        .map(|label| components.size(label))
        .unwrap_or(0);

    with_graph!(loaded, graph => InfoReport {
        directed: graph.is_directed(),
        weighted: graph.is_weighted(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        triangles: graph.triangle_count(),
        components: components.count(),
        largest_component,
        degree_histogram: graph.degree_histogram(),
        total_weight: loaded.total_weight(),
    })
}

fn traversal<G: Graph>(
    graph: &G,
    source: Node,
    target: Option<Node>,
    depth_first: bool,
) -> TraversalReport {
    let mut order = Vec::new();
    let terminate = |node: Node| Some(node) == target;

    let visited = if depth_first {
        Search::depth_first(graph, source)
            .terminate(terminate)
            .on_current(|node| order.push(node))
            .run()
    } else {
        Search::breadth_first(graph, source)
            .terminate(terminate)
            .on_current(|node| order.push(node))
            .run()
    };

    TraversalReport {
        source,
        order,
        reached: visited.count(),
    }
}

/// Dijkstra settles nodes greedily, which is only sound for weights that are
/// neither negative nor NaN.
fn check_weights<G>(graph: &G) -> Result<(), String>
where
    G: WeightedGraph<Weight = Cost>,
{
    match graph
        .weighted_edges()
        .into_iter()
        .find(|&(_, _, weight)| !(weight.0 >= 0.0))
    {
        Some((source, target, weight)) => Err(format!(
            "edge ({}, {}) has weight {}, dijkstra needs non-negative weights",
            source, target, weight
        )),
        None => Ok(()),
    }
}

fn weighted_distances<G>(graph: &G, source: Node) -> DistanceReport
where
    G: WeightedGraph<Weight = Cost>,
{
    let result = dijkstra::shortest_paths(graph, source);

    DistanceReport {
        source,
        distances: graph
            .nodes()
            .map(|node| result.distance(node).map(|distance| distance.0))
            .collect(),
    }
}

fn weighted_path<G>(graph: &G, source: Node, target: Node) -> PathReport
where
    G: WeightedGraph<Weight = Cost>,
{
    let path = dijkstra::shortest_path(graph, source, target);

    PathReport {
        source,
        target,
        cost: path.as_ref().map(|path| path.cost().0),
        paths: path.into_iter().map(|path| path.into_nodes()).collect(),
    }
}

fn hop_paths<G: Graph>(graph: &G, source: Node, target: Node, all: bool) -> PathReport {
    let found = if all {
        paths::all_shortest_paths(graph, source, target)
    } else {
        paths::shortest_path(graph, source, target)
            .into_iter()
            .map(|path| path.into_nodes())
            .collect()
    };

    PathReport {
        source,
        target,
        cost: None,
        paths: found,
    }
}

fn emit<R: Serialize + Display>(report: &R, json: bool) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, report)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", report)?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Loading graph from '{}'", cli.in_file.display());
    let loaded = LoadedGraph::load(&cli.in_file, cli.directed, cli.weighted)?;

    match cli.command {
        Commands::Info => emit(&info(&loaded), cli.json)?,
        Commands::Bfs { source, target } | Commands::Dfs { source, target } => {
            loaded.check_node(source)?;
            let depth_first = matches!(cli.command, Commands::Dfs { .. });
            debug!(
                "{} search from {}",
                if depth_first { "depth-first" } else { "breadth-first" },
                source
            );

            let report = with_graph!(&loaded, graph => traversal(graph, source, target, depth_first));
            emit(&report, cli.json)?;
        }
        Commands::Dijkstra { source, target } => {
            loaded.check_node(source)?;
            if let Some(target) = target {
                loaded.check_node(target)?;
            }

            match &loaded {
                LoadedGraph::WeightedUndirected(graph) => check_weights(graph)?,
                LoadedGraph::WeightedDirected(graph) => check_weights(graph)?,
                _ => {}
            }

            match (&loaded, target) {
                (LoadedGraph::WeightedUndirected(graph), None) => {
                    emit(&weighted_distances(graph, source), cli.json)?
                }
                (LoadedGraph::WeightedDirected(graph), None) => {
                    emit(&weighted_distances(graph, source), cli.json)?
                }
                (LoadedGraph::WeightedUndirected(graph), Some(target)) => {
                    emit(&weighted_path(graph, source, target), cli.json)?
                }
                (LoadedGraph::WeightedDirected(graph), Some(target)) => {
                    emit(&weighted_path(graph, source, target), cli.json)?
                }
                _ => return Err("dijkstra needs edge weights, pass --weighted".into()),
            }
        }
        Commands::Components => {
            let (components, strong) = loaded.components();
            let report = ComponentsReport {
                strong,
                count: components.count(),
                groups: components.groups(),
            };
            emit(&report, cli.json)?;
        }
        Commands::Path {
            source,
            target,
            all,
        } => {
            loaded.check_node(source)?;
            loaded.check_node(target)?;

            let report = with_graph!(&loaded, graph => hop_paths(graph, source, target, all));
            emit(&report, cli.json)?;
        }
        Commands::Edges => {
            with_graph!(&loaded, graph => write_edge_list(graph, io::stdout().lock())?);
        }
    }

    Ok(())
}

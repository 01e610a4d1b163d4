pub mod components;
pub mod dijkstra;
pub mod paths;
pub mod search;
pub mod tarjan_scc;
pub mod visited;

pub use visited::Visited;

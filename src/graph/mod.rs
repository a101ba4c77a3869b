pub mod frontier;
pub mod graph;
pub mod traversal;

pub use frontier::{Frontier, Queue, Stack};
pub use graph::Graph;
pub use traversal::BreadthFirstPaths;

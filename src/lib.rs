//! Directed graph traversal and earliest-ancestor resolution.
//!
//! [`Graph`] holds an add-only directed adjacency relation and offers
//! breadth-first and depth-first traversals and path searches.
//! [`earliest_ancestor`] builds on the breadth-first path enumeration to find
//! the most distant ancestor in a list of parent/child pairs.

pub mod ancestry;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod logging;
pub mod reports;
pub mod types;

pub use ancestry::{earliest_ancestor, AncestorResolver};
pub use error::{GraphError, GraphResult};
pub use graph::Graph;
pub use types::{AncestorId, TieBreak, NO_ANCESTOR};

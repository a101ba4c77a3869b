pub mod resolver;

pub use resolver::{earliest_ancestor, AncestorResolver};

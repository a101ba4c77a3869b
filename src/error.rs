use thiserror::Error;

/// Errors raised by graph mutation and lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} does not exist")]
    VertexNotFound { vertex: String },
}

impl GraphError {
    pub fn vertex_not_found<V: std::fmt::Debug>(vertex: &V) -> Self {
        GraphError::VertexNotFound {
            vertex: format!("{:?}", vertex),
        }
    }
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;

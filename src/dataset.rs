use crate::error::GraphResult;
use crate::graph::Graph;
use crate::types::AncestorId;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Edge-list document loaded from JSON or YAML.
///
/// `edges` are directed `(from, to)` pairs between declared `vertices`;
/// `pairs` are `(ancestor, descendant)` pairs for ancestry queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub vertices: Vec<AncestorId>,
    #[serde(default)]
    pub edges: Vec<(AncestorId, AncestorId)>,
    #[serde(default)]
    pub pairs: Vec<(AncestorId, AncestorId)>,
}

impl Dataset {
    /// Load a dataset, picking the format from the file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading dataset from: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset from {:?}", path))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        let dataset: Dataset = match extension.as_str() {
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON dataset {:?}", path))?,
            "yml" | "yaml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML dataset {:?}", path))?,
            other => {
                return Err(anyhow!(
                    "Unsupported dataset extension '{}' for {:?}",
                    other,
                    path
                ))
            }
        };

        info!(
            "Loaded dataset with {} vertices, {} edges and {} ancestry pairs",
            dataset.vertices.len(),
            dataset.edges.len(),
            dataset.pairs.len()
        );
        Ok(dataset)
    }

    /// Build a graph from the declared vertices and edges.
    ///
    /// Fails if an edge references a vertex that was not declared.
    pub fn to_graph(&self) -> GraphResult<Graph<AncestorId>> {
        let mut graph = Graph::new();

        for &vertex in &self.vertices {
            graph.add_vertex(vertex);
        }
        for (from, to) in &self.edges {
            graph.add_edge(from, to)?;
        }

        Ok(graph)
    }
}

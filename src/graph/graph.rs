use crate::error::{GraphError, GraphResult};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Directed graph keyed by caller-supplied vertex identifiers.
///
/// Wraps a petgraph `DiGraph` together with a lookup table from vertex to
/// node index. Vertices and edges are add-only.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    graph: DiGraph<V, ()>,
    node_map: HashMap<V, NodeIndex>,
}

impl<V> Graph<V>
where
    V: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Get the number of vertices in the graph
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.node_map.contains_key(vertex)
    }

    /// All vertices, in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// Add a vertex. Adding a vertex that already exists is a no-op.
    pub fn add_vertex(&mut self, vertex: V) {
        self.ensure_vertex(vertex);
    }

    /// Add a directed edge `from -> to` between two existing vertices.
    ///
    /// Adding the same edge twice leaves a single edge in place.
    pub fn add_edge(&mut self, from: &V, to: &V) -> GraphResult<()> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;

        self.graph.update_edge(from_index, to_index, ());
        Ok(())
    }

    /// Get the set of vertices `vertex` has an edge toward
    pub fn get_neighbors(&self, vertex: &V) -> GraphResult<HashSet<V>> {
        let index = self.index_of(vertex)?;

        let neighbors: HashSet<V> = self
            .neighbor_indices(index)
            .map(|neighbor| self.vertex_at(neighbor).clone())
            .collect();

        debug!("Vertex {:?} has {} neighbors", vertex, neighbors.len());
        Ok(neighbors)
    }

    /// Insert both endpoints if missing, then the edge between them
    pub(crate) fn insert_edge(&mut self, from: V, to: V) {
        let from_index = self.ensure_vertex(from);
        let to_index = self.ensure_vertex(to);
        self.graph.update_edge(from_index, to_index, ());
    }

    fn ensure_vertex(&mut self, vertex: V) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&vertex) {
            return index;
        }

        let index = self.graph.add_node(vertex.clone());
        self.node_map.insert(vertex, index);
        index
    }

    pub(crate) fn index_of(&self, vertex: &V) -> GraphResult<NodeIndex> {
        self.node_map
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    pub(crate) fn find_index(&self, vertex: &V) -> Option<NodeIndex> {
        self.node_map.get(vertex).copied()
    }

    pub(crate) fn neighbor_indices(
        &self,
        index: NodeIndex,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(index, Direction::Outgoing)
    }

    pub(crate) fn vertex_at(&self, index: NodeIndex) -> &V {
        &self.graph[index]
    }

    pub(crate) fn resolve_path(&self, path: &[NodeIndex]) -> Vec<V> {
        path.iter()
            .map(|&index| self.vertex_at(index).clone())
            .collect()
    }
}

impl<V> Default for Graph<V>
where
    V: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

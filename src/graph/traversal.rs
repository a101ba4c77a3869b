use crate::error::GraphResult;
use crate::graph::frontier::{Frontier, Queue, Stack};
use crate::graph::Graph;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

impl<V> Graph<V>
where
    V: Clone + Eq + Hash + Debug,
{
    /// Visit every vertex reachable from `start` in breadth-first order
    pub fn breadth_first_traversal(&self, start: &V) -> GraphResult<Vec<V>> {
        let order = self.traverse_with(start, Queue::new())?;
        debug!("Breadth-first traversal from {:?} visited {} vertices", start, order.len());
        Ok(order)
    }

    /// Visit every vertex reachable from `start` in depth-first order, using an explicit stack
    pub fn depth_first_traversal_iterative(&self, start: &V) -> GraphResult<Vec<V>> {
        let order = self.traverse_with(start, Stack::new())?;
        debug!("Depth-first traversal from {:?} visited {} vertices", start, order.len());
        Ok(order)
    }

    /// Visit every vertex reachable from `start` in depth-first pre-order, using recursion.
    ///
    /// One stack frame is used per vertex on the current branch; very deep graphs
    /// (around 10^5 vertices in a single chain) overflow the default thread stack.
    pub fn depth_first_traversal_recursive(&self, start: &V) -> GraphResult<Vec<V>> {
        let start_index = self.index_of(start)?;
        let mut visited = HashSet::new();
        let mut order = Vec::new();

        self.visit_recursive(start_index, &mut visited, &mut order);

        debug!(
            "Recursive depth-first traversal from {:?} visited {} vertices",
            start,
            order.len()
        );
        Ok(order)
    }

    /// Find the shortest path (by edge count) from `start` to `goal`
    pub fn breadth_first_search(&self, start: &V, goal: &V) -> GraphResult<Option<Vec<V>>> {
        self.search_with(start, goal, Queue::new())
    }

    /// Find a path from `start` to `goal` in depth-first order, using an explicit stack
    pub fn depth_first_search_iterative(
        &self,
        start: &V,
        goal: &V,
    ) -> GraphResult<Option<Vec<V>>> {
        self.search_with(start, goal, Stack::new())
    }

    /// Find a path from `start` to `goal` in depth-first order, using recursion.
    ///
    /// Recursion depth grows with the length of the path being explored, so chains on
    /// the order of 10^5 vertices can exhaust the thread's stack.
    pub fn depth_first_search_recursive(
        &self,
        start: &V,
        goal: &V,
    ) -> GraphResult<Option<Vec<V>>> {
        let start_index = self.index_of(start)?;
        let Some(goal_index) = self.find_index(goal) else {
            debug!("Search goal {:?} is not in the graph", goal);
            return Ok(None);
        };

        let mut visited = HashSet::new();
        let found = self.search_recursive(start_index, goal_index, &mut visited, Vec::new());

        Ok(found.map(|path| self.resolve_path(&path)))
    }

    /// Enumerate every simple path leaving `start`, shortest first.
    ///
    /// Paths are yielded in the order they are discovered by a FIFO expansion;
    /// the single-vertex path `[start]` is not yielded.
    pub fn breadth_first_paths(&self, start: &V) -> GraphResult<BreadthFirstPaths<'_, V>> {
        let start_index = self.index_of(start)?;
        let mut queue = Queue::new();
        queue.push(vec![start_index]);

        Ok(BreadthFirstPaths { graph: self, queue })
    }

    fn traverse_with<F>(&self, start: &V, mut frontier: F) -> GraphResult<Vec<V>>
    where
        F: Frontier<NodeIndex>,
    {
        let start_index = self.index_of(start)?;
        let mut visited = HashSet::new();
        let mut order = Vec::new();

        frontier.push(start_index);

        while let Some(current) = frontier.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(self.vertex_at(current).clone());

            for neighbor in self.neighbor_indices(current) {
                if !visited.contains(&neighbor) {
                    frontier.push(neighbor);
                }
            }
        }

        Ok(order)
    }

    fn search_with<F>(&self, start: &V, goal: &V, mut frontier: F) -> GraphResult<Option<Vec<V>>>
    where
        F: Frontier<Vec<NodeIndex>>,
    {
        let start_index = self.index_of(start)?;
        let Some(goal_index) = self.find_index(goal) else {
            debug!("Search goal {:?} is not in the graph", goal);
            return Ok(None);
        };

        let mut visited = HashSet::new();
        frontier.push(vec![start_index]);

        while let Some(path) = frontier.pop() {
            let Some(&last) = path.last() else {
                continue;
            };
            if !visited.insert(last) {
                continue;
            }

            if last == goal_index {
                debug!("Found path of {} vertices from {:?} to {:?}", path.len(), start, goal);
                return Ok(Some(self.resolve_path(&path)));
            }

            for neighbor in self.neighbor_indices(last) {
                if !visited.contains(&neighbor) {
                    let mut extended = path.clone();
                    extended.push(neighbor);
                    frontier.push(extended);
                }
            }
        }

        debug!("No path from {:?} to {:?}", start, goal);
        Ok(None)
    }

    fn visit_recursive(
        &self,
        current: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        order: &mut Vec<V>,
    ) {
        if !visited.insert(current) {
            return;
        }
        order.push(self.vertex_at(current).clone());

        for neighbor in self.neighbor_indices(current) {
            self.visit_recursive(neighbor, visited, order);
        }
    }

    /// Each branch receives its own copy of the path walked so far
    fn search_recursive(
        &self,
        current: NodeIndex,
        goal: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        mut path: Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        visited.insert(current);
        path.push(current);

        if current == goal {
            return Some(path);
        }

        for neighbor in self.neighbor_indices(current) {
            if !visited.contains(&neighbor) {
                if let Some(found) = self.search_recursive(neighbor, goal, visited, path.clone()) {
                    return Some(found);
                }
            }
        }

        None
    }
}

/// Iterator over the simple paths leaving a start vertex, in FIFO discovery order
pub struct BreadthFirstPaths<'g, V> {
    graph: &'g Graph<V>,
    queue: Queue<Vec<NodeIndex>>,
}

impl<'g, V> Iterator for BreadthFirstPaths<'g, V>
where
    V: Clone + Eq + Hash + Debug,
{
    type Item = Vec<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = self.queue.pop()?;
            let Some(&last) = path.last() else {
                continue;
            };

            for neighbor in self.graph.neighbor_indices(last) {
                // never revisit a vertex already on this path, so cycles terminate
                if path.contains(&neighbor) {
                    continue;
                }
                let mut extended = path.clone();
                extended.push(neighbor);
                self.queue.push(extended);
            }

            if path.len() > 1 {
                return Some(self.graph.resolve_path(&path));
            }
        }
    }
}

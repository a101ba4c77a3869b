use crate::graph::Graph;
use crate::types::{AncestorId, TieBreak, NO_ANCESTOR};
use tracing::{debug, info};

/// Resolves the earliest (most distant) ancestor of a node from parent/child pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct AncestorResolver {
    tie_break: TieBreak,
}

impl AncestorResolver {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Build the child -> parent graph for a list of `(ancestor, descendant)` pairs
    pub fn build_graph(pairs: &[(AncestorId, AncestorId)]) -> Graph<AncestorId> {
        let mut graph = Graph::new();

        for &(ancestor, descendant) in pairs {
            graph.insert_edge(descendant, ancestor);
        }

        debug!(
            "Built ancestry graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        graph
    }

    /// Earliest ancestor of `starting_node`, or `None` if it has no ancestors
    pub fn resolve(
        &self,
        pairs: &[(AncestorId, AncestorId)],
        starting_node: AncestorId,
    ) -> Option<AncestorId> {
        self.resolve_chain(pairs, starting_node)
            .and_then(|chain| chain.last().copied())
    }

    /// The chain from `starting_node` up to its earliest ancestor
    pub fn resolve_chain(
        &self,
        pairs: &[(AncestorId, AncestorId)],
        starting_node: AncestorId,
    ) -> Option<Vec<AncestorId>> {
        let graph = Self::build_graph(pairs);
        self.longest_chain(&graph, starting_node)
    }

    /// Walk every ancestor chain of `starting_node` in breadth-first order and keep the longest.
    ///
    /// With `TieBreak::LastDiscovered` a chain replaces the current best whenever it is at
    /// least as long, so among equally long chains the one enumerated last wins.
    pub fn longest_chain(
        &self,
        graph: &Graph<AncestorId>,
        starting_node: AncestorId,
    ) -> Option<Vec<AncestorId>> {
        let paths = match graph.breadth_first_paths(&starting_node) {
            Ok(paths) => paths,
            Err(err) => {
                debug!("Node {} does not appear in any pair: {}", starting_node, err);
                return None;
            }
        };

        let mut best: Option<Vec<AncestorId>> = None;
        let mut explored = 0usize;

        for path in paths {
            explored += 1;
            if self.replaces(&path, best.as_deref()) {
                best = Some(path);
            }
        }

        match &best {
            Some(chain) => info!(
                "Earliest ancestor of {} is {:?} after {} generations ({} paths explored)",
                starting_node,
                chain.last(),
                chain.len() - 1,
                explored
            ),
            None => info!("Node {} has no ancestors", starting_node),
        }

        best
    }

    fn replaces(&self, candidate: &[AncestorId], current: Option<&[AncestorId]>) -> bool {
        let Some(current) = current else {
            return true;
        };

        match self.tie_break {
            TieBreak::LastDiscovered => candidate.len() >= current.len(),
            TieBreak::SmallestId => {
                candidate.len() > current.len()
                    || (candidate.len() == current.len() && candidate.last() < current.last())
            }
        }
    }
}

/// Earliest ancestor of `starting_node`, or `-1` if it has none.
///
/// Uses the default `TieBreak::LastDiscovered` policy.
pub fn earliest_ancestor(
    pairs: &[(AncestorId, AncestorId)],
    starting_node: AncestorId,
) -> AncestorId {
    AncestorResolver::default()
        .resolve(pairs, starting_node)
        .unwrap_or(NO_ANCESTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ANCESTORS: [(AncestorId, AncestorId); 10] = [
        (1, 3),
        (2, 3),
        (3, 6),
        (5, 6),
        (5, 7),
        (4, 5),
        (4, 8),
        (8, 9),
        (11, 8),
        (10, 1),
    ];

    #[test]
    fn test_no_pairs() {
        assert_eq!(earliest_ancestor(&[], 5), NO_ANCESTOR);
    }

    #[test]
    fn test_single_longest_chain() {
        assert_eq!(earliest_ancestor(&TEST_ANCESTORS, 1), 10);
        assert_eq!(earliest_ancestor(&TEST_ANCESTORS, 3), 10);
        assert_eq!(earliest_ancestor(&TEST_ANCESTORS, 6), 10);
        assert_eq!(earliest_ancestor(&TEST_ANCESTORS, 5), 4);
        assert_eq!(earliest_ancestor(&TEST_ANCESTORS, 7), 4);
    }

    #[test]
    fn test_nodes_without_ancestors() {
        for node in [2, 4, 10, 11] {
            assert_eq!(earliest_ancestor(&TEST_ANCESTORS, node), NO_ANCESTOR);
        }
    }

    #[test]
    fn test_unknown_starting_node() {
        assert_eq!(earliest_ancestor(&TEST_ANCESTORS, 404), NO_ANCESTOR);
    }

    #[test]
    fn test_default_policy_is_last_discovered() {
        assert_eq!(AncestorResolver::default().tie_break(), TieBreak::LastDiscovered);
        assert_eq!(
            AncestorResolver::new(TieBreak::SmallestId).tie_break(),
            TieBreak::SmallestId
        );
    }

    #[test]
    fn test_tie_smallest_id() {
        let resolver = AncestorResolver::new(TieBreak::SmallestId);

        assert_eq!(resolver.resolve(&TEST_ANCESTORS, 8), Some(4));
        assert_eq!(resolver.resolve(&TEST_ANCESTORS, 9), Some(4));
    }

    #[test]
    fn test_tie_last_discovered_picks_a_longest_candidate() {
        let resolver = AncestorResolver::new(TieBreak::LastDiscovered);

        for node in [8, 9] {
            let ancestor = resolver.resolve(&TEST_ANCESTORS, node).unwrap();
            assert!(ancestor == 4 || ancestor == 11, "unexpected ancestor {}", ancestor);
        }
    }

    #[test]
    fn test_last_discovered_matches_enumeration_order() {
        let graph = AncestorResolver::build_graph(&TEST_ANCESTORS);
        let last_longest = graph
            .breadth_first_paths(&9)
            .unwrap()
            .fold(Vec::new(), |best, path| {
                if path.len() >= best.len() {
                    path
                } else {
                    best
                }
            });

        let resolver = AncestorResolver::new(TieBreak::LastDiscovered);
        assert_eq!(resolver.longest_chain(&graph, 9), Some(last_longest));
    }

    #[test]
    fn test_resolve_chain() {
        let resolver = AncestorResolver::default();

        assert_eq!(
            resolver.resolve_chain(&TEST_ANCESTORS, 6),
            Some(vec![6, 3, 1, 10])
        );
        assert_eq!(resolver.resolve_chain(&TEST_ANCESTORS, 10), None);
    }

    #[test]
    fn test_cyclic_pairs_terminate() {
        let pairs = [(1, 2), (2, 3), (3, 1)];
        let resolver = AncestorResolver::new(TieBreak::SmallestId);

        // from 3: 3 -> 2 -> 1, and 1 leads back to 3 which is already on the path
        assert_eq!(resolver.resolve_chain(&pairs, 3), Some(vec![3, 2, 1]));
    }

    #[test]
    fn test_build_graph_reverses_pairs() {
        let graph = AncestorResolver::build_graph(&[(10, 1)]);

        assert!(graph.get_neighbors(&1).unwrap().contains(&10));
        assert!(graph.get_neighbors(&10).unwrap().is_empty());
    }
}

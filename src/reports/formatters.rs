use crate::types::{AncestorId, QueryReport, SearchStrategy, TraversalOrder, NO_ANCESTOR};
use anyhow::Result;

/// Trait for report formatters
pub trait ReportFormatter {
    fn format(&self, report: &QueryReport) -> Result<String>;
}

/// JSON formatter
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &QueryReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

/// Plain text formatter
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &QueryReport) -> Result<String> {
        let text = match report {
            QueryReport::Traversal { order, start, visited } => {
                let label = match order {
                    TraversalOrder::BreadthFirst => "Breadth-first traversal",
                    TraversalOrder::DepthFirst => "Depth-first traversal",
                    TraversalOrder::DepthFirstRecursive => "Recursive depth-first traversal",
                };
                format!("{} from {}: {}", label, start, join_ids(visited))
            }
            QueryReport::Search { strategy, start, goal, path } => {
                let label = match strategy {
                    SearchStrategy::BreadthFirst => "Breadth-first search",
                    SearchStrategy::DepthFirst => "Depth-first search",
                    SearchStrategy::DepthFirstRecursive => "Recursive depth-first search",
                };
                match path {
                    Some(path) => format!("{} {} -> {}: [{}]", label, start, goal, join_ids(path)),
                    None => format!("{} {} -> {}: no path", label, start, goal),
                }
            }
            QueryReport::Neighbors { vertex, neighbors } => {
                format!("Neighbors of {}: {{{}}}", vertex, join_ids(neighbors))
            }
            QueryReport::Ancestor { start, ancestor, chain, .. } => {
                if *ancestor == NO_ANCESTOR {
                    format!("Earliest ancestor of {}: {} (none)", start, ancestor)
                } else {
                    format!(
                        "Earliest ancestor of {}: {} via [{}]",
                        start,
                        ancestor,
                        join_ids(chain)
                    )
                }
            }
        };

        Ok(text)
    }
}

fn join_ids(ids: &[AncestorId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TieBreak;

    #[test]
    fn test_text_traversal() {
        let report = QueryReport::Traversal {
            order: TraversalOrder::BreadthFirst,
            start: 1,
            visited: vec![1, 2, 4, 3],
        };

        assert_eq!(
            TextFormatter.format(&report).unwrap(),
            "Breadth-first traversal from 1: 1, 2, 4, 3"
        );
    }

    #[test]
    fn test_text_search_miss() {
        let report = QueryReport::Search {
            strategy: SearchStrategy::DepthFirstRecursive,
            start: 3,
            goal: 1,
            path: None,
        };

        assert_eq!(
            TextFormatter.format(&report).unwrap(),
            "Recursive depth-first search 3 -> 1: no path"
        );
    }

    #[test]
    fn test_text_ancestor() {
        let found = QueryReport::Ancestor {
            start: 6,
            tie_break: TieBreak::LastDiscovered,
            ancestor: 10,
            chain: vec![6, 3, 1, 10],
        };
        let missing = QueryReport::Ancestor {
            start: 10,
            tie_break: TieBreak::LastDiscovered,
            ancestor: NO_ANCESTOR,
            chain: Vec::new(),
        };

        assert_eq!(
            TextFormatter.format(&found).unwrap(),
            "Earliest ancestor of 6: 10 via [6, 3, 1, 10]"
        );
        assert_eq!(
            TextFormatter.format(&missing).unwrap(),
            "Earliest ancestor of 10: -1 (none)"
        );
    }

    #[test]
    fn test_json_neighbors() {
        let report = QueryReport::Neighbors {
            vertex: 2,
            neighbors: vec![3, 4],
        };
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format(&report).unwrap()).unwrap();

        assert_eq!(json["query"], "neighbors");
        assert_eq!(json["neighbors"], serde_json::json!([3, 4]));
    }
}

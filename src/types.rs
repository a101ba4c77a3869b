//! Core types shared by the resolver, configuration and reports

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vertex identifier used by the ancestor resolver and the CLI
pub type AncestorId = i64;

/// Returned by `earliest_ancestor` when the starting node has no ancestors
pub const NO_ANCESTOR: AncestorId = -1;

/// How the resolver picks between ancestors at the same (maximal) distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The candidate discovered last by the breadth-first enumeration wins
    #[default]
    LastDiscovered,
    /// The candidate with the numerically smallest identifier wins
    SmallestId,
}

impl FromStr for TieBreak {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "last_discovered" => Ok(TieBreak::LastDiscovered),
            "smallest_id" => Ok(TieBreak::SmallestId),
            other => Err(anyhow!("Unknown tie-break policy: {}", other)),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::LastDiscovered => write!(f, "last_discovered"),
            TieBreak::SmallestId => write!(f, "smallest_id"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    BreadthFirst,
    DepthFirst,
    DepthFirstRecursive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    BreadthFirst,
    DepthFirst,
    DepthFirstRecursive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("Unknown output format: {}", other)),
        }
    }
}

/// Result of a single query, as handed to a report formatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryReport {
    Traversal {
        order: TraversalOrder,
        start: AncestorId,
        visited: Vec<AncestorId>,
    },
    Search {
        strategy: SearchStrategy,
        start: AncestorId,
        goal: AncestorId,
        path: Option<Vec<AncestorId>>,
    },
    Neighbors {
        vertex: AncestorId,
        neighbors: Vec<AncestorId>,
    },
    Ancestor {
        start: AncestorId,
        tie_break: TieBreak,
        ancestor: AncestorId,
        chain: Vec<AncestorId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_break_parsing() {
        assert_eq!("last_discovered".parse::<TieBreak>().unwrap(), TieBreak::LastDiscovered);
        assert_eq!("Smallest-Id".parse::<TieBreak>().unwrap(), TieBreak::SmallestId);
        assert!("largest".parse::<TieBreak>().is_err());
        assert_eq!(TieBreak::SmallestId.to_string(), "smallest_id");
    }

    #[test]
    fn test_report_serializes_with_query_tag() {
        let report = QueryReport::Search {
            strategy: SearchStrategy::BreadthFirst,
            start: 1,
            goal: 6,
            path: None,
        };
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["query"], "search");
        assert_eq!(json["strategy"], "breadth_first");
        assert!(json["path"].is_null());
    }
}

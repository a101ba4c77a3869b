use crate::reports::formatters::{JsonFormatter, ReportFormatter, TextFormatter};
use crate::types::{OutputFormat, QueryReport};
use anyhow::Result;

/// Report generator for creating the configured output format
pub struct ReportGenerator {
    format: OutputFormat,
}

impl ReportGenerator {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a query report in the configured format
    pub fn generate(&self, report: &QueryReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonFormatter.format(report),
            OutputFormat::Text => TextFormatter.format(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_dispatches_on_format() {
        let report = QueryReport::Neighbors {
            vertex: 7,
            neighbors: vec![1, 6],
        };

        let text = ReportGenerator::default().generate(&report).unwrap();
        assert_eq!(text, "Neighbors of 7: {1, 6}");

        let json = ReportGenerator::new(OutputFormat::Json).generate(&report).unwrap();
        assert!(json.contains("\"query\": \"neighbors\""));
    }
}

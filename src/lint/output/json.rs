//! JSON output formatter.
//!
//! Formats validation results as machine-readable JSON for tooling integration.

use super::LintFormatter;
use crate::lint::{Severity, ValidationResult};
use serde::Serialize;
use std::io::Write;

/// Formats validation output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [ValidationResult],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    fixable: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(&self, results: &[ValidationResult], writer: &mut W) -> std::io::Result<()> {
        let count = |severity: Severity| results.iter().filter(|r| r.severity == severity).count();

        let output = JsonOutput {
            results,
            summary: JsonSummary {
                total: results.len(),
                errors: count(Severity::Error),
                warnings: count(Severity::Warning),
                infos: count(Severity::Info),
                fixable: results
                    .iter()
                    .filter(|r| r.context.as_ref().is_some_and(|c| c.fixable))
                    .count(),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}

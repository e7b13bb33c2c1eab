//! Human-readable output formatter.
//!
//! Formats validation results for terminal display with optional color support.

use console::Style;

use super::LintFormatter;
use crate::lint::{Severity, ValidationResult};
use std::io::Write;

/// Formats validation output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
    /// File name shown in location lines.
    pub source: Option<String>,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            source: None,
        }
    }

    /// Show `source` as the file in location lines.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    fn severity_prefix(&self, severity: Severity) -> String {
        let label = severity.to_string();
        if !self.use_color {
            return label;
        }
        let style = match severity {
            Severity::Info => Style::new().cyan(),
            Severity::Warning => Style::new().yellow().bold(),
            Severity::Error => Style::new().red().bold(),
        };
        style.force_styling(true).apply_to(label).to_string()
    }

    fn location(&self, result: &ValidationResult) -> Option<String> {
        let source = self.source.as_deref().unwrap_or("<document>");
        match (result.line, result.column, &result.path) {
            (Some(line), Some(column), Some(path)) => {
                Some(format!("{}:{}:{} ({})", source, line, column, path))
            }
            (Some(line), Some(column), None) => Some(format!("{}:{}:{}", source, line, column)),
            (_, _, Some(path)) => Some(format!("{} ({})", source, path)),
            _ => None,
        }
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(&self, results: &[ValidationResult], writer: &mut W) -> std::io::Result<()> {
        for result in results {
            // Header line: error[rule-id]: message
            writeln!(
                writer,
                "{}[{}]: {}",
                self.severity_prefix(result.severity),
                result.rule_id,
                result.message
            )?;

            if let Some(location) = self.location(result) {
                writeln!(writer, "  --> {}", location)?;
            }

            for suggestion in &result.suggestions {
                writeln!(writer, "   = help: {}", suggestion)?;
            }

            if result.context.as_ref().is_some_and(|c| c.fixable) {
                writeln!(writer, "   = note: fixable with `specguard fix`")?;
            }

            writeln!(writer)?;
        }

        // Summary
        let error_count = results
            .iter()
            .filter(|r| r.severity == Severity::Error)
            .count();
        let warning_count = results
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .count();

        if error_count > 0 || warning_count > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                error_count, warning_count
            )?;
        }

        Ok(())
    }
}

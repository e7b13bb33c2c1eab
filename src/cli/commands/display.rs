//! Shared input and display helpers for commands.

use std::fs;
use std::path::Path;

use crate::config::apply_config;
use crate::error::Result;
use crate::lint::{
    HumanFormatter, JsonFormatter, LintFormatter, OutputFormat, SarifFormatter, ValidationResult,
};
use crate::ui::UserInterface;
use crate::validation::SpecValidator;

/// Exit code for input that cannot be read.
pub const EXIT_UNREADABLE: i32 = 2;

/// Read a file, reporting failure through the UI.
pub fn read_input(ui: &mut dyn UserInterface, path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            ui.error(&format!("Cannot read {}: {}", path.display(), e));
            None
        }
    }
}

/// Built-in validator, configured from `rules_config` when given.
pub fn load_validator(rules_config: Option<&Path>) -> Result<SpecValidator> {
    let mut validator = SpecValidator::with_builtins();
    if let Some(path) = rules_config {
        let content = fs::read_to_string(path)?;
        apply_config(validator.registry_mut().config_mut(), &content)?;
        tracing::debug!("Applied rule configuration from {}", path.display());
    }
    Ok(validator)
}

/// Render results in the requested format.
pub fn format_results(
    results: &[ValidationResult],
    format: OutputFormat,
    source: &Path,
    use_color: bool,
) -> String {
    let mut output = Vec::new();
    let source = source.display().to_string();

    match format {
        OutputFormat::Json => {
            JsonFormatter::new().format(results, &mut output).ok();
        }
        OutputFormat::Sarif => {
            SarifFormatter::new("specguard", env!("CARGO_PKG_VERSION"))
                .with_artifact(source)
                .format(results, &mut output)
                .ok();
        }
        OutputFormat::Human => {
            HumanFormatter::new(use_color)
                .with_source(source)
                .format(results, &mut output)
                .ok();
        }
    }

    String::from_utf8(output).unwrap_or_default()
}

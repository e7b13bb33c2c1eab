//! Validate command implementation.
//!
//! The `specguard validate` command checks a specification document with the
//! structural checks and every enabled rule.

use crate::cli::args::ValidateArgs;
use crate::error::Result;
use crate::lint::{OutputFormat, Severity};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{format_results, load_validator, read_input, EXIT_UNREADABLE};

/// The validate command implementation.
pub struct ValidateCommand {
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(args: ValidateArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ValidateArgs {
        &self.args
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(text) = read_input(ui, &self.args.file) else {
            return Ok(CommandResult::failure(EXIT_UNREADABLE));
        };
        let validator = load_validator(self.args.rules_config.as_deref())?;

        let report = validator.validate_text(&text);
        let has_errors = report.count(Severity::Error) > 0;
        let has_warnings = report.count(Severity::Warning) > 0;
        let should_fail = has_errors || (self.args.strict && has_warnings);

        if report.is_clean() && self.args.format == OutputFormat::Human {
            ui.success(&format!("{}: no problems found", self.args.file.display()));
            return Ok(CommandResult::success());
        }

        let output = format_results(
            &report.results,
            self.args.format,
            &self.args.file,
            ui.colors_enabled(),
        );
        ui.output(&output);

        if should_fail {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const VALID: &str = r#"openapi: 3.0.3
info:
  title: Widgets
  version: 1.0.0
security:
  - BearerAuth: []
paths:
  /widgets:
    get:
      summary: List widgets
      operationId: listWidgets
      tags: [widgets]
      responses:
        '200':
          description: OK
"#;

    fn write_spec(temp: &TempDir, content: &str) -> std::path::PathBuf {
        let path = temp.path().join("openapi.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    fn run(args: ValidateArgs) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let result = ValidateCommand::new(args).execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn validate_valid_document() {
        let temp = TempDir::new().unwrap();
        let (result, ui) = run(ValidateArgs::new(write_spec(&temp, VALID)));
        assert!(result.success);
        assert!(ui.has_success("no problems found"));
    }

    #[test]
    fn validate_unreadable_file() {
        let (result, ui) = run(ValidateArgs::new(Path::new("/nonexistent/openapi.yaml")));
        assert_eq!(result.exit_code, 2);
        assert!(!ui.errors().is_empty());
    }

    #[test]
    fn validate_reports_errors() {
        let temp = TempDir::new().unwrap();
        let spec = VALID.replace("security:\n  - BearerAuth: []\n", "");
        let (result, ui) = run(ValidateArgs::new(write_spec(&temp, &spec)));
        assert_eq!(result.exit_code, 1);
        assert!(ui.output_text().contains("security/require-auth"));
        assert!(ui.output_text().contains("Found 1 error"));
    }

    #[test]
    fn validate_parse_failure() {
        let temp = TempDir::new().unwrap();
        let (result, ui) = run(ValidateArgs::new(write_spec(&temp, "paths: [unclosed\n")));
        assert_eq!(result.exit_code, 1);
        assert!(ui.output_text().contains("parse/syntax"));
    }

    #[test]
    fn strict_mode_fails_on_warnings() {
        let temp = TempDir::new().unwrap();
        let spec = VALID.replace("      summary: List widgets\n", "");
        let path = write_spec(&temp, &spec);

        let (lenient, _) = run(ValidateArgs::new(&path));
        assert!(lenient.success);

        let (strict, _) = run(ValidateArgs {
            strict: true,
            ..ValidateArgs::new(&path)
        });
        assert!(!strict.success);
    }

    #[test]
    fn json_format_outputs_results() {
        let temp = TempDir::new().unwrap();
        let (result, ui) = run(ValidateArgs {
            format: OutputFormat::Json,
            ..ValidateArgs::new(write_spec(&temp, VALID))
        });
        assert!(result.success);
        let parsed: serde_json::Value = serde_json::from_str(ui.output_text()).unwrap();
        assert_eq!(parsed["summary"]["total"], 0);
    }

    #[test]
    fn sarif_format_names_artifact() {
        let temp = TempDir::new().unwrap();
        let spec = VALID.replace("      tags: [widgets]\n", "");
        let (result, ui) = run(ValidateArgs {
            format: OutputFormat::Sarif,
            ..ValidateArgs::new(write_spec(&temp, &spec))
        });
        assert!(result.success);
        let parsed: serde_json::Value = serde_json::from_str(ui.output_text()).unwrap();
        let location = &parsed["runs"][0]["results"][0]["locations"][0];
        assert!(location["physicalLocation"]["artifactLocation"]["uri"]
            .as_str()
            .unwrap()
            .ends_with("openapi.yaml"));
    }

    #[test]
    fn rules_config_disables_rule() {
        let temp = TempDir::new().unwrap();
        let spec = VALID.replace("security:\n  - BearerAuth: []\n", "");
        let config = temp.path().join("rules.json");
        fs::write(
            &config,
            r#"{"version": 1, "rules": {"security/require-auth": {"enabled": false}}}"#,
        )
        .unwrap();

        let (result, _) = run(ValidateArgs {
            rules_config: Some(config),
            ..ValidateArgs::new(write_spec(&temp, &spec))
        });
        assert!(result.success);
    }
}

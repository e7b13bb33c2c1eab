//! Config command implementation.
//!
//! The `specguard config` command exports the active rule configuration,
//! prints the JSON Schema of the export format, or checks a configuration
//! file.

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{config_schema, parse_config};
use crate::error::{Result, SpecGuardError};
use crate::lint::RuleId;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{load_validator, read_input, EXIT_UNREADABLE};

/// The config command implementation.
pub struct ConfigCommand {
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(args: ConfigArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.action {
            ConfigAction::Export { rules_config } => {
                let validator = load_validator(rules_config.as_deref())?;
                let mut json = validator.registry().config().export_config()?;
                json.push('\n');
                ui.output(&json);
            }
            ConfigAction::Schema => {
                let mut json = serde_json::to_string_pretty(&config_schema()).map_err(|e| {
                    SpecGuardError::Serialize {
                        message: e.to_string(),
                    }
                })?;
                json.push('\n');
                ui.output(&json);
            }
            ConfigAction::Check { file } => {
                let Some(content) = read_input(ui, file) else {
                    return Ok(CommandResult::failure(EXIT_UNREADABLE));
                };
                match parse_config(&content) {
                    Ok(export) => {
                        let validator = load_validator(None)?;
                        for id in export.rules.keys() {
                            if validator.registry().get(&RuleId::new(id.as_str())).is_none() {
                                ui.warning(&format!("Unknown rule '{}'", id));
                            }
                        }
                        ui.success(&format!(
                            "{}: valid configuration for {} rule(s)",
                            file.display(),
                            export.rules.len()
                        ));
                    }
                    Err(e) => {
                        ui.error(&format!("{}: {}", file.display(), e));
                        return Ok(CommandResult::failure(1));
                    }
                }
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn run(action: ConfigAction) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let result = ConfigCommand::new(ConfigArgs { action })
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn export_lists_builtin_rules() {
        let (result, ui) = run(ConfigAction::Export { rules_config: None });
        assert!(result.success);
        let parsed: serde_json::Value = serde_json::from_str(ui.output_text()).unwrap();
        assert_eq!(parsed["version"], 1);
        assert_eq!(parsed["rules"]["security/require-auth"]["severity"], "error");
    }

    #[test]
    fn export_roundtrips_through_check() {
        let (_, ui) = run(ConfigAction::Export { rules_config: None });
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rules.json");
        fs::write(&path, ui.output_text()).unwrap();

        let (result, ui) = run(ConfigAction::Check { file: path });
        assert!(result.success);
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn schema_describes_export() {
        let (result, ui) = run(ConfigAction::Schema);
        assert!(result.success);
        let parsed: serde_json::Value = serde_json::from_str(ui.output_text()).unwrap();
        assert!(parsed["properties"]["rules"].is_object());
    }

    #[test]
    fn check_rejects_malformed_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rules.json");
        fs::write(&path, "{\"version\": 1, \"rules\": {\"x\": {\"enabled\": \"yes\"}}}").unwrap();

        let (result, ui) = run(ConfigAction::Check { file: path });
        assert_eq!(result.exit_code, 1);
        assert!(!ui.errors().is_empty());
    }

    #[test]
    fn check_warns_about_unknown_rules() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rules.yaml");
        fs::write(&path, "version: 1\nrules:\n  custom/unknown:\n    enabled: false\n").unwrap();

        let (result, ui) = run(ConfigAction::Check { file: path });
        assert!(result.success);
        assert!(ui.has_warning("custom/unknown"));
    }

    #[test]
    fn check_missing_file() {
        let (result, _) = run(ConfigAction::Check {
            file: "/nonexistent/rules.json".into(),
        });
        assert_eq!(result.exit_code, 2);
    }
}

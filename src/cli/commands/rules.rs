//! Rules command implementation.
//!
//! The `specguard rules` command lists the built-in rules.

use crate::cli::args::RulesArgs;
use crate::error::{Result, SpecGuardError};
use crate::lint::RuleDefinition;
use crate::ui::UserInterface;
use crate::validation::SpecValidator;

use super::dispatcher::{Command, CommandResult};

/// The rules command implementation.
pub struct RulesCommand {
    args: RulesArgs,
}

impl RulesCommand {
    /// Create a new rules command.
    pub fn new(args: RulesArgs) -> Self {
        Self { args }
    }

    fn definitions(validator: &SpecValidator) -> Vec<RuleDefinition> {
        let auto_fixable: Vec<_> = validator.auto_fixer().rule_ids().collect();
        validator
            .registry()
            .iter()
            .map(|rule| {
                let mut definition = rule.definition();
                definition.fixable |= auto_fixable.contains(&rule.id());
                definition
            })
            .collect()
    }
}

impl Command for RulesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let validator = SpecValidator::with_builtins();
        let definitions = Self::definitions(&validator);

        if self.args.json {
            let mut json = serde_json::to_string_pretty(&definitions).map_err(|e| {
                SpecGuardError::Serialize {
                    message: e.to_string(),
                }
            })?;
            json.push('\n');
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        let width = definitions
            .iter()
            .map(|d| d.id.as_str().len())
            .max()
            .unwrap_or(0);
        let mut table = String::new();
        for definition in &definitions {
            table.push_str(&format!(
                "{:<width$}  {:<13}  {:<7}  {}{}\n",
                definition.id.as_str(),
                definition.category.to_string(),
                definition.severity.to_string(),
                if definition.fixable { "fixable  " } else { "         " },
                definition.name,
                width = width,
            ));
        }
        ui.output(&table);

        Ok(CommandResult::success())
    }
}

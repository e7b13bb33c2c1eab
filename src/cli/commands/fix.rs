//! Fix command implementation.
//!
//! The `specguard fix` command previews the fixes for a document as a diff
//! hunk and, with `--write`, commits them to the file.

use std::fs;

use crate::cli::args::FixArgs;
use crate::error::{Result, SpecGuardError};
use crate::lint::RuleId;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{load_validator, read_input, EXIT_UNREADABLE};

/// The fix command implementation.
pub struct FixCommand {
    args: FixArgs,
}

impl FixCommand {
    /// Create a new fix command.
    pub fn new(args: FixArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &FixArgs {
        &self.args
    }
}

impl Command for FixCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(text) = read_input(ui, &self.args.file) else {
            return Ok(CommandResult::failure(EXIT_UNREADABLE));
        };
        let validator = load_validator(self.args.rules_config.as_deref())?;

        let only = self.args.rule.as_deref().map(RuleId::new);
        if let Some(id) = &only {
            if validator.registry().get(id).is_none() {
                ui.error(&format!("Unknown rule '{}'", id));
                return Ok(CommandResult::failure(2));
            }
        }

        let preview = match validator.preview_fix_all(&text, only.as_ref()) {
            Ok(preview) => preview,
            Err(e @ SpecGuardError::Parse { .. }) => {
                ui.error(&format!("{}: {}", self.args.file.display(), e));
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let Some(hunk) = &preview.hunk else {
            ui.success("Nothing to fix");
            return Ok(CommandResult::success());
        };

        ui.show_header(&format!("--- {}", self.args.file.display()));
        ui.show_diff(&hunk.to_string());
        ui.message(&format!("{} change(s)", preview.changes.len()));

        if self.args.write {
            fs::write(&self.args.file, &preview.candidate_text)?;
            ui.success(&format!("Fixed {}", self.args.file.display()));
        } else {
            ui.message("Run with --write to apply these changes");
        }

        let remaining = validator.validate_document(&preview.candidate, None);
        if !remaining.is_empty() {
            ui.warning(&format!(
                "{} problem(s) remain that cannot be fixed automatically",
                remaining.len()
            ));
        }

        Ok(CommandResult::success())
    }
}

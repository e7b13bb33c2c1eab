//! Diff command implementation.
//!
//! The `specguard diff` command prints the single hunk covering every line
//! that differs between two files.

use crate::cli::args::DiffArgs;
use crate::diff::{compute_hunk, differs_only_in_line_endings};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{read_input, EXIT_UNREADABLE};

/// The diff command implementation.
pub struct DiffCommand {
    args: DiffArgs,
}

impl DiffCommand {
    /// Create a new diff command.
    pub fn new(args: DiffArgs) -> Self {
        Self { args }
    }
}

impl Command for DiffCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (Some(original), Some(modified)) = (
            read_input(ui, &self.args.original),
            read_input(ui, &self.args.modified),
        ) else {
            return Ok(CommandResult::failure(EXIT_UNREADABLE));
        };

        match compute_hunk(&original, &modified) {
            Some(hunk) => {
                ui.show_diff(&hunk.to_string());
                // Same convention as diff(1): differences exit 1.
                Ok(CommandResult::failure(1))
            }
            None if differs_only_in_line_endings(&original, &modified) => {
                ui.message("Files differ only in line endings");
                Ok(CommandResult::failure(1))
            }
            None => {
                ui.success("Files are identical");
                Ok(CommandResult::success())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn run(original: &str, modified: &str) -> (CommandResult, MockUI) {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.yaml");
        let b = temp.path().join("b.yaml");
        fs::write(&a, original).unwrap();
        fs::write(&b, modified).unwrap();

        let mut ui = MockUI::new();
        let result = DiffCommand::new(DiffArgs {
            original: a,
            modified: b,
        })
        .execute(&mut ui)
        .unwrap();
        (result, ui)
    }

    #[test]
    fn identical_files() {
        let (result, ui) = run("a: 1\n", "a: 1\n");
        assert!(result.success);
        assert!(ui.diffs().is_empty());
    }

    #[test]
    fn differing_files_show_hunk() {
        let (result, ui) = run("a: 1\nb: 2\n", "a: 1\nb: 3\n");
        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.diffs()[0], "@@ -1,2 +1,2 @@\n a: 1\n-b: 2\n+b: 3\n");
    }

    #[test]
    fn line_ending_only_difference_is_reported() {
        let (result, ui) = run("a: 1\r\n", "a: 1\n");
        assert_eq!(result.exit_code, 1);
        assert!(ui.diffs().is_empty());
        assert!(ui.has_message("line endings"));
    }
}

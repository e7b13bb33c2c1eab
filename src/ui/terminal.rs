//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, SpecGuardTheme, UserInterface};

/// Terminal UI writing results to stdout and errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: SpecGuardTheme,
    mode: OutputMode,
    colors: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, no_color: bool) -> Self {
        let colors = should_use_colors(no_color);
        let theme = if colors {
            SpecGuardTheme::new()
        } else {
            SpecGuardTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
            colors,
        }
    }

    pub fn theme(&self) -> &SpecGuardTheme {
        &self.theme
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn colors_enabled(&self) -> bool {
        self.colors
    }

    fn output(&mut self, text: &str) {
        write!(self.out, "{}", text).ok();
        self.out.flush().ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn show_diff(&mut self, diff: &str) {
        for line in diff.lines() {
            writeln!(self.out, "{}", self.theme.format_diff_line(line)).ok();
        }
    }
}

/// Create the terminal UI for the given flags.
pub fn create_ui(quiet: bool, no_color: bool) -> TerminalUI {
    let mode = if quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    TerminalUI::new(mode, no_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ui_sets_mode() {
        assert_eq!(create_ui(true, true).output_mode(), OutputMode::Quiet);
        assert_eq!(create_ui(false, true).output_mode(), OutputMode::Normal);
    }

    #[test]
    fn no_color_uses_plain_theme() {
        let ui = TerminalUI::new(OutputMode::Normal, true);
        assert_eq!(ui.theme().format_error("x"), "✗ x");
    }
}

//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::lint::OutputFormat;

/// specguard - Rule-based validation and repair of API specifications.
#[derive(Debug, Parser)]
#[command(name = "specguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a specification document
    Validate(ValidateArgs),

    /// Preview or apply fixes for a specification document
    Fix(FixArgs),

    /// List available rules
    Rules(RulesArgs),

    /// Export, describe, or check rule configuration
    Config(ConfigArgs),

    /// Show the changed region between two files
    Diff(DiffArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ValidateArgs {
    /// Specification file (JSON or YAML)
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Rule configuration file (JSON or YAML export format)
    #[arg(long, value_name = "FILE", env = "SPECGUARD_RULES_CONFIG")]
    pub rules_config: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            format: OutputFormat::Human,
            rules_config: None,
            strict: false,
        }
    }
}

/// Arguments for the `fix` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FixArgs {
    /// Specification file (JSON or YAML)
    pub file: PathBuf,

    /// Only fix results of this rule
    #[arg(long, value_name = "RULE_ID")]
    pub rule: Option<String>,

    /// Write the fixed document back to the file
    #[arg(long)]
    pub write: bool,

    /// Rule configuration file (JSON or YAML export format)
    #[arg(long, value_name = "FILE", env = "SPECGUARD_RULES_CONFIG")]
    pub rules_config: Option<PathBuf>,
}

impl FixArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            rule: None,
            write: false,
            rules_config: None,
        }
    }
}

/// Arguments for the `rules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RulesArgs {
    /// Output full rule definitions as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// `config` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Print the configuration of every built-in rule in export format
    Export {
        /// Start from this rule configuration file
        #[arg(long, value_name = "FILE")]
        rules_config: Option<PathBuf>,
    },

    /// Print the JSON Schema of the export format
    Schema,

    /// Check a rule configuration file
    Check {
        /// Rule configuration file (JSON or YAML)
        file: PathBuf,
    },
}

/// Arguments for the `diff` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DiffArgs {
    /// Original file
    pub original: PathBuf,

    /// Modified file
    pub modified: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands read the files named on
//! the command line; everything else is delegated to the engine.

pub mod completions;
pub mod config;
pub mod diff;
pub mod dispatcher;
pub mod display;
pub mod fix;
pub mod rules;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

//! specguard - Rule-based validation and repair of API specifications.
//!
//! specguard checks OpenAPI-like JSON/YAML documents against a registry of
//! composable rules, repairs what it finds, and previews every repair as a
//! diff hunk before it is accepted.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Rule configuration, import/export, and file loading
//! - [`diff`] - Single-hunk line diffs for previews
//! - [`document`] - Parsing, addressing, and walking specification documents
//! - [`error`] - Error types and result aliases
//! - [`fix`] - Result-driven auto-fixer and structural edits
//! - [`lint`] - Rules, the rule registry, and output formatters
//! - [`ui`] - Terminal output
//! - [`validation`] - The validation entry point and fix previews
//!
//! # Example
//!
//! ```
//! use specguard::validation::SpecValidator;
//!
//! let text = r#"{
//!   "openapi": "3.0.3",
//!   "info": {"title": "Widgets", "version": "1.0.0"},
//!   "paths": {"/widgets": {"get": {"responses": {"200": {"description": "OK"}}}}}
//! }"#;
//!
//! let validator = SpecValidator::with_builtins();
//! let report = validator.validate_text(text);
//! let auth = report
//!     .results
//!     .iter()
//!     .find(|r| r.rule_id.as_str() == "security/require-auth")
//!     .unwrap();
//!
//! let preview = validator.preview_fix(text, auth).unwrap();
//! assert!(preview.candidate_text.contains("BearerAuth"));
//! ```

pub mod cli;
pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod fix;
pub mod lint;
pub mod ui;
pub mod validation;

pub use error::{Result, SpecGuardError};

//! Error types for specguard operations.
//!
//! This module defines [`SpecGuardError`], the primary error type used throughout
//! the engine, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SpecGuardError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SpecGuardError::Other`) for unexpected errors,
//!   including failures bubbled up from fixer closures
//! - Rule and fixer failures inside a pass are isolated; they only surface
//!   here when a caller asked for one specific operation

use thiserror::Error;

/// Core error type for specguard operations.
#[derive(Debug, Error)]
pub enum SpecGuardError {
    /// Raw text is not valid JSON or YAML.
    #[error("Failed to parse document: {message}")]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// A rule validator or fixer failed.
    #[error("Rule '{rule_id}' failed: {message}")]
    RuleExecution { rule_id: String, message: String },

    /// No fixer is registered for the requested rule.
    #[error("No fixer registered for rule '{rule_id}'")]
    FixerNotFound { rule_id: String },

    /// A configuration import was rejected. Prior configuration is untouched.
    #[error("Invalid configuration import: {message}")]
    ConfigImport { message: String },

    /// A rule could not be built from its definition.
    #[error("Invalid rule definition: {message}")]
    RuleDefinition { message: String },

    /// A document could not be serialized back to text.
    #[error("Failed to serialize document: {message}")]
    Serialize { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for specguard operations.
pub type Result<T> = std::result::Result<T, SpecGuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_displays_message() {
        let err = SpecGuardError::Parse {
            message: "expected value".into(),
            line: Some(3),
            column: Some(7),
        };
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn rule_execution_displays_rule_and_message() {
        let err = SpecGuardError::RuleExecution {
            rule_id: "naming/kebab-case-paths".into(),
            message: "boom".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("naming/kebab-case-paths"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn fixer_not_found_displays_rule() {
        let err = SpecGuardError::FixerNotFound {
            rule_id: "governance/operation-tags".into(),
        };
        assert!(err.to_string().contains("governance/operation-tags"));
    }

    #[test]
    fn config_import_displays_message() {
        let err = SpecGuardError::ConfigImport {
            message: "unsupported version 9".into(),
        };
        assert!(err.to_string().contains("unsupported version 9"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SpecGuardError = io_err.into();
        assert!(matches!(err, SpecGuardError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts_to_other() {
        let err: SpecGuardError = anyhow::anyhow!("fixer blew up").into();
        assert!(matches!(err, SpecGuardError::Other(_)));
        assert_eq!(err.to_string(), "fixer blew up");
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(SpecGuardError::FixerNotFound {
                rule_id: "x".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}

//! Validation entry point.
//!
//! [`SpecValidator`] parses raw text, runs the structural checks in
//! [`structure`] and then the rule registry, and previews fixes as a
//! candidate document plus a diff hunk. [`ValidationSession`] keeps results
//! from stale passes out when text is validated on every edit.
//!
//! # Example
//!
//! ```
//! use specguard::validation::SpecValidator;
//!
//! let validator = SpecValidator::with_builtins();
//! let report = validator.validate_text("openapi: 3.0.3\npaths: {}\n");
//! assert!(report
//!     .results
//!     .iter()
//!     .any(|r| r.rule_id.as_str() == "openapi/info"));
//! ```

pub mod orchestrator;
pub mod session;
pub mod structure;

pub use orchestrator::{FixPreview, SpecValidator, ValidationReport, PARSE_RULE_ID};
pub use session::{EditTicket, ValidationSession};
pub use structure::{check_structure, STRUCTURAL_CHECKS};

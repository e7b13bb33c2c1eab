//! Document remediation.
//!
//! - [`AutoFixer`] resolves one [`ValidationResult`](crate::lint::ValidationResult)
//!   at a time with a fixer keyed by rule id
//! - [`ops`] holds the structural edits fixers are built from
//! - [`diff_values`] lists what a fix changed
//!
//! # Example
//!
//! ```
//! use specguard::fix::AutoFixer;
//! use specguard::lint::{FixTarget, RuleId, Severity, ValidationResult};
//! use serde_json::json;
//!
//! let doc = json!({"paths": {"/widgets": {"get": {}}}});
//! let result = ValidationResult::new(
//!     RuleId::new("structure/success-response"),
//!     Severity::Error,
//!     "no success response",
//! )
//! .with_target(FixTarget::operation("/widgets", "get"));
//!
//! let fixer = AutoFixer::with_builtins();
//! assert!(fixer.can_fix(&result));
//! let fixed = fixer.fix(&doc, &result).unwrap();
//! assert!(fixed["paths"]["/widgets"]["get"]["responses"]["200"].is_object());
//! ```

pub mod autofixer;
pub mod change;
pub mod fixers;
pub mod ops;

pub use autofixer::{AutoFixer, FixOutcome, ResultFix};
pub use change::{diff_values, ChangeKind, FixChange};

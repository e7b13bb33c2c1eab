//! Rule-based validation.
//!
//! The lint system consists of:
//!
//! - **Rules** - Immutable checks built from strategies ([`Rule`], [`RuleBuilder`])
//! - **Registry** - Registered rules plus their configuration ([`RuleRegistry`])
//! - **Results** - Findings with severity, location, and fix hints ([`ValidationResult`])
//! - **Output** - Human, JSON, and SARIF renderings ([`LintFormatter`])
//!
//! # Example
//!
//! ```
//! use specguard::lint::{RuleId, RuleRegistry, Severity};
//! use serde_json::json;
//!
//! let registry = RuleRegistry::with_builtins();
//! assert!(registry.get(&RuleId::new("security/require-auth")).is_some());
//!
//! let doc = json!({"paths": {"/widgets": {"get": {"responses": {"200": {}}}}}});
//! let results = registry.validate_spec(&doc);
//! assert!(results.iter().any(|r| r.rule_id.as_str() == "security/require-auth"));
//!
//! // Severity has ordering
//! assert!(Severity::Info < Severity::Warning);
//! assert!(Severity::Warning < Severity::Error);
//! ```

pub mod builder;
pub mod diagnostic;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod strategy;

pub use builder::RuleBuilder;
pub use diagnostic::{FixTarget, ResultContext, ValidationResult};
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat, SarifFormatter};
pub use registry::RuleRegistry;
pub use rule::{
    Category, OptionKind, Rule, RuleContext, RuleDefinition, RuleExamples, RuleId, RuleOption,
    Severity,
};
pub use rules::builtin_rules;
pub use strategy::{FixStrategy, StrategyDescriptor, ValidatorStrategy, DEFAULT_SECURITY_SCHEME};

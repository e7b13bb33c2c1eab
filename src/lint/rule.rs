//! Rule definitions.
//!
//! This module provides the core types for defining rules:
//!
//! - [`Rule`] - An immutable, introspectable rule built from strategies
//! - [`RuleId`] - Unique identifier for a rule
//! - [`Severity`] - Severity level for results (Info, Warning, Error)
//! - [`Category`] - Grouping used by configuration UIs
//! - [`RuleContext`] - What a strategy sees while running

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diagnostic::ValidationResult;
use super::strategy::{FixStrategy, StrategyDescriptor, ValidatorStrategy};
use crate::config::RuleConfig;
use crate::document::Document;
use crate::error::{Result, SpecGuardError};

/// Unique identifier for a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for validation results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, does not affect validity.
    Info,
    /// Should be addressed.
    Warning,
    /// Makes the document invalid.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Rule category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Naming,
    Security,
    Documentation,
    Structure,
    Governance,
    #[default]
    Custom,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Naming => "naming",
            Category::Security => "security",
            Category::Documentation => "documentation",
            Category::Structure => "structure",
            Category::Governance => "governance",
            Category::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

/// Value kind of a declared rule option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    String,
    Boolean,
    Number,
    StringList,
}

/// An option a rule accepts through its configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleOption {
    pub name: String,
    pub kind: OptionKind,
    pub default: Value,
    pub description: String,
}

impl RuleOption {
    /// Declare an option.
    pub fn new(
        name: impl Into<String>,
        kind: OptionKind,
        default: Value,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            default,
            description: description.into(),
        }
    }
}

/// Example documents a rule must accept and reject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleExamples {
    pub valid: Vec<Document>,
    pub invalid: Vec<Document>,
}

/// What a strategy sees while it runs: the rule identity and its options.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub rule_id: &'a RuleId,
    pub severity: Severity,
    config: &'a RuleConfig,
    declared: &'a [RuleOption],
}

impl<'a> RuleContext<'a> {
    /// Build a context for one rule run.
    pub fn new(
        rule_id: &'a RuleId,
        severity: Severity,
        config: &'a RuleConfig,
        declared: &'a [RuleOption],
    ) -> Self {
        Self {
            rule_id,
            severity,
            config,
            declared,
        }
    }

    /// Start a result attributed to this rule.
    pub fn report(&self, message: impl Into<String>) -> ValidationResult {
        ValidationResult::new(self.rule_id.clone(), self.severity, message)
    }

    /// Configured option value, falling back to the declared default.
    pub fn option(&self, name: &str) -> Option<&'a Value> {
        self.config.options.get(name).or_else(|| {
            self.declared
                .iter()
                .find(|o| o.name == name)
                .map(|o| &o.default)
        })
    }

    pub fn option_str(&self, name: &str) -> Option<&'a str> {
        self.option(name).and_then(Value::as_str)
    }

    pub fn option_bool(&self, name: &str) -> Option<bool> {
        self.option(name).and_then(Value::as_bool)
    }

    pub fn option_u64(&self, name: &str) -> Option<u64> {
        self.option(name).and_then(Value::as_u64)
    }

    pub fn option_str_list(&self, name: &str) -> Vec<&'a str> {
        self.option(name)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// An immutable rule.
///
/// Rules are built with [`RuleBuilder`](super::RuleBuilder) from a closed set
/// of strategies. To change a rule, duplicate it with
/// [`RuleBuilder::from_rule`](super::RuleBuilder::from_rule) and build a new one.
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) id: RuleId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) category: Category,
    pub(crate) severity: Severity,
    pub(crate) enabled: bool,
    pub(crate) validators: Vec<ValidatorStrategy>,
    pub(crate) fixers: Vec<FixStrategy>,
    pub(crate) options: Vec<RuleOption>,
    pub(crate) examples: RuleExamples,
}

/// Serializable description of a rule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    pub id: RuleId,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub severity: Severity,
    pub enabled: bool,
    pub fixable: bool,
    pub validators: Vec<StrategyDescriptor>,
    pub fixers: Vec<StrategyDescriptor>,
    pub options: Vec<RuleOption>,
}

impl Rule {
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Intrinsic severity, before configuration overrides.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Whether the rule is enabled when no configuration says otherwise.
    pub fn enabled_by_default(&self) -> bool {
        self.enabled
    }

    pub fn options(&self) -> &[RuleOption] {
        &self.options
    }

    pub fn examples(&self) -> &RuleExamples {
        &self.examples
    }

    /// Whether this rule can fix what it reports.
    pub fn has_fix(&self) -> bool {
        !self.fixers.is_empty()
    }

    /// Run every validator against the original document.
    ///
    /// Results carry the intrinsic severity; overrides are applied by the
    /// registry.
    pub fn validate(&self, doc: &Document, config: &RuleConfig) -> Result<Vec<ValidationResult>> {
        let ctx = RuleContext::new(&self.id, self.severity, config, &self.options);
        let mut results = Vec::new();
        for validator in &self.validators {
            let found = validator
                .run(doc, &ctx)
                .map_err(|e| SpecGuardError::RuleExecution {
                    rule_id: self.id.to_string(),
                    message: format!("{} validator: {:#}", validator.kind(), e),
                })?;
            results.extend(found);
        }
        Ok(results)
    }

    /// Thread a document through every fix strategy in order.
    ///
    /// Returns `None` when the rule has no fixers.
    pub fn fix(&self, doc: Document, config: &RuleConfig) -> Option<Result<Document>> {
        if self.fixers.is_empty() {
            return None;
        }
        let ctx = RuleContext::new(&self.id, self.severity, config, &self.options);
        let fixed = self.fixers.iter().try_fold(doc, |doc, fixer| {
            fixer
                .apply(doc, &ctx)
                .map_err(|e| SpecGuardError::RuleExecution {
                    rule_id: self.id.to_string(),
                    message: format!("{} fixer: {:#}", fixer.kind(), e),
                })
        });
        Some(fixed)
    }

    /// Introspectable description of this rule.
    pub fn definition(&self) -> RuleDefinition {
        RuleDefinition {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            severity: self.severity,
            enabled: self.enabled,
            fixable: self.has_fix(),
            validators: self.validators.iter().map(|v| v.descriptor()).collect(),
            fixers: self.fixers.iter().map(|f| f.descriptor()).collect(),
            options: self.options.clone(),
        }
    }
}

//! Fluent rule construction.

use regex::Regex;
use serde_json::Value;

use super::diagnostic::ValidationResult;
use super::rule::{Category, OptionKind, Rule, RuleContext, RuleExamples, RuleId, RuleOption, Severity};
use super::strategy::{FixStrategy, ValidatorStrategy};
use crate::document::{Document, NamedSchema, Operation};
use crate::error::{Result, SpecGuardError};

/// Builds a [`Rule`] from validator and fix strategies.
///
/// ```
/// use specguard::lint::{Category, RuleBuilder, Severity};
/// use serde_json::json;
///
/// let rule = RuleBuilder::new("naming/lowercase-paths")
///     .name("Lowercase paths")
///     .category(Category::Naming)
///     .severity(Severity::Warning)
///     .with_path_pattern("^[a-z/{}]*$")
///     .build()
///     .unwrap();
///
/// let config = Default::default();
/// let results = rule.validate(&json!({"paths": {"/Widgets": {}}}), &config).unwrap();
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    id: String,
    name: Option<String>,
    description: String,
    category: Category,
    severity: Severity,
    enabled: bool,
    validators: Vec<ValidatorStrategy>,
    fixers: Vec<FixStrategy>,
    options: Vec<RuleOption>,
    examples: RuleExamples,
    pattern_errors: Vec<String>,
}

impl RuleBuilder {
    /// Start a rule. Defaults: warning severity, custom category, enabled.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: String::new(),
            category: Category::Custom,
            severity: Severity::Warning,
            enabled: true,
            validators: Vec::new(),
            fixers: Vec::new(),
            options: Vec::new(),
            examples: RuleExamples::default(),
            pattern_errors: Vec::new(),
        }
    }

    /// Start from an existing rule, to build a modified copy.
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            id: rule.id.to_string(),
            name: Some(rule.name.clone()),
            description: rule.description.clone(),
            category: rule.category,
            severity: rule.severity,
            enabled: rule.enabled,
            validators: rule.validators.clone(),
            fixers: rule.fixers.clone(),
            options: rule.options.clone(),
            examples: rule.examples.clone(),
            pattern_errors: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Declare an option with its default.
    pub fn option(
        mut self,
        name: impl Into<String>,
        kind: OptionKind,
        default: Value,
        description: impl Into<String>,
    ) -> Self {
        self.options
            .push(RuleOption::new(name, kind, default, description));
        self
    }

    /// A document the rule must accept.
    pub fn valid_example(mut self, doc: Document) -> Self {
        self.examples.valid.push(doc);
        self
    }

    /// A document the rule must reject.
    pub fn invalid_example(mut self, doc: Document) -> Self {
        self.examples.invalid.push(doc);
        self
    }

    /// Every top-level path key must match `pattern`.
    ///
    /// An invalid pattern is reported by [`build`](Self::build).
    pub fn with_path_pattern(mut self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.validators.push(ValidatorStrategy::PathPattern(re)),
            Err(e) => self.pattern_errors.push(e.to_string()),
        }
        self
    }

    /// Every named schema must match `pattern`.
    pub fn with_schema_pattern(mut self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.validators.push(ValidatorStrategy::SchemaPattern(re)),
            Err(e) => self.pattern_errors.push(e.to_string()),
        }
        self
    }

    /// Run `check` once per operation.
    pub fn with_operation_validation<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Operation<'_>, &RuleContext<'_>) -> Vec<ValidationResult>
            + Send
            + Sync
            + 'static,
    {
        self.validators
            .push(ValidatorStrategy::operation(name, check));
        self
    }

    /// Run `check` once per named schema.
    pub fn with_schema_validation<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&NamedSchema<'_>, &RuleContext<'_>) -> Vec<ValidationResult>
            + Send
            + Sync
            + 'static,
    {
        self.validators.push(ValidatorStrategy::schema(name, check));
        self
    }

    /// Every non-public operation needs a security requirement granting
    /// `required_scopes`.
    pub fn with_security_validation(mut self, required_scopes: &[&str]) -> Self {
        self.validators.push(ValidatorStrategy::Security {
            required_scopes: required_scopes.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Run an arbitrary whole-document check.
    pub fn with_custom_validation<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Document, &RuleContext<'_>) -> anyhow::Result<Vec<ValidationResult>>
            + Send
            + Sync
            + 'static,
    {
        self.validators.push(ValidatorStrategy::custom(name, check));
        self
    }

    /// Secure every operation the security validator flags with `scheme`.
    pub fn with_security_fix(mut self, scheme: impl Into<String>) -> Self {
        self.fixers.push(FixStrategy::Security {
            scheme: scheme.into(),
        });
        self
    }

    /// Add an arbitrary whole-document fix.
    pub fn with_fix<F>(mut self, name: impl Into<String>, fix: F) -> Self
    where
        F: Fn(Document, &RuleContext<'_>) -> anyhow::Result<Document> + Send + Sync + 'static,
    {
        self.fixers.push(FixStrategy::custom(name, fix));
        self
    }

    /// Finish the rule.
    ///
    /// Fails on an empty id, an invalid pattern, or no validators.
    pub fn build(self) -> Result<Rule> {
        if self.id.trim().is_empty() {
            return Err(SpecGuardError::RuleDefinition {
                message: "rule id must not be empty".to_string(),
            });
        }
        if let Some(error) = self.pattern_errors.first() {
            return Err(SpecGuardError::RuleDefinition {
                message: format!("{}: invalid pattern: {}", self.id, error),
            });
        }
        if self.validators.is_empty() {
            return Err(SpecGuardError::RuleDefinition {
                message: format!("{}: rule has no validators", self.id),
            });
        }

        Ok(Rule {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: RuleId::new(self.id),
            description: self.description,
            category: self.category,
            severity: self.severity,
            enabled: self.enabled,
            validators: self.validators,
            fixers: self.fixers,
            options: self.options,
            examples: self.examples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use serde_json::json;

    fn untitled(op: &Operation<'_>, ctx: &RuleContext<'_>) -> Vec<ValidationResult> {
        if op.str_field("summary").is_none() {
            vec![ctx.report(format!("{} has no summary", op.label()))]
        } else {
            vec![]
        }
    }

    #[test]
    fn build_defaults() {
        let rule = RuleBuilder::new("custom/x")
            .with_path_pattern(".*")
            .build()
            .unwrap();
        assert_eq!(rule.name(), "custom/x");
        assert_eq!(rule.category(), Category::Custom);
        assert_eq!(rule.severity(), Severity::Warning);
        assert!(rule.enabled_by_default());
        assert!(!rule.has_fix());
    }

    #[test]
    fn build_rejects_empty_id() {
        let err = RuleBuilder::new(" ").with_path_pattern(".*").build().unwrap_err();
        assert!(matches!(err, SpecGuardError::RuleDefinition { .. }));
    }

    #[test]
    fn build_rejects_missing_validators() {
        let err = RuleBuilder::new("custom/x").build().unwrap_err();
        assert!(err.to_string().contains("no validators"));
    }

    #[test]
    fn build_rejects_invalid_pattern() {
        let err = RuleBuilder::new("custom/x")
            .with_schema_pattern("([")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn validators_each_see_original_document() {
        let doc = json!({"paths": {"/Widgets": {"get": {}}}});
        let rule = RuleBuilder::new("custom/x")
            .with_path_pattern("^[a-z/]*$")
            .with_operation_validation("summary", untitled)
            .build()
            .unwrap();
        let results = rule.validate(&doc, &RuleConfig::default()).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn composition_order_only_changes_result_order() {
        let doc = json!({"paths": {"/Widgets": {"get": {}}}});
        let a = RuleBuilder::new("custom/x")
            .with_path_pattern("^[a-z/]*$")
            .with_operation_validation("summary", untitled)
            .build()
            .unwrap();
        let b = RuleBuilder::new("custom/x")
            .with_operation_validation("summary", untitled)
            .with_path_pattern("^[a-z/]*$")
            .build()
            .unwrap();

        let config = RuleConfig::default();
        let mut from_a: Vec<_> = a
            .validate(&doc, &config)
            .unwrap()
            .into_iter()
            .map(|r| r.message)
            .collect();
        let mut from_b: Vec<_> = b
            .validate(&doc, &config)
            .unwrap()
            .into_iter()
            .map(|r| r.message)
            .collect();
        assert_ne!(from_a, from_b);
        from_a.sort();
        from_b.sort();
        assert_eq!(from_a, from_b);
    }

    #[test]
    fn fixers_run_in_registration_order() {
        let rule = RuleBuilder::new("custom/x")
            .with_custom_validation("noop", |_, _| Ok(vec![]))
            .with_fix("first", |mut doc, _| {
                doc["log"] = json!("first");
                Ok(doc)
            })
            .with_fix("second", |mut doc, _| {
                let prior = doc["log"].as_str().unwrap_or_default().to_string();
                doc["log"] = json!(format!("{},second", prior));
                Ok(doc)
            })
            .build()
            .unwrap();

        let fixed = rule
            .fix(json!({}), &RuleConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(fixed["log"], "first,second");
    }

    #[test]
    fn from_rule_duplicates_for_editing() {
        let original = RuleBuilder::new("custom/x")
            .severity(Severity::Info)
            .with_security_validation(&["read"])
            .with_security_fix("BearerAuth")
            .build()
            .unwrap();
        let edited = RuleBuilder::from_rule(&original)
            .severity(Severity::Error)
            .build()
            .unwrap();

        assert_eq!(original.severity(), Severity::Info);
        assert_eq!(edited.severity(), Severity::Error);
        assert_eq!(edited.definition().validators, original.definition().validators);
        assert!(edited.has_fix());
    }

    #[test]
    fn definition_serializes() {
        let rule = RuleBuilder::new("custom/x")
            .category(Category::Governance)
            .option("limit", OptionKind::Number, json!(3), "max")
            .with_schema_pattern("^[A-Z]")
            .build()
            .unwrap();
        let value = serde_json::to_value(rule.definition()).unwrap();
        assert_eq!(value["category"], "governance");
        assert_eq!(value["validators"][0], json!({"kind": "schema-pattern", "pattern": "^[A-Z]"}));
        assert_eq!(value["options"][0]["kind"], "number");
        assert_eq!(value["fixable"], false);
    }
}

//! Rule registry for managing and running rules.
//!
//! The [`RuleRegistry`] stores rules in registration order together with a
//! [`ConfigManager`], and runs validation and fix passes over them. Each
//! rule runs inside its own failure boundary: an error or a panic from one
//! rule becomes a single error result naming that rule, and the pass goes on.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use super::diagnostic::ValidationResult;
use super::rule::{Rule, RuleId, Severity};
use super::rules::builtin_rules;
use crate::config::{ConfigManager, PartialRuleConfig, RuleConfig};
use crate::document::Document;
use crate::error::{Result, SpecGuardError};

/// Registry of rules plus their configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
    config: ConfigManager,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for rule in builtin_rules().expect("built-in rules should always build") {
            registry.add_rule(rule);
        }
        registry
    }

    /// Register a rule, replacing any rule with the same id in place.
    ///
    /// Configuration is seeded from the rule's intrinsic settings unless the
    /// rule is already configured.
    pub fn add_rule(&mut self, rule: Rule) {
        let id = rule.id().to_string();
        self.config.seed(&id, RuleConfig::for_rule(&rule));
        match self.index.get(&id) {
            Some(&position) => {
                debug!("Replacing rule {}", id);
                self.rules[position] = rule;
            }
            None => {
                self.index.insert(id, self.rules.len());
                self.rules.push(rule);
            }
        }
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.index.get(id.as_str()).map(|&i| &self.rules[i])
    }

    /// Iterate over all rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigManager {
        &mut self.config
    }

    /// Merge a partial update into a rule's configuration.
    pub fn configure_rule(&mut self, id: &str, partial: &PartialRuleConfig) {
        self.config.update_rule_config(id, partial);
    }

    pub fn enable_rule(&mut self, id: &str) {
        self.config.enable_rule(id);
    }

    pub fn disable_rule(&mut self, id: &str) {
        self.config.disable_rule(id);
    }

    pub fn set_rule_severity(&mut self, id: &str, severity: Severity) {
        self.config.set_rule_severity(id, severity);
    }

    /// Configuration in effect for a rule: the configured one, or the rule's
    /// intrinsic defaults.
    pub fn effective_config(&self, rule: &Rule) -> RuleConfig {
        effective_config(&self.config, rule)
    }

    /// Run every enabled rule against the registry's configuration.
    pub fn validate_spec(&self, doc: &Document) -> Vec<ValidationResult> {
        self.validate_with(doc, &self.config)
    }

    /// Run every enabled rule against an explicit configuration snapshot.
    pub fn validate_with(&self, doc: &Document, config: &ConfigManager) -> Vec<ValidationResult> {
        let mut results = Vec::new();
        for rule in &self.rules {
            let rule_config = effective_config(config, rule);
            if !rule_config.enabled {
                continue;
            }
            let severity = rule_config.effective_severity(rule.severity());

            match run_isolated(rule.id(), || rule.validate(doc, &rule_config)) {
                Ok(found) => {
                    debug!("Rule {} produced {} results", rule.id(), found.len());
                    results.extend(found.into_iter().map(|mut result| {
                        result.severity = severity;
                        result.mark_fixable(rule.has_fix());
                        result
                    }));
                }
                Err(e) => {
                    warn!("Rule {} failed: {}", rule.id(), e);
                    results.push(ValidationResult::new(
                        rule.id().clone(),
                        Severity::Error,
                        format!("Rule execution failed: {}", e),
                    ));
                }
            }
        }
        results
    }

    /// Run every enabled rule's fixers in registration order.
    ///
    /// A failing fixer is logged and skipped; the document from before that
    /// rule's attempt is kept.
    pub fn fix_spec(&self, doc: &Document) -> Document {
        self.fix_with(doc, &self.config)
    }

    /// Like [`fix_spec`](Self::fix_spec) with an explicit configuration snapshot.
    pub fn fix_with(&self, doc: &Document, config: &ConfigManager) -> Document {
        let mut current = doc.clone();
        for rule in self.rules.iter().filter(|r| r.has_fix()) {
            let rule_config = effective_config(config, rule);
            if !rule_config.enabled {
                continue;
            }
            match self.run_fix(rule, &current, &rule_config) {
                Ok(fixed) => current = fixed,
                Err(e) => warn!("Skipping fix for {}: {}", rule.id(), e),
            }
        }
        current
    }

    /// Apply one rule's own fixers to a copy of `doc`.
    ///
    /// Fails with [`SpecGuardError::FixerNotFound`] when the rule is unknown
    /// or has no fixers.
    pub fn rule_fix(&self, id: &RuleId, doc: &Document) -> Result<Document> {
        let rule = self
            .get(id)
            .filter(|rule| rule.has_fix())
            .ok_or_else(|| SpecGuardError::FixerNotFound {
                rule_id: id.to_string(),
            })?;
        let rule_config = self.effective_config(rule);
        self.run_fix(rule, doc, &rule_config)
    }

    fn run_fix(&self, rule: &Rule, doc: &Document, config: &RuleConfig) -> Result<Document> {
        let outcome = run_isolated(rule.id(), || {
            rule.fix(doc.clone(), config)
                .unwrap_or_else(|| Ok(doc.clone()))
        })?;
        debug!("Rule {} fixed document", rule.id());
        Ok(outcome)
    }
}

fn effective_config(config: &ConfigManager, rule: &Rule) -> RuleConfig {
    config
        .get_rule_config(rule.id().as_str())
        .cloned()
        .unwrap_or_else(|| RuleConfig::for_rule(rule))
}

/// Run `f`, turning a panic into a rule execution error.
pub(crate) fn run_isolated<T>(rule_id: &RuleId, f: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_string());
            Err(SpecGuardError::RuleExecution {
                rule_id: rule_id.to_string(),
                message: format!("panicked: {}", message),
            })
        }
    }
}

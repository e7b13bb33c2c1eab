//! Per-rule configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::merger::merge_maps;
use crate::lint::{Rule, Severity};

fn default_enabled() -> bool {
    true
}

/// Enable flag, severity override and options for one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleConfig {
    /// Whether the rule runs.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Overrides the rule's intrinsic severity when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// Rule-specific options.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            options: Map::new(),
        }
    }
}

impl RuleConfig {
    /// Configuration implied by a rule's intrinsic defaults.
    pub fn for_rule(rule: &Rule) -> Self {
        Self {
            enabled: rule.enabled_by_default(),
            severity: Some(rule.severity()),
            options: Map::new(),
        }
    }

    /// Severity to report, given the rule's intrinsic one.
    pub fn effective_severity(&self, intrinsic: Severity) -> Severity {
        self.severity.unwrap_or(intrinsic)
    }

    /// Apply a partial update. Unset fields keep their value; options are
    /// deep-merged.
    pub fn apply(&mut self, partial: &PartialRuleConfig) {
        if let Some(enabled) = partial.enabled {
            self.enabled = enabled;
        }
        if let Some(severity) = partial.severity {
            self.severity = Some(severity);
        }
        if let Some(options) = &partial.options {
            self.options = merge_maps(&self.options, options);
        }
    }
}

/// A partial [`RuleConfig`] update.
///
/// ```
/// use specguard::config::{PartialRuleConfig, RuleConfig};
/// use specguard::lint::Severity;
/// use serde_json::json;
///
/// let mut config = RuleConfig::default();
/// config.apply(&PartialRuleConfig::new().severity(Severity::Info).option("max_length", json!(80)));
/// assert!(config.enabled);
/// assert_eq!(config.severity, Some(Severity::Info));
/// assert_eq!(config.options["max_length"], 80);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialRuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl PartialRuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set one option. A `null` value removes it when merged.
    pub fn option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.options
            .get_or_insert_with(Map::new)
            .insert(name.into(), value);
        self
    }
}

//! Rule configuration state with import/export.
//!
//! [`ConfigManager`] owns two maps keyed by rule id: the defaults (seeded
//! from each rule's intrinsic settings, or supplied up front) and the active
//! configuration. Updates only touch the active map; `reset_*` copies
//! defaults back.
//!
//! The export format is versioned JSON:
//!
//! ```json
//! {
//!   "version": 1,
//!   "exportedAt": "2026-01-01T00:00:00Z",
//!   "rules": { "security/require-auth": { "enabled": true, "severity": "error" } }
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rule_config::{PartialRuleConfig, RuleConfig};
use crate::error::{Result, SpecGuardError};
use crate::lint::Severity;

/// Export format version understood by [`ConfigManager::import_config`].
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Serialized configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigExport {
    /// Format version. Must be 1.
    pub version: u32,

    /// When the snapshot was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub exported_at: Option<DateTime<Utc>>,

    /// Configuration per rule id.
    pub rules: BTreeMap<String, RuleConfig>,
}

/// Default and active rule configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigManager {
    defaults: BTreeMap<String, RuleConfig>,
    rules: BTreeMap<String, RuleConfig>,
}

impl ConfigManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager whose defaults and active configuration are `defaults`.
    pub fn with_defaults(defaults: BTreeMap<String, RuleConfig>) -> Self {
        Self {
            rules: defaults.clone(),
            defaults,
        }
    }

    /// Record the default for a rule, activating it only if the rule has no
    /// configuration yet.
    pub fn seed(&mut self, rule_id: &str, config: RuleConfig) {
        self.defaults
            .entry(rule_id.to_string())
            .or_insert_with(|| config.clone());
        self.rules.entry(rule_id.to_string()).or_insert(config);
    }

    /// Active configuration for a rule.
    pub fn get_rule_config(&self, rule_id: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_id)
    }

    /// All active configuration, ordered by rule id.
    pub fn rule_configs(&self) -> &BTreeMap<String, RuleConfig> {
        &self.rules
    }

    /// Merge a partial update into a rule's configuration.
    ///
    /// A rule without configuration starts from its default (or
    /// [`RuleConfig::default`] if none was seeded).
    pub fn update_rule_config(&mut self, rule_id: &str, partial: &PartialRuleConfig) {
        let config = self.entry(rule_id);
        config.apply(partial);
        debug!("Updated config for {}: {:?}", rule_id, config);
    }

    pub fn set_rule_severity(&mut self, rule_id: &str, severity: Severity) {
        self.entry(rule_id).severity = Some(severity);
    }

    /// Drop a severity override, falling back to the rule's intrinsic severity.
    pub fn clear_rule_severity(&mut self, rule_id: &str) {
        self.entry(rule_id).severity = None;
    }

    pub fn enable_rule(&mut self, rule_id: &str) {
        self.entry(rule_id).enabled = true;
    }

    pub fn disable_rule(&mut self, rule_id: &str) {
        self.entry(rule_id).enabled = false;
    }

    /// Restore one rule to its default.
    pub fn reset_rule(&mut self, rule_id: &str) {
        match self.defaults.get(rule_id) {
            Some(default) => {
                self.rules.insert(rule_id.to_string(), default.clone());
            }
            None => {
                self.rules.remove(rule_id);
            }
        }
    }

    /// Restore every rule to its default.
    pub fn reset_all(&mut self) {
        self.rules = self.defaults.clone();
    }

    /// Serialize the active configuration as pretty JSON.
    pub fn export_config(&self) -> Result<String> {
        let export = ConfigExport {
            version: CONFIG_FORMAT_VERSION,
            exported_at: Some(Utc::now()),
            rules: self.rules.clone(),
        };
        serde_json::to_string_pretty(&export).map_err(|e| SpecGuardError::Serialize {
            message: e.to_string(),
        })
    }

    /// Replace the active configuration with an exported snapshot.
    ///
    /// On any error the current configuration is left untouched.
    pub fn import_config(&mut self, json: &str) -> Result<()> {
        let export = parse_export(json)?;
        debug!("Imported config for {} rules", export.rules.len());
        self.rules = export.rules;
        Ok(())
    }

    fn entry(&mut self, rule_id: &str) -> &mut RuleConfig {
        let default = self.defaults.get(rule_id).cloned().unwrap_or_default();
        self.rules.entry(rule_id.to_string()).or_insert(default)
    }
}

/// Parse and check an exported snapshot without applying it.
pub fn parse_export(json: &str) -> Result<ConfigExport> {
    let export: ConfigExport =
        serde_json::from_str(json).map_err(|e| SpecGuardError::ConfigImport {
            message: e.to_string(),
        })?;
    check_export(&export)?;
    Ok(export)
}

/// Check version and rule ids of a parsed snapshot.
pub fn check_export(export: &ConfigExport) -> Result<()> {
    if export.version != CONFIG_FORMAT_VERSION {
        return Err(SpecGuardError::ConfigImport {
            message: format!(
                "unsupported version {} (expected {})",
                export.version, CONFIG_FORMAT_VERSION
            ),
        });
    }
    if export.rules.keys().any(|id| id.trim().is_empty()) {
        return Err(SpecGuardError::ConfigImport {
            message: "rule ids must not be empty".to_string(),
        });
    }
    Ok(())
}

/// JSON Schema of the export format.
pub fn config_schema() -> serde_json::Value {
    schemars::schema_for!(ConfigExport).to_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manager() -> ConfigManager {
        let mut manager = ConfigManager::new();
        manager.seed(
            "naming/kebab-case-paths",
            RuleConfig {
                enabled: true,
                severity: Some(Severity::Warning),
                ..Default::default()
            },
        );
        manager.seed(
            "governance/operation-tags",
            RuleConfig {
                enabled: false,
                severity: Some(Severity::Info),
                ..Default::default()
            },
        );
        manager
    }

    #[test]
    fn seed_does_not_overwrite_active_config() {
        let mut manager = manager();
        manager.disable_rule("naming/kebab-case-paths");
        manager.seed("naming/kebab-case-paths", RuleConfig::default());
        assert!(!manager.get_rule_config("naming/kebab-case-paths").unwrap().enabled);
    }

    #[test]
    fn update_merges_partial() {
        let mut manager = manager();
        manager.update_rule_config(
            "naming/kebab-case-paths",
            &PartialRuleConfig::new().option("allowlist", json!(["/Legacy"])),
        );
        let config = manager.get_rule_config("naming/kebab-case-paths").unwrap();
        assert!(config.enabled);
        assert_eq!(config.severity, Some(Severity::Warning));
        assert_eq!(config.options["allowlist"], json!(["/Legacy"]));
    }

    #[test]
    fn update_unknown_rule_starts_from_default() {
        let mut manager = ConfigManager::new();
        manager.set_rule_severity("custom/rule", Severity::Error);
        let config = manager.get_rule_config("custom/rule").unwrap();
        assert!(config.enabled);
        assert_eq!(config.severity, Some(Severity::Error));
    }

    #[test]
    fn enable_disable_and_clear_severity() {
        let mut manager = manager();
        manager.enable_rule("governance/operation-tags");
        assert!(manager.get_rule_config("governance/operation-tags").unwrap().enabled);
        manager.disable_rule("governance/operation-tags");
        assert!(!manager.get_rule_config("governance/operation-tags").unwrap().enabled);
        manager.clear_rule_severity("governance/operation-tags");
        assert!(manager
            .get_rule_config("governance/operation-tags")
            .unwrap()
            .severity
            .is_none());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut manager = manager();
        manager.set_rule_severity("naming/kebab-case-paths", Severity::Error);
        manager.set_rule_severity("custom/rule", Severity::Error);

        manager.reset_rule("naming/kebab-case-paths");
        assert_eq!(
            manager.get_rule_config("naming/kebab-case-paths").unwrap().severity,
            Some(Severity::Warning)
        );

        manager.reset_all();
        assert!(manager.get_rule_config("custom/rule").is_none());
        assert_eq!(manager.rule_configs().len(), 2);
    }

    #[test]
    fn export_import_round_trip() {
        let mut manager = manager();
        manager.update_rule_config(
            "naming/kebab-case-paths",
            &PartialRuleConfig::new().option("allowlist", json!(["/Legacy"])),
        );
        let exported = manager.export_config().unwrap();

        let mut other = ConfigManager::new();
        other.import_config(&exported).unwrap();
        assert_eq!(other.rule_configs(), manager.rule_configs());
    }

    #[test]
    fn export_carries_version_and_timestamp() {
        let exported: serde_json::Value =
            serde_json::from_str(&manager().export_config().unwrap()).unwrap();
        assert_eq!(exported["version"], 1);
        assert!(exported["exportedAt"].is_string());
        assert_eq!(
            exported["rules"]["governance/operation-tags"],
            json!({"enabled": false, "severity": "info"})
        );
    }

    #[test]
    fn import_invalid_json_leaves_config_untouched() {
        let mut manager = manager();
        let before = manager.clone();
        let err = manager.import_config("{not json").unwrap_err();
        assert!(matches!(err, SpecGuardError::ConfigImport { .. }));
        assert_eq!(manager, before);
    }

    #[test]
    fn import_rejects_wrong_version() {
        let mut manager = manager();
        let before = manager.clone();
        let err = manager
            .import_config(r#"{"version": 2, "rules": {}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unsupported version 2"));
        assert_eq!(manager, before);
    }

    #[test]
    fn import_rejects_bad_shape() {
        let mut manager = manager();
        let before = manager.clone();
        assert!(manager
            .import_config(r#"{"version": 1, "rules": {"": {"enabled": true}}}"#)
            .is_err());
        assert!(manager
            .import_config(r#"{"version": 1, "rules": {"a": {"options": "x"}}}"#)
            .is_err());
        assert!(manager.import_config(r#"{"version": 1}"#).is_err());
        assert_eq!(manager, before);
    }

    #[test]
    fn schema_describes_export_format() {
        let schema = config_schema();
        let properties = &schema["properties"];
        assert!(properties.get("version").is_some());
        assert!(properties.get("exportedAt").is_some());
        assert!(properties.get("rules").is_some());
    }
}

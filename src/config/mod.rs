//! Rule configuration.
//!
//! This module handles all aspects of rule configuration:
//! - Per-rule settings and partial updates in [`rule_config`]
//! - Default/active state and import/export in [`manager`]
//! - Deep merging of options in [`merger`]
//! - File loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use specguard::config::{ConfigManager, RuleConfig};
//! use specguard::lint::Severity;
//!
//! let mut manager = ConfigManager::new();
//! manager.seed("naming/kebab-case-paths", RuleConfig::default());
//! manager.set_rule_severity("naming/kebab-case-paths", Severity::Error);
//!
//! let exported = manager.export_config().unwrap();
//! let mut restored = ConfigManager::new();
//! restored.import_config(&exported).unwrap();
//! assert_eq!(restored.rule_configs(), manager.rule_configs());
//! ```

pub mod loader;
pub mod manager;
pub mod merger;
pub mod rule_config;

pub use loader::{apply_config, load_config_file, parse_config};
pub use manager::{config_schema, ConfigExport, ConfigManager, CONFIG_FORMAT_VERSION};
pub use merger::{deep_merge, merge_maps};
pub use rule_config::{PartialRuleConfig, RuleConfig};

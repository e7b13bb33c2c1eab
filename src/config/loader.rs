//! Rule configuration file loading.
//!
//! Configuration files use the export format produced by
//! [`ConfigManager::export_config`], written as JSON or YAML.

use std::fs;
use std::path::Path;

use super::manager::{check_export, parse_export, ConfigExport, ConfigManager};
use crate::document::{detect_format, DocumentFormat};
use crate::error::{Result, SpecGuardError};

/// Load a configuration file into a fresh manager.
pub fn load_config_file(path: &Path) -> Result<ConfigManager> {
    let content = fs::read_to_string(path)?;
    let mut manager = ConfigManager::new();
    apply_config(&mut manager, &content)?;
    Ok(manager)
}

/// Parse configuration text (JSON or YAML) and import it into `manager`.
///
/// The manager is left untouched on error.
pub fn apply_config(manager: &mut ConfigManager, content: &str) -> Result<()> {
    let export = parse_config(content)?;
    let json = serde_json::to_string(&export).map_err(|e| SpecGuardError::Serialize {
        message: e.to_string(),
    })?;
    manager.import_config(&json)
}

/// Parse configuration text (JSON or YAML) into a checked snapshot.
pub fn parse_config(content: &str) -> Result<ConfigExport> {
    match detect_format(content) {
        DocumentFormat::Json => parse_export(content),
        DocumentFormat::Yaml => {
            let export: ConfigExport =
                serde_yaml::from_str(content).map_err(|e| SpecGuardError::ConfigImport {
                    message: e.to_string(),
                })?;
            check_export(&export)?;
            Ok(export)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::Severity;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rules.json");
        fs::write(
            &path,
            r#"{"version": 1, "rules": {"naming/kebab-case-paths": {"enabled": false}}}"#,
        )
        .unwrap();

        let manager = load_config_file(&path).unwrap();
        assert!(!manager.get_rule_config("naming/kebab-case-paths").unwrap().enabled);
    }

    #[test]
    fn loads_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rules.yml");
        fs::write(
            &path,
            "version: 1\nrules:\n  security/require-auth:\n    severity: warning\n    options:\n      public_tag: open\n",
        )
        .unwrap();

        let manager = load_config_file(&path).unwrap();
        let config = manager.get_rule_config("security/require-auth").unwrap();
        assert!(config.enabled);
        assert_eq!(config.severity, Some(Severity::Warning));
        assert_eq!(config.options["public_tag"], "open");
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_file(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SpecGuardError::Io(_)));
    }

    #[test]
    fn yaml_with_wrong_version_is_rejected() {
        let mut manager = ConfigManager::new();
        assert!(apply_config(&mut manager, "version: 3\nrules: {}\n").is_err());
        assert!(manager.rule_configs().is_empty());
    }
}

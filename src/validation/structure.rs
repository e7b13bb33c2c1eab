//! Structural pre-checks on required top-level fields.
//!
//! These run before the rule registry and are not configurable. Each failure
//! is an error result under its own `openapi/...` id.

use serde_json::Value;

use crate::document::{Document, DocumentPath};
use crate::lint::{RuleId, Severity, ValidationResult};

pub const VERSION: &str = "openapi/version";
pub const INFO: &str = "openapi/info";
pub const INFO_TITLE: &str = "openapi/info/title";
pub const INFO_VERSION: &str = "openapi/info/version";
pub const PATHS: &str = "openapi/paths";

/// Ids of every structural check, in the order they run.
pub const STRUCTURAL_CHECKS: &[&str] = &[VERSION, INFO, INFO_TITLE, INFO_VERSION, PATHS];

fn error(id: &str, message: impl Into<String>, path: DocumentPath) -> ValidationResult {
    ValidationResult::new(RuleId::new(id), Severity::Error, message).with_path(path)
}

fn has_text(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// Check required top-level fields.
pub fn check_structure(doc: &Document) -> Vec<ValidationResult> {
    let mut results = Vec::new();
    let root = DocumentPath::root();

    if doc.get("openapi").is_none() && doc.get("swagger").is_none() {
        results.push(
            error(VERSION, "Missing specification version", root.clone())
                .with_suggestion("Add an 'openapi' field, e.g. openapi: 3.0.3"),
        );
    }

    match doc.get("info") {
        Some(Value::Object(info)) => {
            let info_path = root.join("info");
            if !has_text(info.get("title")) {
                results.push(error(
                    INFO_TITLE,
                    "Missing API title in info.title",
                    info_path.clone(),
                ));
            }
            if !has_text(info.get("version")) {
                results.push(error(
                    INFO_VERSION,
                    "Missing API version in info.version",
                    info_path,
                ));
            }
        }
        Some(_) => results.push(error(INFO, "'info' must be an object", root.join("info"))),
        None => results.push(
            error(INFO, "Missing 'info' section", root.clone())
                .with_suggestion("Add an 'info' object with 'title' and 'version'"),
        ),
    }

    match doc.get("paths") {
        Some(Value::Object(_)) => {}
        Some(_) => results.push(error(PATHS, "'paths' must be an object", root.join("paths"))),
        None => results.push(error(PATHS, "Missing 'paths' section", root)),
    }

    results
}

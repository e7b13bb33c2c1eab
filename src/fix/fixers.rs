//! Fixers for the built-in rules, keyed by rule id.
//!
//! Each fixer resolves exactly one result using the fix target the rule
//! attached to it.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use serde_json::Value;
use tracing::warn;

use super::autofixer::ResultFix;
use super::ops::{
    add_success_response, default_summary, rename_path, rename_schema, secure_operation,
    to_kebab_case, to_pascal_case,
};
use crate::document::{operation_mut, Document};
use crate::lint::strategy::DEFAULT_SECURITY_SCHEME;
use crate::lint::{FixTarget, ValidationResult};

/// Fixer function signature.
pub type FixFn = fn(Document, &ValidationResult) -> anyhow::Result<Document>;

/// Every built-in fixer with the rule it serves.
pub fn builtin_fixers() -> Vec<(&'static str, Arc<ResultFix>)> {
    let table: [(&'static str, FixFn); 6] = [
        ("security/require-auth", require_auth),
        ("naming/kebab-case-paths", kebab_case_path),
        ("naming/pascal-case-schemas", pascal_case_schema),
        ("documentation/operation-summary", operation_summary),
        ("documentation/operation-id", operation_id),
        ("structure/success-response", success_response),
    ];
    table
        .into_iter()
        .map(|(id, fix)| (id, Arc::new(fix) as Arc<ResultFix>))
        .collect()
}

/// Apply `fix` for each result in turn.
///
/// A result whose fix fails is logged and skipped, keeping the document from
/// before that attempt.
pub fn apply_each(doc: Document, results: &[ValidationResult], fix: FixFn) -> Document {
    results.iter().fold(doc, |doc, result| match fix(doc.clone(), result) {
        Ok(fixed) => fixed,
        Err(e) => {
            warn!("Skipping fix for {}: {:#}", result.rule_id, e);
            doc
        }
    })
}

fn target(result: &ValidationResult) -> anyhow::Result<&FixTarget> {
    result
        .fix_target()
        .ok_or_else(|| anyhow!("result for {} carries no fix target", result.rule_id))
}

fn operation_target(result: &ValidationResult) -> anyhow::Result<(&str, &str)> {
    let target = target(result)?;
    match (target.path.as_deref(), target.method.as_deref()) {
        (Some(path), Some(method)) => Ok((path, method)),
        _ => bail!("result for {} does not target an operation", result.rule_id),
    }
}

fn operation<'a>(
    doc: &'a mut Document,
    path: &str,
    method: &str,
) -> anyhow::Result<&'a mut serde_json::Map<String, Value>> {
    operation_mut(doc, path, method)
        .with_context(|| format!("operation {} not found", default_summary(method, path)))
}

/// Add a bearer scheme and require it on the operation.
pub fn require_auth(mut doc: Document, result: &ValidationResult) -> anyhow::Result<Document> {
    let (path, method) = operation_target(result)?;
    secure_operation(&mut doc, path, method, DEFAULT_SECURITY_SCHEME)?;
    Ok(doc)
}

/// Rename a path key to kebab-case.
pub fn kebab_case_path(mut doc: Document, result: &ValidationResult) -> anyhow::Result<Document> {
    let target = target(result)?;
    let from = target.path.as_deref().context("no path to rename")?;
    let to = target
        .replacement
        .clone()
        .unwrap_or_else(|| to_kebab_case(from));
    if from != to && !rename_path(&mut doc, from, &to) {
        bail!("cannot rename path '{}' to '{}'", from, to);
    }
    Ok(doc)
}

/// Rename a schema to PascalCase and rewrite references to it.
pub fn pascal_case_schema(mut doc: Document, result: &ValidationResult) -> anyhow::Result<Document> {
    let target = target(result)?;
    let from = target.schema.as_deref().context("no schema to rename")?;
    let to = target
        .replacement
        .clone()
        .unwrap_or_else(|| to_pascal_case(from));
    if from != to && !rename_schema(&mut doc, from, &to) {
        bail!("cannot rename schema '{}' to '{}'", from, to);
    }
    Ok(doc)
}

/// Set the operation summary to the proposed one, or `"<METHOD> <path>"`.
pub fn operation_summary(mut doc: Document, result: &ValidationResult) -> anyhow::Result<Document> {
    let (path, method) = operation_target(result)?;
    let summary = target(result)?
        .replacement
        .clone()
        .unwrap_or_else(|| default_summary(method, path));
    operation(&mut doc, path, method)?.insert("summary".to_string(), Value::String(summary));
    Ok(doc)
}

/// Set the operation id to the proposed one.
pub fn operation_id(mut doc: Document, result: &ValidationResult) -> anyhow::Result<Document> {
    let (path, method) = operation_target(result)?;
    let id = target(result)?
        .replacement
        .clone()
        .context("no operation id proposed")?;
    operation(&mut doc, path, method)?.insert("operationId".to_string(), Value::String(id));
    Ok(doc)
}

/// Add a `200` response.
pub fn success_response(mut doc: Document, result: &ValidationResult) -> anyhow::Result<Document> {
    let (path, method) = operation_target(result)?;
    add_success_response(operation(&mut doc, path, method)?)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{RuleId, Severity};
    use serde_json::json;

    fn targeted(rule_id: &str, target: FixTarget) -> ValidationResult {
        ValidationResult::new(RuleId::new(rule_id), Severity::Warning, "m").with_target(target)
    }

    #[test]
    fn require_auth_secures_target() {
        let doc = json!({"paths": {"/widgets": {"get": {}}}});
        let result = targeted("security/require-auth", FixTarget::operation("/widgets", "get"));
        let fixed = require_auth(doc, &result).unwrap();
        assert_eq!(fixed["paths"]["/widgets"]["get"]["security"], json!([{"BearerAuth": []}]));
    }

    #[test]
    fn require_auth_without_target_fails() {
        let result = ValidationResult::new(RuleId::new("r"), Severity::Error, "m");
        assert!(require_auth(json!({}), &result).is_err());
    }

    #[test]
    fn kebab_case_path_renames() {
        let doc = json!({"paths": {"/userProfiles": {}, "/other": {}}});
        let result = targeted("naming/kebab-case-paths", FixTarget::path_key("/userProfiles"));
        let fixed = kebab_case_path(doc, &result).unwrap();
        let keys: Vec<_> = fixed["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["/user-profiles", "/other"]);
    }

    #[test]
    fn kebab_case_path_collision_fails() {
        let doc = json!({"paths": {"/userProfiles": {}, "/user-profiles": {}}});
        let result = targeted("naming/kebab-case-paths", FixTarget::path_key("/userProfiles"));
        assert!(kebab_case_path(doc, &result).is_err());
    }

    #[test]
    fn pascal_case_schema_uses_replacement() {
        let doc = json!({"components": {"schemas": {"widget": {}}}});
        let result = targeted(
            "naming/pascal-case-schemas",
            FixTarget::schema("widget").with_replacement("WidgetModel"),
        );
        let fixed = pascal_case_schema(doc, &result).unwrap();
        assert!(fixed["components"]["schemas"].get("WidgetModel").is_some());
    }

    #[test]
    fn operation_summary_defaults_to_label() {
        let doc = json!({"paths": {"/widgets": {"get": {}}}});
        let result = targeted(
            "documentation/operation-summary",
            FixTarget::operation("/widgets", "get"),
        );
        let fixed = operation_summary(doc, &result).unwrap();
        assert_eq!(fixed["paths"]["/widgets"]["get"]["summary"], "GET /widgets");
    }

    #[test]
    fn operation_id_requires_proposal() {
        let doc = json!({"paths": {"/widgets": {"get": {}}}});
        let bare = targeted("documentation/operation-id", FixTarget::operation("/widgets", "get"));
        assert!(operation_id(doc.clone(), &bare).is_err());

        let proposed = targeted(
            "documentation/operation-id",
            FixTarget::operation("/widgets", "get").with_replacement("getWidgets"),
        );
        let fixed = operation_id(doc, &proposed).unwrap();
        assert_eq!(fixed["paths"]["/widgets"]["get"]["operationId"], "getWidgets");
    }

    #[test]
    fn success_response_adds_200() {
        let doc = json!({"paths": {"/widgets": {"get": {"responses": {"404": {}}}}}});
        let result = targeted("structure/success-response", FixTarget::operation("/widgets", "get"));
        let fixed = success_response(doc, &result).unwrap();
        assert_eq!(
            fixed["paths"]["/widgets"]["get"]["responses"]["200"]["description"],
            "Successful response"
        );
    }

    #[test]
    fn apply_each_threads_document() {
        let doc = json!({"paths": {"/a": {"get": {}}, "/b": {"get": {}}}});
        let results = vec![
            targeted("structure/success-response", FixTarget::operation("/a", "get")),
            targeted("structure/success-response", FixTarget::operation("/b", "get")),
        ];
        let fixed = apply_each(doc, &results, success_response);
        assert!(fixed["paths"]["/a"]["get"]["responses"].get("200").is_some());
        assert!(fixed["paths"]["/b"]["get"]["responses"].get("200").is_some());
    }

    #[test]
    fn apply_each_skips_collisions() {
        let doc = json!({"paths": {"/userProfiles": {}, "/user-profiles": {}, "/orderItems": {}}});
        let results = vec![
            targeted("naming/kebab-case-paths", FixTarget::path_key("/userProfiles")),
            targeted("naming/kebab-case-paths", FixTarget::path_key("/orderItems")),
        ];
        let fixed = apply_each(doc, &results, kebab_case_path);
        let paths = fixed["paths"].as_object().unwrap();
        assert!(paths.contains_key("/userProfiles"));
        assert!(paths.contains_key("/order-items"));
        assert!(!paths.contains_key("/orderItems"));
    }
}

//! Validator and fix strategies.
//!
//! A rule is a list of strategies drawn from a small closed set. Built-in
//! strategies are data (a regex, a scope list, a scheme name) and can be
//! described without running anything; the `Operation`, `Schema` and
//! `Custom` variants carry a named closure for logic the fixed variants do
//! not cover.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::diagnostic::{FixTarget, ValidationResult};
use super::rule::RuleContext;
use crate::document::{
    operations, path_keys, schemas, Document, DocumentPath, NamedSchema, Operation,
};
use crate::fix::ops::secure_operation;

/// Per-operation check.
pub type OperationCheck =
    dyn Fn(&Operation<'_>, &RuleContext<'_>) -> Vec<ValidationResult> + Send + Sync;

/// Per-schema check.
pub type SchemaCheck =
    dyn Fn(&NamedSchema<'_>, &RuleContext<'_>) -> Vec<ValidationResult> + Send + Sync;

/// Whole-document check that may fail.
pub type DocumentCheck =
    dyn Fn(&Document, &RuleContext<'_>) -> anyhow::Result<Vec<ValidationResult>> + Send + Sync;

/// Whole-document fix that may fail.
pub type DocumentFix =
    dyn Fn(Document, &RuleContext<'_>) -> anyhow::Result<Document> + Send + Sync;

/// Security scheme added by the security fix when none is configured.
pub const DEFAULT_SECURITY_SCHEME: &str = "BearerAuth";

/// One way of finding violations.
#[derive(Clone)]
pub enum ValidatorStrategy {
    /// Every top-level path key must match.
    PathPattern(Regex),
    /// Every named schema must match.
    SchemaPattern(Regex),
    /// Called once per operation.
    Operation {
        name: String,
        check: Arc<OperationCheck>,
    },
    /// Called once per named schema.
    Schema { name: String, check: Arc<SchemaCheck> },
    /// Every non-public operation needs a security requirement.
    Security { required_scopes: Vec<String> },
    /// Arbitrary document predicate.
    Custom {
        name: String,
        check: Arc<DocumentCheck>,
    },
}

/// One way of repairing a document.
#[derive(Clone)]
pub enum FixStrategy {
    /// Secure every operation the security validator would flag.
    Security { scheme: String },
    /// Arbitrary document transform.
    Custom { name: String, fix: Arc<DocumentFix> },
}

/// Serializable description of a strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrategyDescriptor {
    PathPattern { pattern: String },
    SchemaPattern { pattern: String },
    Operation { name: String },
    Schema { name: String },
    Security { required_scopes: Vec<String> },
    SecurityFix { scheme: String },
    Custom { name: String },
}

impl ValidatorStrategy {
    /// Wrap a per-operation check.
    pub fn operation<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Operation<'_>, &RuleContext<'_>) -> Vec<ValidationResult>
            + Send
            + Sync
            + 'static,
    {
        ValidatorStrategy::Operation {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Wrap a per-schema check.
    pub fn schema<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&NamedSchema<'_>, &RuleContext<'_>) -> Vec<ValidationResult>
            + Send
            + Sync
            + 'static,
    {
        ValidatorStrategy::Schema {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Wrap a whole-document check.
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Document, &RuleContext<'_>) -> anyhow::Result<Vec<ValidationResult>>
            + Send
            + Sync
            + 'static,
    {
        ValidatorStrategy::Custom {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Short name of the variant, for logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidatorStrategy::PathPattern(_) => "path-pattern",
            ValidatorStrategy::SchemaPattern(_) => "schema-pattern",
            ValidatorStrategy::Operation { .. } => "operation",
            ValidatorStrategy::Schema { .. } => "schema",
            ValidatorStrategy::Security { .. } => "security",
            ValidatorStrategy::Custom { .. } => "custom",
        }
    }

    pub fn descriptor(&self) -> StrategyDescriptor {
        match self {
            ValidatorStrategy::PathPattern(re) => StrategyDescriptor::PathPattern {
                pattern: re.as_str().to_string(),
            },
            ValidatorStrategy::SchemaPattern(re) => StrategyDescriptor::SchemaPattern {
                pattern: re.as_str().to_string(),
            },
            ValidatorStrategy::Operation { name, .. } => {
                StrategyDescriptor::Operation { name: name.clone() }
            }
            ValidatorStrategy::Schema { name, .. } => {
                StrategyDescriptor::Schema { name: name.clone() }
            }
            ValidatorStrategy::Security { required_scopes } => StrategyDescriptor::Security {
                required_scopes: required_scopes.clone(),
            },
            ValidatorStrategy::Custom { name, .. } => {
                StrategyDescriptor::Custom { name: name.clone() }
            }
        }
    }

    /// Run against the original document.
    pub fn run(
        &self,
        doc: &Document,
        ctx: &RuleContext<'_>,
    ) -> anyhow::Result<Vec<ValidationResult>> {
        let results: Vec<ValidationResult> = match self {
            ValidatorStrategy::PathPattern(re) => path_keys(doc)
                .into_iter()
                .filter(|path| !re.is_match(path))
                .map(|path| {
                    ctx.report(format!(
                        "Path '{}' does not match the required pattern {}",
                        path,
                        re.as_str()
                    ))
                    .with_path(DocumentPath::path_item(path))
                    .with_target(FixTarget::path_key(path))
                })
                .collect(),
            ValidatorStrategy::SchemaPattern(re) => schemas(doc)
                .into_iter()
                .filter(|schema| !re.is_match(schema.name))
                .map(|schema| {
                    ctx.report(format!(
                        "Schema '{}' does not match the required pattern {}",
                        schema.name,
                        re.as_str()
                    ))
                    .with_path(schema.location())
                    .with_target(FixTarget::schema(schema.name))
                })
                .collect(),
            ValidatorStrategy::Operation { check, .. } => operations(doc)
                .iter()
                .flat_map(|op| check(op, ctx))
                .collect(),
            ValidatorStrategy::Schema { check, .. } => schemas(doc)
                .iter()
                .flat_map(|schema| check(schema, ctx))
                .collect(),
            ValidatorStrategy::Security { required_scopes } => {
                security_findings(doc, ctx, required_scopes)
                    .into_iter()
                    .map(|finding| finding.into_result(ctx))
                    .collect()
            }
            ValidatorStrategy::Custom { check, .. } => check(doc, ctx)?,
        };
        Ok(results)
    }
}

impl FixStrategy {
    /// Wrap a whole-document fix.
    pub fn custom<F>(name: impl Into<String>, fix: F) -> Self
    where
        F: Fn(Document, &RuleContext<'_>) -> anyhow::Result<Document> + Send + Sync + 'static,
    {
        FixStrategy::Custom {
            name: name.into(),
            fix: Arc::new(fix),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FixStrategy::Security { .. } => "security",
            FixStrategy::Custom { .. } => "custom",
        }
    }

    pub fn descriptor(&self) -> StrategyDescriptor {
        match self {
            FixStrategy::Security { scheme } => StrategyDescriptor::SecurityFix {
                scheme: scheme.clone(),
            },
            FixStrategy::Custom { name, .. } => StrategyDescriptor::Custom { name: name.clone() },
        }
    }

    /// Apply to an owned copy of the document.
    pub fn apply(&self, doc: Document, ctx: &RuleContext<'_>) -> anyhow::Result<Document> {
        match self {
            FixStrategy::Security { scheme } => {
                let targets: Vec<(String, String)> = security_findings(&doc, ctx, &[])
                    .into_iter()
                    .filter(|f| f.missing_scopes.is_empty())
                    .map(|f| (f.path, f.method))
                    .collect();
                let mut doc = doc;
                for (path, method) in targets {
                    secure_operation(&mut doc, &path, &method, scheme)?;
                }
                Ok(doc)
            }
            FixStrategy::Custom { fix, .. } => fix(doc, ctx),
        }
    }
}

impl fmt::Debug for ValidatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidatorStrategy({:?})", self.descriptor())
    }
}

impl fmt::Debug for FixStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixStrategy({:?})", self.descriptor())
    }
}

/// An operation that fails the security requirement check.
#[derive(Debug, Clone, PartialEq)]
struct SecurityFinding {
    path: String,
    method: String,
    /// Empty when the operation has no requirement at all.
    missing_scopes: Vec<String>,
}

impl SecurityFinding {
    fn label(&self) -> String {
        format!("{} {}", self.method.to_uppercase(), self.path)
    }

    fn into_result(self, ctx: &RuleContext<'_>) -> ValidationResult {
        let label = self.label();
        let location = DocumentPath::from_segments(["paths", label.as_str(), self.method.as_str()]);
        if self.missing_scopes.is_empty() {
            ctx.report(format!("Operation {} has no security requirement", label))
                .with_path(location)
                .with_suggestion("Add a security requirement or tag the operation as public")
                .with_target(FixTarget::operation(&self.path, &self.method))
        } else {
            ctx.report(format!(
                "Operation {} security requirement is missing scopes: {}",
                label,
                self.missing_scopes.join(", ")
            ))
            .with_path(location)
            .with_suggestion(format!(
                "Grant the scopes {} in one security requirement",
                self.missing_scopes.join(", ")
            ))
        }
    }
}

fn security_findings(
    doc: &Document,
    ctx: &RuleContext<'_>,
    required_scopes: &[String],
) -> Vec<SecurityFinding> {
    let public_tag = ctx.option_str("public_tag").unwrap_or("public");
    let allowlist = ctx.option_str_list("allowlist");
    let inherited = doc.get("security").and_then(Value::as_array);

    let mut findings = Vec::new();
    for op in operations(doc) {
        if op.tags().contains(&public_tag)
            || op.value.get("x-public").and_then(Value::as_bool) == Some(true)
        {
            continue;
        }
        let label = op.label();
        if allowlist.iter().any(|entry| *entry == op.path || *entry == label) {
            continue;
        }

        let requirements = match op.value.get("security") {
            Some(value) => value.as_array(),
            None => inherited,
        };
        let requirements = requirements.filter(|r| !r.is_empty());

        match requirements {
            None => findings.push(SecurityFinding {
                path: op.path.to_string(),
                method: op.method.to_string(),
                missing_scopes: Vec::new(),
            }),
            Some(reqs) if !required_scopes.is_empty() => {
                let missing = best_missing_scopes(reqs, required_scopes);
                if !missing.is_empty() {
                    findings.push(SecurityFinding {
                        path: op.path.to_string(),
                        method: op.method.to_string(),
                        missing_scopes: missing,
                    });
                }
            }
            Some(_) => {}
        }
    }
    findings
}

/// Scopes still missing from the requirement object that covers the most.
///
/// Empty when some requirement object grants every required scope.
fn best_missing_scopes(requirements: &[Value], required: &[String]) -> Vec<String> {
    requirements
        .iter()
        .map(|requirement| {
            let granted: BTreeSet<&str> = requirement
                .as_object()
                .into_iter()
                .flat_map(|schemes| schemes.values())
                .filter_map(Value::as_array)
                .flatten()
                .filter_map(Value::as_str)
                .collect();
            required
                .iter()
                .filter(|scope| !granted.contains(scope.as_str()))
                .cloned()
                .collect::<Vec<_>>()
        })
        .min_by_key(Vec::len)
        .unwrap_or_else(|| required.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::lint::{RuleId, Severity};
    use serde_json::json;

    fn run(strategy: &ValidatorStrategy, doc: &Document) -> Vec<ValidationResult> {
        let id = RuleId::new("test");
        let config = RuleConfig::default();
        let ctx = RuleContext::new(&id, Severity::Warning, &config, &[]);
        strategy.run(doc, &ctx).unwrap()
    }

    #[test]
    fn path_pattern_flags_each_mismatch() {
        let doc = json!({"paths": {"/ok": {}, "/Bad": {}, "/also_bad": {}}});
        let strategy = ValidatorStrategy::PathPattern(Regex::new("^/[a-z-]*$").unwrap());
        let results = run(&strategy, &doc);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].path, Some(DocumentPath::path_item("/Bad")));
        assert_eq!(results[1].path, Some(DocumentPath::path_item("/also_bad")));
    }

    #[test]
    fn schema_pattern_flags_each_mismatch() {
        let doc = json!({"components": {"schemas": {"Widget": {}, "gadget": {}}}});
        let strategy = ValidatorStrategy::SchemaPattern(Regex::new("^[A-Z]").unwrap());
        let results = run(&strategy, &doc);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, Some(DocumentPath::schema("gadget")));
    }

    #[test]
    fn security_flags_unsecured_operation_with_labelled_path() {
        let doc = json!({"paths": {"/widgets": {"get": {}}}});
        let strategy = ValidatorStrategy::Security {
            required_scopes: vec![],
        };
        let results = run(&strategy, &doc);
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].path.as_ref().unwrap().to_string(),
            "#/paths/GET /widgets/get"
        );
        let target = results[0].fix_target().unwrap();
        assert_eq!(target.path.as_deref(), Some("/widgets"));
        assert_eq!(target.method.as_deref(), Some("get"));
    }

    #[test]
    fn security_skips_public_and_inherited() {
        let doc = json!({
            "security": [{"ApiKey": []}],
            "paths": {
                "/a": {"get": {"tags": ["public"]}},
                "/b": {"get": {"x-public": true}},
                "/c": {"get": {}},
                "/d": {"get": {"security": []}}
            }
        });
        let strategy = ValidatorStrategy::Security {
            required_scopes: vec![],
        };
        let results = run(&strategy, &doc);
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("GET /d"));
    }

    #[test]
    fn security_checks_required_scopes() {
        let doc = json!({"paths": {
            "/a": {"get": {"security": [{"OAuth": ["read", "write"]}]}},
            "/b": {"get": {"security": [{"OAuth": ["read"]}]}}
        }});
        let strategy = ValidatorStrategy::Security {
            required_scopes: vec!["read".into(), "write".into()],
        };
        let results = run(&strategy, &doc);
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("GET /b"));
        assert!(results[0].message.contains("write"));
        assert!(results[0].fix_target().is_none());
    }

    #[test]
    fn security_fix_secures_only_missing() {
        let doc = json!({"paths": {
            "/a": {"get": {}},
            "/b": {"get": {"tags": ["public"]}}
        }});
        let id = RuleId::new("test");
        let config = RuleConfig::default();
        let ctx = RuleContext::new(&id, Severity::Error, &config, &[]);
        let fixed = FixStrategy::Security {
            scheme: DEFAULT_SECURITY_SCHEME.into(),
        }
        .apply(doc, &ctx)
        .unwrap();
        assert_eq!(fixed["paths"]["/a"]["get"]["security"], json!([{"BearerAuth": []}]));
        assert!(fixed["paths"]["/b"]["get"].get("security").is_none());
        assert_eq!(fixed["components"]["securitySchemes"]["BearerAuth"]["scheme"], "bearer");
    }

    #[test]
    fn custom_errors_propagate() {
        let strategy = ValidatorStrategy::custom("always-fails", |_, _| anyhow::bail!("nope"));
        let id = RuleId::new("test");
        let config = RuleConfig::default();
        let ctx = RuleContext::new(&id, Severity::Warning, &config, &[]);
        assert!(strategy.run(&json!({}), &ctx).is_err());
    }

    #[test]
    fn descriptors_name_custom_logic_only() {
        let strategy = ValidatorStrategy::operation("needs-summary", |_, _| vec![]);
        let value = serde_json::to_value(strategy.descriptor()).unwrap();
        assert_eq!(value, json!({"kind": "operation", "name": "needs-summary"}));
    }
}

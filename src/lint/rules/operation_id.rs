//! Operations need a unique `operationId`.

use std::collections::HashSet;

use serde_json::json;

use crate::document::{operations, Document};
use crate::error::Result;
use crate::fix::fixers::{apply_each, operation_id};
use crate::fix::ops::operation_id_for;
use crate::lint::{Category, FixTarget, Rule, RuleBuilder, RuleContext, Severity, ValidationResult};

pub const ID: &str = "documentation/operation-id";

/// Append a numeric suffix until `base` is unused.
fn unique_id(base: String, used: &mut HashSet<String>) -> String {
    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{}{}", base, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

fn check(doc: &Document, ctx: &RuleContext<'_>) -> anyhow::Result<Vec<ValidationResult>> {
    let ops = operations(doc);
    let mut used: HashSet<String> = ops
        .iter()
        .filter_map(|op| op.str_field("operationId"))
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let mut seen: Vec<(String, String)> = Vec::new();
    let mut results = Vec::new();

    for op in &ops {
        let id = op
            .str_field("operationId")
            .map(str::trim)
            .unwrap_or_default();
        let target = FixTarget::operation(op.path, op.method);

        if id.is_empty() {
            let proposed = unique_id(operation_id_for(op.method, op.path), &mut used);
            results.push(
                ctx.report(format!("Operation {} has no operationId", op.label()))
                    .with_path(op.location())
                    .with_suggestion(format!("Add operationId \"{}\"", proposed))
                    .with_target(target.with_replacement(proposed)),
            );
            continue;
        }

        match seen.iter().find(|(seen_id, _)| seen_id == id) {
            Some((_, first)) => {
                let proposed = unique_id(operation_id_for(op.method, op.path), &mut used);
                results.push(
                    ctx.report(format!(
                        "Operation {} reuses operationId \"{}\" (first used by {})",
                        op.label(),
                        id,
                        first
                    ))
                    .with_path(op.location().join("operationId"))
                    .with_suggestion(format!("Rename it to \"{}\"", proposed))
                    .with_target(target.with_replacement(proposed)),
                );
            }
            None => seen.push((id.to_string(), op.label())),
        }
    }

    Ok(results)
}

pub fn rule() -> Result<Rule> {
    RuleBuilder::new(ID)
        .name("Operation id")
        .description("Every operation should have an operationId unique within the document")
        .category(Category::Documentation)
        .severity(Severity::Warning)
        .with_custom_validation("unique-operation-ids", check)
        .with_fix("generate-operation-ids", |doc, ctx| {
            let results = check(&doc, ctx)?;
            Ok(apply_each(doc, &results, operation_id))
        })
        .valid_example(json!({"paths": {"/widgets": {
            "get": {"operationId": "listWidgets"},
            "post": {"operationId": "createWidget"}
        }}}))
        .invalid_example(json!({"paths": {"/widgets": {"get": {}}}}))
        .invalid_example(json!({"paths": {
            "/widgets": {"get": {"operationId": "list"}},
            "/gadgets": {"get": {"operationId": "list"}}
        }}))
        .build()
}

//! Operations need a short summary.

use serde_json::json;

use crate::document::{operations, Operation};
use crate::error::Result;
use crate::fix::fixers::{apply_each, operation_summary};
use crate::fix::ops::default_summary;
use crate::lint::{
    Category, FixTarget, OptionKind, Rule, RuleBuilder, RuleContext, Severity, ValidationResult,
};

pub const ID: &str = "documentation/operation-summary";

const DEFAULT_MAX_LENGTH: u64 = 120;

fn max_length(ctx: &RuleContext<'_>) -> usize {
    ctx.option_u64("max_length")
        .unwrap_or(DEFAULT_MAX_LENGTH)
        .max(1) as usize
}

fn check(op: &Operation<'_>, ctx: &RuleContext<'_>) -> Vec<ValidationResult> {
    let target = FixTarget::operation(op.path, op.method);
    let summary = op.str_field("summary").map(str::trim).unwrap_or_default();

    if summary.is_empty() {
        let proposed = default_summary(op.method, op.path);
        return vec![ctx
            .report(format!("Operation {} has no summary", op.label()))
            .with_path(op.location().join("summary"))
            .with_suggestion(format!("Add a summary such as \"{}\"", proposed))
            .with_target(target.with_replacement(proposed))];
    }

    let limit = max_length(ctx);
    if summary.chars().count() > limit {
        let shortened: String = summary.chars().take(limit).collect();
        return vec![ctx
            .report(format!(
                "Summary of {} is longer than {} characters",
                op.label(),
                limit
            ))
            .with_path(op.location().join("summary"))
            .with_suggestion("Move details into the description")
            .with_target(target.with_replacement(shortened.trim_end()))];
    }

    Vec::new()
}

pub fn rule() -> Result<Rule> {
    RuleBuilder::new(ID)
        .name("Operation summary")
        .description("Every operation should have a concise summary")
        .category(Category::Documentation)
        .severity(Severity::Warning)
        .option(
            "max_length",
            OptionKind::Number,
            json!(DEFAULT_MAX_LENGTH),
            "Longest allowed summary, in characters",
        )
        .with_operation_validation("summary-present-and-short", check)
        .with_fix("add-summaries", |doc, ctx| {
            let results: Vec<_> = operations(&doc)
                .iter()
                .flat_map(|op| check(op, ctx))
                .collect();
            Ok(apply_each(doc, &results, operation_summary))
        })
        .valid_example(json!({"paths": {"/widgets": {"get": {"summary": "List widgets"}}}}))
        .invalid_example(json!({"paths": {"/widgets": {"get": {}}}}))
        .invalid_example(json!({"paths": {"/widgets": {"get": {"summary": "x".repeat(200)}}}}))
        .build()
}

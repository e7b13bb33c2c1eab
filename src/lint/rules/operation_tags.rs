//! Operations should be tagged for grouping.

use serde_json::json;

use crate::document::Operation;
use crate::error::Result;
use crate::lint::{Category, Rule, RuleBuilder, RuleContext, Severity, ValidationResult};

pub const ID: &str = "governance/operation-tags";

fn check(op: &Operation<'_>, ctx: &RuleContext<'_>) -> Vec<ValidationResult> {
    if !op.tags().is_empty() {
        return Vec::new();
    }
    vec![ctx
        .report(format!("Operation {} has no tags", op.label()))
        .with_path(op.location())
        .with_suggestion("Tag the operation with the resource it belongs to")]
}

pub fn rule() -> Result<Rule> {
    RuleBuilder::new(ID)
        .name("Operation tags")
        .description("Every operation should carry at least one tag")
        .category(Category::Governance)
        .severity(Severity::Info)
        .with_operation_validation("tags-present", check)
        .valid_example(json!({"paths": {"/widgets": {"get": {"tags": ["widgets"]}}}}))
        .invalid_example(json!({"paths": {"/widgets": {"get": {"tags": []}}}}))
        .build()
}

//! Operations must document a success response.

use serde_json::{json, Value};

use crate::document::{operations, Operation};
use crate::error::Result;
use crate::fix::fixers::{apply_each, success_response};
use crate::lint::{Category, FixTarget, Rule, RuleBuilder, RuleContext, Severity, ValidationResult};

pub const ID: &str = "structure/success-response";

fn is_success(code: &str) -> bool {
    code == "default" || code.starts_with('2') || code.starts_with('3')
}

fn check(op: &Operation<'_>, ctx: &RuleContext<'_>) -> Vec<ValidationResult> {
    let has_success = op
        .value
        .get("responses")
        .and_then(Value::as_object)
        .is_some_and(|responses| responses.keys().any(|code| is_success(code)));
    if has_success {
        return Vec::new();
    }
    vec![ctx
        .report(format!(
            "Operation {} does not define a success response",
            op.label()
        ))
        .with_path(op.location().join("responses"))
        .with_suggestion("Add a 2xx response")
        .with_target(FixTarget::operation(op.path, op.method))]
}

pub fn rule() -> Result<Rule> {
    RuleBuilder::new(ID)
        .name("Success response")
        .description("Every operation should define at least one 2xx, 3xx or default response")
        .category(Category::Structure)
        .severity(Severity::Error)
        .with_operation_validation("success-response-present", check)
        .with_fix("add-success-responses", |doc, ctx| {
            let results: Vec<_> = operations(&doc)
                .iter()
                .flat_map(|op| check(op, ctx))
                .collect();
            Ok(apply_each(doc, &results, success_response))
        })
        .valid_example(json!({"paths": {"/widgets": {
            "get": {"responses": {"200": {"description": "ok"}}},
            "delete": {"responses": {"default": {"description": "done"}}}
        }}}))
        .invalid_example(json!({"paths": {"/widgets": {"get": {}}}}))
        .invalid_example(json!({"paths": {"/widgets": {"get": {
            "responses": {"404": {"description": "missing"}}
        }}}}))
        .build()
}

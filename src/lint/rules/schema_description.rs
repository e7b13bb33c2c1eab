//! Named schemas should be described.

use serde_json::{json, Value};

use crate::document::NamedSchema;
use crate::error::Result;
use crate::lint::{Category, Rule, RuleBuilder, RuleContext, Severity, ValidationResult};

pub const ID: &str = "documentation/schema-description";

fn check(schema: &NamedSchema<'_>, ctx: &RuleContext<'_>) -> Vec<ValidationResult> {
    // Pure references are described where they point.
    if schema.value.get("$ref").is_some() {
        return Vec::new();
    }
    let described = schema
        .value
        .get("description")
        .and_then(Value::as_str)
        .is_some_and(|d| !d.trim().is_empty());
    if described {
        return Vec::new();
    }
    vec![ctx
        .report(format!("Schema '{}' has no description", schema.name))
        .with_path(schema.location())
        .with_suggestion("Describe what this schema represents")]
}

pub fn rule() -> Result<Rule> {
    RuleBuilder::new(ID)
        .name("Schema description")
        .description("Named schemas should carry a description")
        .category(Category::Documentation)
        .severity(Severity::Info)
        .with_schema_validation("schema-described", check)
        .valid_example(json!({"components": {"schemas": {
            "Widget": {"type": "object", "description": "A widget"},
            "Alias": {"$ref": "#/components/schemas/Widget"}
        }}}))
        .invalid_example(json!({"components": {"schemas": {"Widget": {"type": "object"}}}}))
        .build()
}

//! Schema names must be PascalCase.

use regex::Regex;
use serde_json::json;

use crate::error::Result;
use crate::fix::fixers::{apply_each, pascal_case_schema};
use crate::lint::strategy::ValidatorStrategy;
use crate::lint::{Category, Rule, RuleBuilder, Severity};

pub const ID: &str = "naming/pascal-case-schemas";

pub const PATTERN: &str = r"^[A-Z][a-zA-Z0-9]*$";

pub fn rule() -> Result<Rule> {
    RuleBuilder::new(ID)
        .name("PascalCase schemas")
        .description("Schema names should be PascalCase")
        .category(Category::Naming)
        .severity(Severity::Warning)
        .with_schema_pattern(PATTERN)
        .with_fix("rename-schemas", |doc, ctx| {
            let pattern = ValidatorStrategy::SchemaPattern(Regex::new(PATTERN)?);
            let results = pattern.run(&doc, ctx)?;
            Ok(apply_each(doc, &results, pascal_case_schema))
        })
        .valid_example(json!({"components": {"schemas": {"Widget": {}, "UserProfile2": {}}}}))
        .invalid_example(json!({"components": {"schemas": {"user_profile": {}}}}))
        .invalid_example(json!({"definitions": {"pet": {}}}))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;

    #[test]
    fn fix_renames_and_rewrites_refs() {
        let rule = rule().unwrap();
        let doc = json!({
            "paths": {"/w": {"get": {"responses": {"200": {
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/widget_item"}}}
            }}}}},
            "components": {"schemas": {"widget_item": {"type": "object"}}}
        });
        let fixed = rule.fix(doc, &RuleConfig::default()).unwrap().unwrap();

        assert!(fixed["components"]["schemas"].get("WidgetItem").is_some());
        assert_eq!(
            fixed["paths"]["/w"]["get"]["responses"]["200"]["content"]["application/json"]
                ["schema"]["$ref"],
            "#/components/schemas/WidgetItem"
        );
        assert!(rule.validate(&fixed, &RuleConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn result_points_at_schema() {
        let rule = rule().unwrap();
        let doc = json!({"components": {"schemas": {"widget": {}}}});
        let results = rule.validate(&doc, &RuleConfig::default()).unwrap();
        assert_eq!(
            results[0].path.as_ref().unwrap().to_string(),
            "#/components/schemas/widget"
        );
        assert_eq!(results[0].fix_target().unwrap().schema.as_deref(), Some("widget"));
    }
}

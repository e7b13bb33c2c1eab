//! Path keys must be kebab-case.
//!
//! Template segments like `{widgetId}` are exempt.

use regex::Regex;
use serde_json::json;

use crate::error::Result;
use crate::fix::fixers::{apply_each, kebab_case_path};
use crate::lint::strategy::ValidatorStrategy;
use crate::lint::{Category, Rule, RuleBuilder, Severity};

pub const ID: &str = "naming/kebab-case-paths";

/// A path of lowercase words joined by `-`, or template segments.
pub const PATTERN: &str = r"^(/([a-z0-9]+(-[a-z0-9]+)*|\{[^/{}]+\}))*/?$";

pub fn rule() -> Result<Rule> {
    RuleBuilder::new(ID)
        .name("Kebab-case paths")
        .description("Path segments should be lowercase words separated by hyphens")
        .category(Category::Naming)
        .severity(Severity::Warning)
        .with_path_pattern(PATTERN)
        .with_fix("rename-paths", |doc, ctx| {
            let pattern = ValidatorStrategy::PathPattern(Regex::new(PATTERN)?);
            let results = pattern.run(&doc, ctx)?;
            Ok(apply_each(doc, &results, kebab_case_path))
        })
        .valid_example(json!({"paths": {"/user-profiles/{userId}": {}, "/": {}}}))
        .invalid_example(json!({"paths": {"/userProfiles": {}}}))
        .invalid_example(json!({"paths": {"/user_settings": {}}}))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;

    #[test]
    fn accepts_versions_and_templates() {
        let rule = rule().unwrap();
        let doc = json!({"paths": {"/api/v2/widgets/{widget_id}/": {}}});
        assert!(rule.validate(&doc, &RuleConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn flags_each_bad_path() {
        let rule = rule().unwrap();
        let doc = json!({"paths": {"/Widgets": {}, "/ok": {}, "/a__b": {}}});
        let results = rule.validate(&doc, &RuleConfig::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].message.contains("/Widgets"));
    }

    #[test]
    fn fix_renames_all_paths() {
        let rule = rule().unwrap();
        let doc = json!({"paths": {"/userProfiles": {"get": {}}, "/Items/{itemId}": {}}});
        let fixed = rule.fix(doc, &RuleConfig::default()).unwrap().unwrap();

        let keys: Vec<_> = fixed["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["/user-profiles", "/items/{itemId}"]);
        assert_eq!(fixed["paths"]["/user-profiles"]["get"], json!({}));
    }
}

//! Operations must declare a security requirement.
//!
//! An operation passes when it has a non-empty `security` array of its own,
//! or inherits a non-empty root `security`. Operations tagged with the
//! public tag, marked `x-public: true`, or listed in `allowlist` are skipped.

use serde_json::json;

use crate::error::Result;
use crate::lint::strategy::DEFAULT_SECURITY_SCHEME;
use crate::lint::{Category, OptionKind, Rule, RuleBuilder, Severity};

pub const ID: &str = "security/require-auth";

pub fn rule() -> Result<Rule> {
    RuleBuilder::new(ID)
        .name("Require authentication")
        .description("Every non-public operation must declare a security requirement")
        .category(Category::Security)
        .severity(Severity::Error)
        .option(
            "public_tag",
            OptionKind::String,
            json!("public"),
            "Operations carrying this tag need no security",
        )
        .option(
            "allowlist",
            OptionKind::StringList,
            json!([]),
            "Path keys or \"METHOD path\" labels that need no security",
        )
        .with_security_validation(&[])
        .with_security_fix(DEFAULT_SECURITY_SCHEME)
        .valid_example(json!({
            "paths": {
                "/widgets": {"get": {"security": [{"BearerAuth": []}]}},
                "/health": {"get": {"tags": ["public"]}}
            }
        }))
        .valid_example(json!({
            "security": [{"ApiKey": []}],
            "paths": {"/widgets": {"get": {}}}
        }))
        .invalid_example(json!({"paths": {"/widgets": {"get": {}}}}))
        .invalid_example(json!({"paths": {"/widgets": {"post": {"security": []}}}}))
        .build()
}

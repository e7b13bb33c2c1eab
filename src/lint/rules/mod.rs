//! Built-in rules.
//!
//! One module per rule. Each exposes its `ID` and a `rule()` constructor.

pub mod kebab_case_paths;
pub mod operation_id;
pub mod operation_summary;
pub mod operation_tags;
pub mod pascal_case_schemas;
pub mod require_auth;
pub mod schema_description;
pub mod success_response;

use super::Rule;
use crate::error::Result;

/// Every built-in rule, in registration order.
pub fn builtin_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        require_auth::rule()?,
        kebab_case_paths::rule()?,
        pascal_case_schemas::rule()?,
        operation_summary::rule()?,
        operation_id::rule()?,
        schema_description::rule()?,
        success_response::rule()?,
        operation_tags::rule()?,
    ])
}

//! Validation results.
//!
//! This module provides the [`ValidationResult`] type for representing
//! findings produced during a validation pass, with optional document path,
//! source location, suggestions and fix context.

use serde::Serialize;

use super::rule::{RuleId, Severity};
use crate::document::DocumentPath;

/// A finding produced by a rule or a structural check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// The rule that produced this result.
    pub rule_id: RuleId,
    /// Effective severity, after configuration overrides.
    #[serde(rename = "type")]
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Document node the finding refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<DocumentPath>,
    /// 1-based source line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based source column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Suggestions for resolving the finding.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Structured remediation context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ResultContext>,
}

/// Remediation context attached to a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultContext {
    /// Whether a fixer is expected to resolve this finding.
    pub fixable: bool,
    /// What a fixer should target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixTarget>,
}

/// The node a fix should be applied to, plus an optional proposed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl FixTarget {
    /// Target one operation.
    pub fn operation(path: &str, method: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            method: Some(method.to_string()),
            ..Default::default()
        }
    }

    /// Target one path key.
    pub fn path_key(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            ..Default::default()
        }
    }

    /// Target one named schema.
    pub fn schema(name: &str) -> Self {
        Self {
            schema: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Attach a proposed replacement value.
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }
}

impl ValidationResult {
    /// Create a new result.
    pub fn new(rule_id: RuleId, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            severity,
            message: message.into(),
            path: None,
            line: None,
            column: None,
            suggestions: vec![],
            context: None,
        }
    }

    /// Attach a document path.
    pub fn with_path(mut self, path: DocumentPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Attach a source location.
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Attach the node a fix should target.
    ///
    /// `fixable` starts out `false`; whoever knows which fixers exist marks it.
    pub fn with_target(mut self, target: FixTarget) -> Self {
        self.context = Some(ResultContext {
            fixable: false,
            fix: Some(target),
        });
        self
    }

    /// Record whether a fixer can resolve this result.
    pub fn mark_fixable(&mut self, fixable: bool) {
        match self.context.as_mut() {
            Some(ctx) => ctx.fixable = fixable,
            None if fixable => {
                self.context = Some(ResultContext {
                    fixable,
                    fix: None,
                })
            }
            None => {}
        }
    }

    /// The fix target, if any.
    pub fn fix_target(&self) -> Option<&FixTarget> {
        self.context.as_ref().and_then(|c| c.fix.as_ref())
    }
}

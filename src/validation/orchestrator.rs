//! The validation entry point.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use super::structure::check_structure;
use crate::diff::{compute_hunk, Hunk};
use crate::document::{
    locate, parse_document, serialize_document, Document, DocumentFormat, DocumentPath,
};
use crate::error::{Result, SpecGuardError};
use crate::fix::{diff_values, AutoFixer, FixChange};
use crate::lint::{RuleId, RuleRegistry, Severity, ValidationResult};

/// Rule id of the result emitted when raw text cannot be parsed.
pub const PARSE_RULE_ID: &str = "parse/syntax";

const MAX_FIX_PASSES: usize = 5;

/// Outcome of validating raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// `None` when the text could not be parsed.
    #[serde(skip)]
    pub document: Option<Document>,
    #[serde(skip)]
    pub format: DocumentFormat,
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn is_clean(&self) -> bool {
        self.results.is_empty()
    }
}

/// A proposed fix, ready to be shown before it is accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixPreview {
    #[serde(skip)]
    pub candidate: Document,
    pub candidate_text: String,
    /// `None` when the fix left the text unchanged.
    pub hunk: Option<Hunk>,
    pub changes: Vec<FixChange>,
}

impl FixPreview {
    pub fn is_noop(&self) -> bool {
        self.hunk.is_none()
    }

    /// Accept the candidate document.
    pub fn accept(self) -> Document {
        self.candidate
    }
}

/// Runs structural checks and the rule registry, and previews fixes.
#[derive(Debug, Clone, Default)]
pub struct SpecValidator {
    registry: RuleRegistry,
    auto_fixer: AutoFixer,
}

impl SpecValidator {
    pub fn new(registry: RuleRegistry, auto_fixer: AutoFixer) -> Self {
        Self {
            registry,
            auto_fixer,
        }
    }

    /// Built-in rules and fixers.
    pub fn with_builtins() -> Self {
        Self::new(RuleRegistry::with_builtins(), AutoFixer::with_builtins())
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    pub fn auto_fixer(&self) -> &AutoFixer {
        &self.auto_fixer
    }

    pub fn auto_fixer_mut(&mut self) -> &mut AutoFixer {
        &mut self.auto_fixer
    }

    /// Parse and validate raw text.
    ///
    /// A parse failure yields a single `parse/syntax` error and no document.
    pub fn validate_text(&self, text: &str) -> ValidationReport {
        match parse_document(text) {
            Ok(parsed) => {
                let results = self.validate_document(&parsed.document, Some(text));
                ValidationReport {
                    document: Some(parsed.document),
                    format: parsed.format,
                    results,
                }
            }
            Err(e) => {
                debug!("Parse failed, skipping rules: {}", e);
                ValidationReport {
                    document: None,
                    format: crate::document::detect_format(text),
                    results: vec![parse_failure(&e)],
                }
            }
        }
    }

    /// Validate a parsed document: structural checks, then every enabled rule.
    ///
    /// When `source` is given, results without a location are located in it.
    pub fn validate_document(&self, doc: &Document, source: Option<&str>) -> Vec<ValidationResult> {
        let mut results = check_structure(doc);
        results.extend(self.registry.validate_spec(doc));

        for result in &mut results {
            if self.auto_fixer.can_fix(result) {
                result.mark_fixable(true);
            }
            if let (Some(text), Some(path), None) = (source, locator_path(result), result.line) {
                if let Some((line, column)) = locate(text, &path) {
                    result.line = Some(line);
                    result.column = Some(column);
                }
            }
        }
        debug!("Validation produced {} result(s)", results.len());
        results
    }

    /// Build the fix for one result without applying it.
    ///
    /// Uses the registered fixer for the result's rule when there is one,
    /// else the rule's own fix.
    pub fn preview_fix(&self, text: &str, result: &ValidationResult) -> Result<FixPreview> {
        let parsed = parse_document(text)?;
        let candidate = if self.auto_fixer.can_fix(result) {
            self.auto_fixer.fix(&parsed.document, result)?
        } else {
            self.registry.rule_fix(&result.rule_id, &parsed.document)?
        };
        self.preview(text, &parsed.document, candidate, parsed.format)
    }

    /// Fix every fixable result in `text`, optionally only those of one rule.
    ///
    /// Fixers run in passes over freshly validated results, so a fix that
    /// renames a node does not strand later fixes aimed at the old name.
    /// Individual fix failures are logged and skipped.
    pub fn preview_fix_all(&self, text: &str, only: Option<&RuleId>) -> Result<FixPreview> {
        let parsed = parse_document(text)?;
        let selected = |results: Vec<ValidationResult>| -> Vec<ValidationResult> {
            results
                .into_iter()
                .filter(|r| only.is_none_or(|id| &r.rule_id == id))
                .collect()
        };

        let mut candidate = parsed.document.clone();
        for pass in 1..=MAX_FIX_PASSES {
            let fixable: Vec<_> = selected(self.validate_document(&candidate, None))
                .into_iter()
                .filter(|r| self.auto_fixer.can_fix(r))
                .collect();
            if fixable.is_empty() {
                break;
            }
            let fixed = self.auto_fixer.fix_all(&candidate, &fixable);
            if fixed == candidate {
                break;
            }
            debug!("Fix pass {} resolved {} result(s)", pass, fixable.len());
            candidate = fixed;
        }

        let remaining: BTreeSet<RuleId> = selected(self.validate_document(&candidate, None))
            .into_iter()
            .filter(|r| !self.auto_fixer.can_fix(r))
            .map(|r| r.rule_id)
            .collect();
        for rule_id in remaining {
            if self.registry.get(&rule_id).is_none_or(|rule| !rule.has_fix()) {
                continue;
            }
            match self.registry.rule_fix(&rule_id, &candidate) {
                Ok(fixed) => candidate = fixed,
                Err(e) => warn!("Skipping fix for {}: {}", rule_id, e),
            }
        }

        self.preview(text, &parsed.document, candidate, parsed.format)
    }

    fn preview(
        &self,
        text: &str,
        original: &Document,
        candidate: Document,
        format: DocumentFormat,
    ) -> Result<FixPreview> {
        let changes = diff_values(original, &candidate);
        let candidate_text = if changes.is_empty() {
            text.to_string()
        } else {
            serialize_document(&candidate, format)?
        };
        let hunk = compute_hunk(text, &candidate_text);
        Ok(FixPreview {
            candidate,
            candidate_text,
            hunk,
            changes,
        })
    }
}

/// The path to locate a result by in source text.
///
/// Operation results carry a labelled path (`#/paths/GET /widgets/get`) whose
/// label is not a key in the text; it is swapped for the real path key.
fn locator_path(result: &ValidationResult) -> Option<DocumentPath> {
    let path = result.path.as_ref()?;
    if let [paths, label, method, rest @ ..] = path.segments() {
        let key = label
            .split_once(' ')
            .filter(|(verb, _)| paths == "paths" && verb.eq_ignore_ascii_case(method))
            .map(|(_, key)| key);
        if let Some(key) = key {
            let mut located = DocumentPath::operation(key, method);
            for segment in rest {
                located = located.join(segment.as_str());
            }
            return Some(located);
        }
    }
    Some(path.clone())
}

fn parse_failure(error: &SpecGuardError) -> ValidationResult {
    let mut result = ValidationResult::new(
        RuleId::new(PARSE_RULE_ID),
        Severity::Error,
        error.to_string(),
    );
    if let SpecGuardError::Parse {
        line: Some(line),
        column,
        ..
    } = error
    {
        result = result.with_location(*line, column.unwrap_or(1));
    }
    result
}

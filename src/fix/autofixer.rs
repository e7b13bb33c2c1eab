//! Result-driven document repair.
//!
//! The [`AutoFixer`] maps rule ids to fixers. A fixer receives an owned copy
//! of the document and the [`ValidationResult`] to resolve, and returns the
//! repaired document. The caller's document is never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::change::{diff_values, FixChange};
use crate::document::Document;
use crate::error::{Result, SpecGuardError};
use crate::lint::registry::run_isolated;
use crate::lint::{RuleId, ValidationResult};

/// A fixer for one rule's results.
pub type ResultFix =
    dyn Fn(Document, &ValidationResult) -> anyhow::Result<Document> + Send + Sync;

/// A repaired document and what changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixOutcome {
    pub document: Document,
    pub changes: Vec<FixChange>,
}

/// Registry of fixers keyed by rule id.
#[derive(Clone, Default)]
pub struct AutoFixer {
    fixers: BTreeMap<RuleId, Arc<ResultFix>>,
}

impl AutoFixer {
    /// Create an auto-fixer with no fixers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an auto-fixer with fixers for the built-in rules.
    pub fn with_builtins() -> Self {
        let mut fixer = Self::new();
        for (rule_id, fix) in super::fixers::builtin_fixers() {
            fixer.fixers.insert(RuleId::new(rule_id), fix);
        }
        fixer
    }

    /// Register (or replace) the fixer for a rule.
    pub fn register<F>(&mut self, rule_id: impl Into<String>, fix: F)
    where
        F: Fn(Document, &ValidationResult) -> anyhow::Result<Document> + Send + Sync + 'static,
    {
        self.fixers.insert(RuleId::new(rule_id), Arc::new(fix));
    }

    /// Whether a fixer is registered for the result's rule.
    pub fn can_fix(&self, result: &ValidationResult) -> bool {
        self.fixers.contains_key(&result.rule_id)
    }

    /// Rule ids with a registered fixer, in sorted order.
    pub fn rule_ids(&self) -> impl Iterator<Item = &RuleId> {
        self.fixers.keys()
    }

    /// Apply the fixer for one result to a copy of `doc`.
    pub fn fix(&self, doc: &Document, result: &ValidationResult) -> Result<Document> {
        let fixer = self
            .fixers
            .get(&result.rule_id)
            .ok_or_else(|| SpecGuardError::FixerNotFound {
                rule_id: result.rule_id.to_string(),
            })?;

        debug!("Fixing {} at {:?}", result.rule_id, result.path);
        debug!("Fix input: {}", doc);
        let fixed = run_isolated(&result.rule_id, || {
            fixer(doc.clone(), result).map_err(|e| SpecGuardError::RuleExecution {
                rule_id: result.rule_id.to_string(),
                message: format!("{:#}", e),
            })
        })?;
        debug!("Fix output: {}", fixed);
        Ok(fixed)
    }

    /// Like [`fix`](Self::fix), also reporting the structural changes.
    pub fn fix_with_changes(&self, doc: &Document, result: &ValidationResult) -> Result<FixOutcome> {
        let document = self.fix(doc, result)?;
        let changes = diff_values(doc, &document);
        info!("Applied fix for {} ({} changes)", result.rule_id, changes.len());
        Ok(FixOutcome { document, changes })
    }

    /// Apply fixers for every result in order.
    ///
    /// Results whose fixer is missing, fails or panics are logged and
    /// skipped; the document from before that attempt is kept.
    pub fn fix_all(&self, doc: &Document, results: &[ValidationResult]) -> Document {
        results
            .iter()
            .fold(doc.clone(), |current, result| match self.fix(&current, result) {
                Ok(fixed) => fixed,
                Err(e) => {
                    warn!("Skipping fix for {}: {}", result.rule_id, e);
                    current
                }
            })
    }
}

impl fmt::Debug for AutoFixer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoFixer")
            .field("rules", &self.fixers.keys().collect::<Vec<_>>())
            .finish()
    }
}

//! Last-edit-wins bookkeeping for repeated validation of changing text.
//!
//! Every edit takes a ticket. Results are published against a ticket and
//! are dropped when a newer ticket has already been published, so a slow
//! pass over stale text can never replace the results of a newer one.

use crate::document::fingerprint;
use crate::lint::ValidationResult;

/// Identifies one edit of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTicket {
    pub id: u64,
    /// SHA-256 of the text the ticket was issued for.
    pub fingerprint: String,
}

#[derive(Debug, Clone)]
struct Published {
    ticket: EditTicket,
    results: Vec<ValidationResult>,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationSession {
    next_id: u64,
    published: Option<Published>,
}

impl ValidationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new edit.
    pub fn begin_edit(&mut self, text: &str) -> EditTicket {
        self.next_id += 1;
        EditTicket {
            id: self.next_id,
            fingerprint: fingerprint(text),
        }
    }

    /// Whether `text` differs from the text behind the published results.
    pub fn needs_validation(&self, text: &str) -> bool {
        self.published
            .as_ref()
            .is_none_or(|p| p.ticket.fingerprint != fingerprint(text))
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: &EditTicket) -> bool {
        ticket.id == self.next_id
    }

    /// Store results for `ticket`.
    ///
    /// Returns `false`, leaving the published results untouched, when a
    /// newer ticket has already been published.
    pub fn publish(&mut self, ticket: EditTicket, results: Vec<ValidationResult>) -> bool {
        if let Some(current) = &self.published {
            if current.ticket.id > ticket.id {
                tracing::debug!(
                    "Dropping results for edit {} (edit {} already published)",
                    ticket.id,
                    current.ticket.id
                );
                return false;
            }
        }
        self.published = Some(Published { ticket, results });
        true
    }

    /// The most recently published results.
    pub fn results(&self) -> &[ValidationResult] {
        self.published
            .as_ref()
            .map(|p| p.results.as_slice())
            .unwrap_or_default()
    }

    pub fn published_ticket(&self) -> Option<&EditTicket> {
        self.published.as_ref().map(|p| &p.ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{RuleId, Severity};

    fn result(message: &str) -> ValidationResult {
        ValidationResult::new(RuleId::new("r"), Severity::Warning, message)
    }

    #[test]
    fn tickets_increase() {
        let mut session = ValidationSession::new();
        let a = session.begin_edit("a");
        let b = session.begin_edit("b");
        assert!(b.id > a.id);
        assert!(session.is_latest(&b));
        assert!(!session.is_latest(&a));
    }

    #[test]
    fn stale_publication_is_rejected() {
        let mut session = ValidationSession::new();
        let old = session.begin_edit("old");
        let new = session.begin_edit("new");

        assert!(session.publish(new.clone(), vec![result("new")]));
        assert!(!session.publish(old, vec![result("old")]));
        assert_eq!(session.results()[0].message, "new");
        assert_eq!(session.published_ticket(), Some(&new));
    }

    #[test]
    fn older_ticket_may_publish_first() {
        let mut session = ValidationSession::new();
        let old = session.begin_edit("old");
        let new = session.begin_edit("new");

        assert!(session.publish(old, vec![result("old")]));
        assert!(session.publish(new, vec![result("new")]));
        assert_eq!(session.results()[0].message, "new");
    }

    #[test]
    fn unchanged_text_skips_validation() {
        let mut session = ValidationSession::new();
        assert!(session.needs_validation("text"));
        let ticket = session.begin_edit("text");
        session.publish(ticket, vec![]);
        assert!(!session.needs_validation("text"));
        assert!(session.needs_validation("text2"));
    }

    #[test]
    fn empty_before_first_publication() {
        assert!(ValidationSession::new().results().is_empty());
    }
}

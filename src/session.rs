//! Editing sessions for documents and vouchers
//!
//! A session moves `Draft → Draft` on every edit and `Draft → Saved` or
//! `Draft → RejectedWithErrors` on validation. Editing a saved or rejected
//! session reopens it as a draft.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Form state that can be turned into an immutable record
pub trait Draft {
    /// Editable line type (document item, journal entry)
    type Line;
    /// Record produced when validation passes
    type Record;
    /// Lookups the draft needs to validate (tax rates, tolerance, ...)
    type Context<'a>;

    fn lines_mut(&mut self) -> &mut Vec<Self::Line>;

    /// Validate every field, reporting all problems at once
    fn finalize(&self, context: &Self::Context<'_>) -> Result<Self::Record, Vec<BookError>>;
}

/// Where a session stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Draft,
    Saved,
    RejectedWithErrors(Vec<String>),
}

/// An editing session around one draft
#[derive(Debug, Clone)]
pub struct EditSession<D: Draft> {
    draft: D,
    state: SessionState,
}

impl<D: Draft> EditSession<D> {
    pub fn new(draft: D) -> Self {
        Self {
            draft,
            state: SessionState::Draft,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn into_draft(self) -> D {
        self.draft
    }

    fn reopen(&mut self) {
        if self.state != SessionState::Draft {
            tracing::debug!("editing session reopened");
        }
        self.state = SessionState::Draft;
    }

    /// Edit header fields or lines through the draft's own API
    ///
    /// The session reopens even when the edit fails, since the closure may
    /// have changed the draft before returning its error.
    pub fn edit<T>(&mut self, edit: impl FnOnce(&mut D) -> BookResult<T>) -> BookResult<T> {
        let result = edit(&mut self.draft);
        self.reopen();
        result
    }

    pub fn add_line(&mut self, line: D::Line) {
        self.draft.lines_mut().push(line);
        self.reopen();
    }

    pub fn remove_line(&mut self, index: usize) -> BookResult<D::Line> {
        let lines = self.draft.lines_mut();
        if index >= lines.len() {
            return Err(BookError::Validation(format!(
                "Line {} does not exist",
                index + 1
            )));
        }
        let line = lines.remove(index);
        self.reopen();
        Ok(line)
    }

    pub fn edit_line(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut D::Line),
    ) -> BookResult<()> {
        let line = self
            .draft
            .lines_mut()
            .get_mut(index)
            .ok_or_else(|| BookError::Validation(format!("Line {} does not exist", index + 1)))?;
        edit(line);
        self.reopen();
        Ok(())
    }

    /// Validate the draft; the session ends up `Saved` or `RejectedWithErrors`
    ///
    /// On rejection the first error is returned and every message is kept in
    /// the session state.
    pub fn validate(&mut self, context: &D::Context<'_>) -> BookResult<D::Record> {
        match self.draft.finalize(context) {
            Ok(record) => {
                self.state = SessionState::Saved;
                Ok(record)
            }
            Err(errors) => {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                tracing::warn!(errors = ?messages, "draft rejected");
                self.state = SessionState::RejectedWithErrors(messages);
                Err(first_error(errors))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BooksConfig;
    use crate::documents::{DocumentBuilder, DocumentKind, ItemDraft, PricingContext};
    use crate::tax::GstSlab;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn builder() -> DocumentBuilder {
        DocumentBuilder::new(DocumentKind::SaleNote)
            .note_number("SN001".to_string())
            .date(NaiveDate::from_ymd_opt(2024, 4, 10).unwrap())
            .counterparty("Mehta Stores".to_string())
    }

    fn item(qty: i32) -> ItemDraft {
        ItemDraft::new(
            "P001".to_string(),
            BigDecimal::from(qty),
            BigDecimal::from(60),
            "gst-18".to_string(),
        )
    }

    #[test]
    fn test_draft_saved_reopened() {
        let rates: Vec<_> = GstSlab::ALL.iter().map(|s| s.tax_rate()).collect();
        let config = BooksConfig::default();
        let context = PricingContext {
            tax_rates: &rates,
            config: &config,
        };

        let mut session = EditSession::new(builder());
        assert_eq!(session.state(), &SessionState::Draft);

        // no items yet
        assert!(session.validate(&context).is_err());
        match session.state() {
            SessionState::RejectedWithErrors(messages) => assert_eq!(messages.len(), 1),
            other => panic!("unexpected state {other:?}"),
        }

        session.add_line(item(2));
        assert_eq!(session.state(), &SessionState::Draft);

        let document = session.validate(&context).unwrap();
        assert_eq!(session.state(), &SessionState::Saved);
        assert_eq!(document.grand_total, BigDecimal::from_str("141.6").unwrap());

        session.edit_line(0, |line| line.quantity = BigDecimal::from(3)).unwrap();
        assert_eq!(session.state(), &SessionState::Draft);
    }

    #[test]
    fn test_line_bounds() {
        let mut session = EditSession::new(builder());
        session.add_line(item(1));

        assert!(session.remove_line(3).is_err());
        assert!(session.edit_line(3, |_| {}).is_err());
        assert_eq!(session.remove_line(0).unwrap().quantity, BigDecimal::from(1));
        assert!(session.draft().items.is_empty());
    }

    #[test]
    fn test_failed_edit_reopens_draft() {
        let rates: Vec<_> = GstSlab::ALL.iter().map(|s| s.tax_rate()).collect();
        let config = BooksConfig::default();
        let context = PricingContext {
            tax_rates: &rates,
            config: &config,
        };

        let mut session = EditSession::new(builder().item(item(1)));
        session.validate(&context).unwrap();

        // The closure changes the draft and then fails
        let result: BookResult<()> = session.edit(|draft| {
            draft.counterparty = "Changed Traders".to_string();
            Err(BookError::validation("field is disabled"))
        });
        assert!(result.is_err());
        assert_eq!(session.state(), &SessionState::Draft);
        assert_eq!(session.draft().counterparty, "Changed Traders");
    }
}

//! Journal vouchers and the debit = credit rule

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::session::Draft;
use crate::types::*;

/// One line of a journal voucher
///
/// At most one of `debit` and `credit` is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Ledger account the line posts to
    pub account_id: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    pub narration: Option<String>,
}

impl JournalEntry {
    /// Create a debit line
    pub fn debit(account_id: String, amount: BigDecimal, narration: Option<String>) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: zero(),
            narration,
        }
    }

    /// Create a credit line
    pub fn credit(account_id: String, amount: BigDecimal, narration: Option<String>) -> Self {
        Self {
            account_id,
            debit: zero(),
            credit: amount,
            narration,
        }
    }

    /// Side carrying the amount, `None` for an empty line
    pub fn side(&self) -> Option<EntryType> {
        let zero = zero();
        if self.debit > zero {
            Some(EntryType::Debit)
        } else if self.credit > zero {
            Some(EntryType::Credit)
        } else {
            None
        }
    }

    /// Set the debit; refused while the credit side holds an amount
    pub fn set_debit(&mut self, amount: BigDecimal) -> BookResult<()> {
        if self.credit != zero() && amount != zero() {
            return Err(BookError::Validation(format!(
                "Line for '{}' already carries a credit; clear it before entering a debit",
                self.account_id
            )));
        }
        self.debit = amount;
        Ok(())
    }

    /// Set the credit; refused while the debit side holds an amount
    pub fn set_credit(&mut self, amount: BigDecimal) -> BookResult<()> {
        if self.debit != zero() && amount != zero() {
            return Err(BookError::Validation(format!(
                "Line for '{}' already carries a debit; clear it before entering a credit",
                self.account_id
            )));
        }
        self.credit = amount;
        Ok(())
    }

    pub fn validate(&self) -> BookResult<()> {
        if self.account_id.trim().is_empty() {
            return Err(BookError::validation("Journal line requires an account"));
        }

        let zero = zero();
        if self.debit < zero || self.credit < zero {
            return Err(BookError::Validation(format!(
                "Line for '{}' has a negative amount",
                self.account_id
            )));
        }

        if self.debit > zero && self.credit > zero {
            return Err(BookError::Validation(format!(
                "Line for '{}' cannot carry both a debit and a credit",
                self.account_id
            )));
        }

        if self.side().is_none() {
            return Err(BookError::Validation(format!(
                "Line for '{}' has no amount",
                self.account_id
            )));
        }

        Ok(())
    }
}

/// Σ debit and Σ credit over a set of lines
pub fn journal_totals(entries: &[JournalEntry]) -> (BigDecimal, BigDecimal) {
    let debits: BigDecimal = entries.iter().map(|e| &e.debit).sum();
    let credits: BigDecimal = entries.iter().map(|e| &e.credit).sum();
    (debits, credits)
}

/// Compare the debit and credit columns
///
/// Balanced when `|Σ debit − Σ credit| < tolerance`; otherwise fails with
/// the signed difference `Σ debit − Σ credit`.
pub fn validate_journal_balance(
    entries: &[JournalEntry],
    tolerance: &BigDecimal,
) -> BookResult<()> {
    let (debits, credits) = journal_totals(entries);
    let difference = &debits - &credits;

    if difference.abs() < *tolerance {
        Ok(())
    } else {
        Err(BookError::Imbalance { difference })
    }
}

/// A journal voucher accepted for posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalVoucher {
    pub voucher_number: String,
    pub date: NaiveDate,
    pub narration: String,
    pub entries: Vec<JournalEntry>,
}

impl JournalVoucher {
    pub fn total_debits(&self) -> BigDecimal {
        journal_totals(&self.entries).0
    }

    pub fn total_credits(&self) -> BigDecimal {
        journal_totals(&self.entries).1
    }

    /// Check line rules and the balance
    pub fn validate(&self, tolerance: &BigDecimal) -> BookResult<()> {
        if self.voucher_number.trim().is_empty() {
            return Err(BookError::validation("Voucher number is required"));
        }

        if self.entries.len() < 2 {
            return Err(BookError::validation(
                "A journal voucher needs at least two lines",
            ));
        }

        for entry in &self.entries {
            entry.validate()?;
        }

        validate_journal_balance(&self.entries, tolerance)
    }
}

/// Builder for journal vouchers
#[derive(Debug, Clone, PartialEq)]
pub struct JournalVoucherBuilder {
    pub voucher_number: String,
    pub date: NaiveDate,
    pub narration: String,
    pub entries: Vec<JournalEntry>,
}

impl JournalVoucherBuilder {
    pub fn new(voucher_number: String, date: NaiveDate, narration: String) -> Self {
        Self {
            voucher_number,
            date,
            narration,
            entries: Vec::new(),
        }
    }

    /// Add a debit line
    pub fn debit(
        mut self,
        account_id: String,
        amount: BigDecimal,
        narration: Option<String>,
    ) -> Self {
        self.entries
            .push(JournalEntry::debit(account_id, amount, narration));
        self
    }

    /// Add a credit line
    pub fn credit(
        mut self,
        account_id: String,
        amount: BigDecimal,
        narration: Option<String>,
    ) -> Self {
        self.entries
            .push(JournalEntry::credit(account_id, amount, narration));
        self
    }

    pub fn entry(mut self, entry: JournalEntry) -> Self {
        self.entries.push(entry);
        self
    }

    fn line_mut(&mut self, index: usize) -> BookResult<&mut JournalEntry> {
        self.entries
            .get_mut(index)
            .ok_or_else(|| BookError::Validation(format!("Line {} does not exist", index + 1)))
    }

    /// Edit the debit of an existing line
    pub fn set_debit(&mut self, index: usize, amount: BigDecimal) -> BookResult<()> {
        self.line_mut(index)?.set_debit(amount)
    }

    /// Edit the credit of an existing line
    pub fn set_credit(&mut self, index: usize, amount: BigDecimal) -> BookResult<()> {
        self.line_mut(index)?.set_credit(amount)
    }

    /// Current Σ debit − Σ credit, for live display while editing
    pub fn difference(&self) -> BigDecimal {
        let (debits, credits) = journal_totals(&self.entries);
        debits - credits
    }

    /// Validate every line and the balance, collecting all errors
    pub fn check(&self, tolerance: &BigDecimal) -> Result<JournalVoucher, Vec<BookError>> {
        let mut errors = Vec::new();

        if self.voucher_number.trim().is_empty() {
            errors.push(BookError::validation("Voucher number is required"));
        }

        if self.entries.len() < 2 {
            errors.push(BookError::validation(
                "A journal voucher needs at least two lines",
            ));
        }

        errors.extend(self.entries.iter().filter_map(|e| e.validate().err()));

        if let Err(e) = validate_journal_balance(&self.entries, tolerance) {
            errors.push(e);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(JournalVoucher {
            voucher_number: self.voucher_number.trim().to_string(),
            date: self.date,
            narration: self.narration.clone(),
            entries: self.entries.clone(),
        })
    }

    /// Build the voucher, reporting the first problem found
    pub fn build(&self, tolerance: &BigDecimal) -> BookResult<JournalVoucher> {
        self.check(tolerance).map_err(first_error)
    }
}

impl Draft for JournalVoucherBuilder {
    type Line = JournalEntry;
    type Record = JournalVoucher;
    /// Balance tolerance
    type Context<'a> = BigDecimal;

    fn lines_mut(&mut self) -> &mut Vec<JournalEntry> {
        &mut self.entries
    }

    fn finalize(&self, tolerance: &BigDecimal) -> Result<JournalVoucher, Vec<BookError>> {
        self.check(tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{EditSession, SessionState};
    use std::str::FromStr;

    fn tolerance() -> BigDecimal {
        BigDecimal::from_str("0.001").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
    }

    #[test]
    fn test_balanced_entries() {
        let entries = vec![
            JournalEntry::debit("la-rent".into(), BigDecimal::from(500), None),
            JournalEntry::credit("la-cash".into(), BigDecimal::from(500), None),
        ];
        assert!(validate_journal_balance(&entries, &tolerance()).is_ok());
    }

    #[test]
    fn test_imbalance_reports_signed_difference() {
        let entries = vec![
            JournalEntry::debit("la-rent".into(), BigDecimal::from(500), None),
            JournalEntry::credit("la-cash".into(), BigDecimal::from(400), None),
        ];
        match validate_journal_balance(&entries, &tolerance()) {
            Err(BookError::Imbalance { difference }) => {
                assert_eq!(difference, BigDecimal::from(100))
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let reversed = vec![
            JournalEntry::debit("la-rent".into(), BigDecimal::from(400), None),
            JournalEntry::credit("la-cash".into(), BigDecimal::from(500), None),
        ];
        match validate_journal_balance(&reversed, &tolerance()) {
            Err(BookError::Imbalance { difference }) => {
                assert_eq!(difference, BigDecimal::from(-100))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_tolerance_boundary() {
        let entries = vec![
            JournalEntry::debit("a".into(), BigDecimal::from_str("100.0005").unwrap(), None),
            JournalEntry::credit("b".into(), BigDecimal::from(100), None),
        ];
        assert!(validate_journal_balance(&entries, &tolerance()).is_ok());

        let entries = vec![
            JournalEntry::debit("a".into(), BigDecimal::from_str("100.001").unwrap(), None),
            JournalEntry::credit("b".into(), BigDecimal::from(100), None),
        ];
        assert!(validate_journal_balance(&entries, &tolerance()).is_err());
    }

    #[test]
    fn test_empty_entries_balance() {
        assert!(validate_journal_balance(&[], &tolerance()).is_ok());
    }

    #[test]
    fn test_entry_rules() {
        let both = JournalEntry {
            account_id: "a".into(),
            debit: BigDecimal::from(1),
            credit: BigDecimal::from(1),
            narration: None,
        };
        assert!(both.validate().is_err());

        let empty = JournalEntry::debit("a".into(), BigDecimal::from(0), None);
        assert!(empty.validate().is_err());

        let negative = JournalEntry::credit("a".into(), BigDecimal::from(-5), None);
        assert!(negative.validate().is_err());

        let unnamed = JournalEntry::credit(" ".into(), BigDecimal::from(5), None);
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_opposite_field_disabled_while_set() {
        let mut entry = JournalEntry::debit("a".into(), BigDecimal::from(10), None);

        assert!(entry.set_credit(BigDecimal::from(10)).is_err());
        assert_eq!(entry.credit, BigDecimal::from(0));

        entry.set_debit(BigDecimal::from(0)).unwrap();
        entry.set_credit(BigDecimal::from(10)).unwrap();
        assert_eq!(entry.side(), Some(EntryType::Credit));
    }

    #[test]
    fn test_builder_collects_errors() {
        let builder = JournalVoucherBuilder::new(String::new(), date(), "Rent".into())
            .debit("la-rent".into(), BigDecimal::from(500), None);
        let errors = builder.check(&tolerance()).unwrap_err();

        // voucher number, line count, imbalance
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[2], BookError::Imbalance { .. }));
    }

    #[test]
    fn test_builder_difference_tracks_edits() {
        let mut builder = JournalVoucherBuilder::new("JV001".into(), date(), "Rent".into())
            .debit("la-rent".into(), BigDecimal::from(500), None)
            .credit("la-cash".into(), BigDecimal::from(400), None);
        assert_eq!(builder.difference(), BigDecimal::from(100));

        builder.set_credit(1, BigDecimal::from(500)).unwrap();
        assert_eq!(builder.difference(), BigDecimal::from(0));

        let voucher = builder.build(&tolerance()).unwrap();
        assert_eq!(voucher.total_debits(), voucher.total_credits());
    }

    #[test]
    fn test_voucher_session() {
        let builder = JournalVoucherBuilder::new("JV002".into(), date(), "Adjustment".into())
            .debit("la-rent".into(), BigDecimal::from(500), None);
        let mut session = EditSession::new(builder);

        assert!(session.validate(&tolerance()).is_err());
        assert!(matches!(
            session.state(),
            SessionState::RejectedWithErrors(_)
        ));

        session.add_line(JournalEntry::credit(
            "la-cash".into(),
            BigDecimal::from(500),
            None,
        ));
        assert_eq!(session.state(), &SessionState::Draft);

        let voucher = session.validate(&tolerance()).unwrap();
        assert_eq!(voucher.entries.len(), 2);
        assert_eq!(session.state(), &SessionState::Saved);

        // disabled field: session stays saved
        assert!(session
            .edit(|draft| draft.set_debit(1, BigDecimal::from(5)))
            .is_err());
        assert_eq!(session.state(), &SessionState::Saved);
    }
}

//! Core types shared across the bookkeeping modules

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Account types following standard accounting principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Assets - what the business owns (Cash, Inventory, Equipment, etc.)
    Asset,
    /// Liabilities - what the business owes (Loans, Accounts Payable, etc.)
    Liability,
    /// Equity - owner's interest in the business (Capital, Retained Earnings, etc.)
    Equity,
    /// Income/Revenue - money earned by the business
    Income,
    /// Expenses - costs incurred by the business
    Expense,
}

impl AccountType {
    /// Returns the normal balance side for this account type
    /// Assets and Expenses normally have debit balances
    /// Liabilities, Equity, and Income normally have credit balances
    pub fn normal_balance(&self) -> EntryType {
        match self {
            AccountType::Asset | AccountType::Expense => EntryType::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Income => EntryType::Credit,
        }
    }
}

/// Side of a double-entry posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Debit,
    Credit,
}

/// Errors that can occur in the bookkeeping system
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Cannot delete '{id}': {children} child account(s) still reference it")]
    HasChildren { id: String, children: usize },
    #[error("Cannot delete ledger account '{id}': balance is {balance}, not zero")]
    NonZeroBalance { id: String, balance: BigDecimal },
    #[error("Voucher is not balanced: debits minus credits = {difference}")]
    Imbalance { difference: BigDecimal },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BookError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        BookError::Validation(message.into())
    }
}

/// First of a non-empty list of draft errors
pub(crate) fn first_error(errors: Vec<BookError>) -> BookError {
    errors
        .into_iter()
        .next()
        .unwrap_or_else(|| BookError::validation("Draft was rejected"))
}

/// Result type for bookkeeping operations
pub type BookResult<T> = Result<T, BookError>;

/// Shorthand for a zero amount
pub(crate) fn zero() -> BigDecimal {
    BigDecimal::from(0)
}

//! Trial balance over the ledger accounts of a chart

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::chart::{account_type_of, AccountNode};
use crate::types::*;

/// One ledger's line on the trial balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account_id: String,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub debit_balance: Option<BigDecimal>,
    pub credit_balance: Option<BigDecimal>,
}

impl TrialBalanceRow {
    /// Get the balance amount regardless of debit/credit
    pub fn balance_amount(&self) -> BigDecimal {
        self.debit_balance
            .clone()
            .or_else(|| self.credit_balance.clone())
            .unwrap_or_else(zero)
    }
}

/// Debit and credit columns of every ledger account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Ordered by account code
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
    /// Columns agree within the balance tolerance
    pub is_balanced: bool,
}

/// Build the trial balance from current ledger balances
///
/// Positive balances go to the debit column, negative ones to the credit
/// column; zero balances appear with both columns empty.
pub fn trial_balance(nodes: &[AccountNode], tolerance: &BigDecimal) -> BookResult<TrialBalance> {
    let mut rows = Vec::new();
    let mut total_debits = zero();
    let mut total_credits = zero();

    for ledger in nodes.iter().filter_map(AccountNode::as_ledger) {
        let account_type = account_type_of(nodes, &ledger.id)?;
        let (debit_balance, credit_balance) = match ledger.balance_side() {
            Some(EntryType::Debit) => {
                total_debits += &ledger.balance;
                (Some(ledger.balance.clone()), None)
            }
            Some(EntryType::Credit) => {
                let amount = ledger.balance.abs();
                total_credits += &amount;
                (None, Some(amount))
            }
            None => (None, None),
        };

        rows.push(TrialBalanceRow {
            account_id: ledger.id.clone(),
            code: ledger.code.clone(),
            name: ledger.name.clone(),
            account_type,
            debit_balance,
            credit_balance,
        });
    }

    rows.sort_by(|a, b| a.code.cmp(&b.code));
    let is_balanced = (&total_debits - &total_credits).abs() < *tolerance;

    Ok(TrialBalance {
        rows,
        total_debits,
        total_credits,
        is_balanced,
    })
}

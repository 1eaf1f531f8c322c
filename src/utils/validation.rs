//! Validation utilities

use bigdecimal::BigDecimal;
use std::collections::HashSet;

use crate::chart::AccountNode;
use crate::traits::*;
use crate::types::*;
use crate::vouchers::JournalVoucher;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> BookResult<()> {
    if *amount <= zero() {
        Err(BookError::validation("Amount must be positive"))
    } else {
        Ok(())
    }
}

/// Validate that an account code is well formed
pub fn validate_account_code(code: &str) -> BookResult<()> {
    if code.trim().is_empty() {
        return Err(BookError::validation("Account code cannot be empty"));
    }

    if code.len() > 30 {
        return Err(BookError::validation(
            "Account code cannot exceed 30 characters",
        ));
    }

    // Digits and the dot separator only
    if !code.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(BookError::Validation(format!(
            "Account code '{}' can only contain digits and dots",
            code
        )));
    }

    Ok(())
}

/// Validate that an account name is valid
pub fn validate_account_name(name: &str) -> BookResult<()> {
    if name.trim().is_empty() {
        return Err(BookError::validation("Account name cannot be empty"));
    }

    if name.len() > 100 {
        return Err(BookError::validation(
            "Account name cannot exceed 100 characters",
        ));
    }

    Ok(())
}

/// Validate a voucher narration
pub fn validate_narration(narration: &str) -> BookResult<()> {
    if narration.trim().is_empty() {
        return Err(BookError::validation("Narration cannot be empty"));
    }

    if narration.len() > 500 {
        return Err(BookError::validation(
            "Narration cannot exceed 500 characters",
        ));
    }

    Ok(())
}

/// Node validator enforcing code charset and name length
pub struct StrictNodeValidator;

impl NodeValidator for StrictNodeValidator {
    fn validate_node(&self, node: &AccountNode) -> BookResult<()> {
        DefaultNodeValidator.validate_node(node)?;
        validate_account_code(node.code())?;
        validate_account_name(node.name())?;

        if let Some(ledger) = node.as_ledger() {
            let currency = ledger.currency.as_str();
            if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(BookError::Validation(format!(
                    "Currency '{}' is not an ISO 4217 code",
                    currency
                )));
            }
        }

        Ok(())
    }
}

/// Voucher validator with narration and duplicate-line checks
pub struct StrictVoucherValidator;

impl VoucherValidator for StrictVoucherValidator {
    fn validate_voucher(
        &self,
        voucher: &JournalVoucher,
        tolerance: &BigDecimal,
    ) -> BookResult<()> {
        voucher.validate(tolerance)?;

        validate_narration(&voucher.narration)?;

        // Same account cannot appear twice on the same side
        let mut seen = HashSet::new();
        for entry in &voucher.entries {
            if let Some(side) = entry.side() {
                if !seen.insert((entry.account_id.as_str(), side)) {
                    return Err(BookError::Validation(format!(
                        "Account '{}' appears multiple times on the {:?} side",
                        entry.account_id, side
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::LedgerAccount;
    use crate::vouchers::JournalVoucherBuilder;
    use chrono::NaiveDate;

    #[test]
    fn test_account_code_charset() {
        assert!(validate_account_code("1.01.2.001").is_ok());
        assert!(validate_account_code("1.01-A").is_err());
        assert!(validate_account_code("").is_err());
    }

    #[test]
    fn test_positive_amount() {
        assert!(validate_positive_amount(&BigDecimal::from(1)).is_ok());
        assert!(validate_positive_amount(&BigDecimal::from(0)).is_err());
    }

    #[test]
    fn test_strict_node_currency() {
        let mut ledger = LedgerAccount {
            id: "la-1".to_string(),
            code: "1.01.1.001".to_string(),
            name: "Cash".to_string(),
            control_account_id: "ca-1".to_string(),
            balance: BigDecimal::from(0),
            can_post: true,
            currency: "INR".to_string(),
        };
        assert!(StrictNodeValidator
            .validate_node(&AccountNode::LedgerAccount(ledger.clone()))
            .is_ok());

        ledger.currency = "rupee".to_string();
        assert!(StrictNodeValidator
            .validate_node(&AccountNode::LedgerAccount(ledger))
            .is_err());
    }

    #[test]
    fn test_strict_voucher_duplicates() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let voucher = JournalVoucherBuilder::new("JV9".into(), date, "Split".into())
            .debit("la-a".into(), BigDecimal::from(50), None)
            .debit("la-a".into(), BigDecimal::from(50), None)
            .credit("la-b".into(), BigDecimal::from(100), None)
            .build(&BigDecimal::from(1))
            .unwrap();

        let err = StrictVoucherValidator
            .validate_voucher(&voucher, &BigDecimal::from(1))
            .unwrap_err();
        assert!(err.to_string().contains("multiple times"));
        assert!(DefaultVoucherValidator
            .validate_voucher(&voucher, &BigDecimal::from(1))
            .is_ok());
    }
}

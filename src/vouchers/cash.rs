//! Payment and receipt vouchers

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::validate_positive_amount;

/// How money moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Bank,
    Cheque,
    Online,
}

/// Money paid out to `account_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentVoucher {
    pub voucher_number: String,
    pub date: NaiveDate,
    /// Ledger debited (supplier, expense, ...)
    pub account_id: String,
    pub amount: BigDecimal,
    pub mode: PaymentMode,
    pub narration: String,
}

/// Money received from `account_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptVoucher {
    pub voucher_number: String,
    pub date: NaiveDate,
    /// Ledger credited (customer, income, ...)
    pub account_id: String,
    pub amount: BigDecimal,
    pub mode: PaymentMode,
    pub narration: String,
}

fn validate_cash_voucher(
    voucher_number: &str,
    account_id: &str,
    amount: &BigDecimal,
) -> BookResult<()> {
    if voucher_number.trim().is_empty() {
        return Err(BookError::validation("Voucher number is required"));
    }

    if account_id.trim().is_empty() {
        return Err(BookError::validation("Voucher requires an account"));
    }

    validate_positive_amount(amount)
}

impl PaymentVoucher {
    pub fn validate(&self) -> BookResult<()> {
        validate_cash_voucher(&self.voucher_number, &self.account_id, &self.amount)
    }
}

impl ReceiptVoucher {
    pub fn validate(&self) -> BookResult<()> {
        validate_cash_voucher(&self.voucher_number, &self.account_id, &self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(amount: i64) -> PaymentVoucher {
        PaymentVoucher {
            voucher_number: "PV001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            account_id: "la-rent".to_string(),
            amount: BigDecimal::from(amount),
            mode: PaymentMode::Bank,
            narration: "April rent".to_string(),
        }
    }

    #[test]
    fn test_payment_validation() {
        assert!(payment(15000).validate().is_ok());
        assert!(payment(-10).validate().is_err());

        let err = payment(0).validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Amount must be positive");

        let mut missing = payment(100);
        missing.account_id.clear();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_receipt_validation() {
        let receipt = ReceiptVoucher {
            voucher_number: " ".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            account_id: "la-debtors".to_string(),
            amount: BigDecimal::from(100),
            mode: PaymentMode::Cash,
            narration: String::new(),
        };
        assert!(receipt.validate().is_err());
    }
}

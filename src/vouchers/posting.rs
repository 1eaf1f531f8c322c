//! Common posting patterns: the journal voucher behind each document and
//! cash voucher

use bigdecimal::BigDecimal;

use super::cash::*;
use super::journal::*;
use crate::documents::{Document, DocumentKind};
use crate::types::*;

/// Ledgers a trading document posts to
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPostingAccounts {
    /// Supplier or customer ledger
    pub party_account_id: String,
    /// Purchases or sales ledger
    pub trade_account_id: String,
    /// Input GST (purchases) or output GST (sales) ledger
    pub tax_account_id: String,
}

/// Journal voucher number derived from a source voucher or note
///
/// The prefix names the source type, since note numbers repeat across kinds.
pub fn journal_number_for(source_prefix: &str, source_number: &str) -> String {
    format!("JV-{}-{}", source_prefix, source_number)
}

/// Build the balanced journal voucher for a document
///
/// Sale: Dr party grand total, Cr sales (subtotal − discount), Cr output tax.
/// Purchase: Dr purchases, Dr input tax, Cr party. Returns reverse the sides.
/// Zero-value lines are left out.
pub fn document_journal(
    document: &Document,
    accounts: &DocumentPostingAccounts,
    tolerance: &BigDecimal,
) -> BookResult<JournalVoucher> {
    if document.grand_total < zero() {
        return Err(BookError::Validation(format!(
            "Note {} has a negative grand total and cannot be posted",
            document.note_number
        )));
    }
    if document.net_value() < zero() {
        return Err(BookError::Validation(format!(
            "Note {} has a discount above its sub total and cannot be posted",
            document.note_number
        )));
    }

    let party = (
        accounts.party_account_id.clone(),
        document.grand_total.clone(),
        format!("{} {}", document.kind.counterparty_label(), document.counterparty),
    );
    let trade = (
        accounts.trade_account_id.clone(),
        document.net_value(),
        "net value".to_string(),
    );
    let tax = (
        accounts.tax_account_id.clone(),
        document.total_tax_amount.clone(),
        "GST".to_string(),
    );

    // sides as (debits, credits)
    let (debits, credits) = match document.kind {
        DocumentKind::SaleNote | DocumentKind::PurchaseReturnNote => {
            (vec![party], vec![trade, tax])
        }
        DocumentKind::PurchaseNote | DocumentKind::SaleReturnNote => {
            (vec![trade, tax], vec![party])
        }
    };

    let mut entries = Vec::new();
    for (account_id, amount, narration) in debits {
        if amount != zero() {
            entries.push(JournalEntry::debit(account_id, amount, Some(narration)));
        }
    }
    for (account_id, amount, narration) in credits {
        if amount != zero() {
            entries.push(JournalEntry::credit(account_id, amount, Some(narration)));
        }
    }

    let mut narration = format!("{:?} {}", document.kind, document.note_number);
    if let Some(original) = &document.original_note {
        narration.push_str(&format!(" against {}", original));
    }

    let builder = JournalVoucherBuilder {
        voucher_number: journal_number_for(document.kind.prefix(), &document.note_number),
        date: document.date,
        narration,
        entries,
    };
    builder.build(tolerance)
}

/// Dr the paid account, Cr the cash or bank ledger
pub fn payment_journal(
    voucher: &PaymentVoucher,
    settlement_account_id: String,
    tolerance: &BigDecimal,
) -> BookResult<JournalVoucher> {
    voucher.validate()?;

    JournalVoucherBuilder::new(
        journal_number_for("PV", &voucher.voucher_number),
        voucher.date,
        voucher.narration.clone(),
    )
    .debit(voucher.account_id.clone(), voucher.amount.clone(), None)
    .credit(
        settlement_account_id,
        voucher.amount.clone(),
        Some(format!("{:?} payment", voucher.mode)),
    )
    .build(tolerance)
}

/// Dr the cash or bank ledger, Cr the account money came from
pub fn receipt_journal(
    voucher: &ReceiptVoucher,
    settlement_account_id: String,
    tolerance: &BigDecimal,
) -> BookResult<JournalVoucher> {
    voucher.validate()?;

    JournalVoucherBuilder::new(
        journal_number_for("RV", &voucher.voucher_number),
        voucher.date,
        voucher.narration.clone(),
    )
    .debit(
        settlement_account_id,
        voucher.amount.clone(),
        Some(format!("{:?} receipt", voucher.mode)),
    )
    .credit(voucher.account_id.clone(), voucher.amount.clone(), None)
    .build(tolerance)
}

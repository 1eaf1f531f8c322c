//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::chart::{AccountLevel, AccountNode};
use crate::documents::{Document, DocumentKind, Product};
use crate::tax::TaxRate;
use crate::types::*;
use crate::vouchers::{JournalVoucher, PaymentVoucher, ReceiptVoucher};

/// Storage abstraction for a set of books
///
/// The bookkeeping core works against any backend (SQLite, PostgreSQL,
/// in-memory, etc.) that implements these methods. Structural rules are
/// enforced before the storage is called, so implementations only persist.
#[async_trait]
pub trait BookStorage: Send + Sync {
    /// Save a chart-of-accounts node
    async fn save_node(&mut self, node: &AccountNode) -> BookResult<()>;

    /// Get a node by ID
    async fn get_node(&self, id: &str) -> BookResult<Option<AccountNode>>;

    /// List all nodes, optionally filtered by level
    async fn list_nodes(&self, level: Option<AccountLevel>) -> BookResult<Vec<AccountNode>>;

    /// Replace an existing node
    async fn update_node(&mut self, node: &AccountNode) -> BookResult<()>;

    /// Remove a node
    async fn delete_node(&mut self, id: &str) -> BookResult<()>;

    async fn save_tax_rate(&mut self, tax_rate: &TaxRate) -> BookResult<()>;

    async fn get_tax_rate(&self, id: &str) -> BookResult<Option<TaxRate>>;

    async fn list_tax_rates(&self) -> BookResult<Vec<TaxRate>>;

    async fn delete_tax_rate(&mut self, id: &str) -> BookResult<()>;

    async fn save_product(&mut self, product: &Product) -> BookResult<()>;

    async fn get_product(&self, id: &str) -> BookResult<Option<Product>>;

    async fn list_products(&self) -> BookResult<Vec<Product>>;

    /// Save a purchase/sale/return note, keyed by kind and note number
    async fn save_document(&mut self, document: &Document) -> BookResult<()>;

    async fn get_document(
        &self,
        kind: DocumentKind,
        note_number: &str,
    ) -> BookResult<Option<Document>>;

    /// List documents, optionally filtered by kind
    async fn list_documents(&self, kind: Option<DocumentKind>) -> BookResult<Vec<Document>>;

    /// Save a posted journal voucher
    async fn save_journal_voucher(&mut self, voucher: &JournalVoucher) -> BookResult<()>;

    async fn get_journal_voucher(&self, voucher_number: &str)
        -> BookResult<Option<JournalVoucher>>;

    /// List journal vouchers within a date range
    async fn list_journal_vouchers(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BookResult<Vec<JournalVoucher>>;

    async fn save_payment_voucher(&mut self, voucher: &PaymentVoucher) -> BookResult<()>;

    async fn list_payment_vouchers(&self) -> BookResult<Vec<PaymentVoucher>>;

    async fn save_receipt_voucher(&mut self, voucher: &ReceiptVoucher) -> BookResult<()>;

    async fn list_receipt_vouchers(&self) -> BookResult<Vec<ReceiptVoucher>>;
}

/// Trait for implementing custom account node validation rules
pub trait NodeValidator: Send + Sync {
    /// Validate a node before saving
    fn validate_node(&self, node: &AccountNode) -> BookResult<()>;
}

/// Trait for implementing custom journal voucher validation rules
pub trait VoucherValidator: Send + Sync {
    /// Validate a voucher before posting
    fn validate_voucher(&self, voucher: &JournalVoucher, tolerance: &BigDecimal)
        -> BookResult<()>;
}

/// Default node validator with basic rules
pub struct DefaultNodeValidator;

impl NodeValidator for DefaultNodeValidator {
    fn validate_node(&self, node: &AccountNode) -> BookResult<()> {
        if node.id().trim().is_empty() {
            return Err(BookError::validation("Account ID cannot be empty"));
        }

        if node.name().trim().is_empty() {
            return Err(BookError::validation("Account name cannot be empty"));
        }

        Ok(())
    }
}

/// Default voucher validator with the double-entry rules only
pub struct DefaultVoucherValidator;

impl VoucherValidator for DefaultVoucherValidator {
    fn validate_voucher(
        &self,
        voucher: &JournalVoucher,
        tolerance: &BigDecimal,
    ) -> BookResult<()> {
        voucher.validate(tolerance)
    }
}

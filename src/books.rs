//! Books orchestrator that coordinates the chart, masters, documents and
//! vouchers over one storage backend

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

use crate::chart::*;
use crate::config::BooksConfig;
use crate::documents::*;
use crate::reports::{self, TrialBalance};
use crate::tax::TaxRate;
use crate::traits::*;
use crate::types::*;
use crate::utils::seed;
use crate::vouchers::*;

/// A set of books: chart of accounts, masters, documents and vouchers
pub struct Books<S: BookStorage> {
    chart: ChartManager<S>,
    storage: S,
    voucher_validator: Box<dyn VoucherValidator>,
    config: BooksConfig,
}

impl<S: BookStorage + Clone> Books<S> {
    /// Create books over the given storage backend
    pub fn new(storage: S, config: BooksConfig) -> Self {
        Self {
            chart: ChartManager::new(storage.clone(), config.clone()),
            storage,
            voucher_validator: Box::new(DefaultVoucherValidator),
            config,
        }
    }

    /// Create books with custom validators
    pub fn with_validators(
        storage: S,
        config: BooksConfig,
        node_validator: Box<dyn NodeValidator>,
        voucher_validator: Box<dyn VoucherValidator>,
    ) -> Self {
        Self {
            chart: ChartManager::with_validator(storage.clone(), config.clone(), node_validator),
            storage,
            voucher_validator,
            config,
        }
    }

    /// Seed empty storage with the standard chart, GST slabs and sample
    /// products, then open books over it
    pub async fn seeded(mut storage: S, config: BooksConfig) -> BookResult<Self> {
        config.validate()?;
        seed::seed_storage(&mut storage).await?;
        Ok(Self::new(storage, config))
    }

    pub fn config(&self) -> &BooksConfig {
        &self.config
    }

    // Chart of accounts

    pub async fn create_node(&mut self, draft: NewNode) -> BookResult<AccountNode> {
        self.chart.create_node(draft).await
    }

    pub async fn get_node(&self, id: &str) -> BookResult<Option<AccountNode>> {
        self.chart.get_node(id).await
    }

    pub async fn rename_node(&mut self, id: &str, name: String) -> BookResult<AccountNode> {
        self.chart.rename_node(id, name).await
    }

    pub async fn delete_node(&mut self, id: &str) -> BookResult<AccountNode> {
        self.chart.delete_node(id).await
    }

    pub async fn list_children(&self, parent_id: &str) -> BookResult<Vec<AccountNode>> {
        self.chart.list_children(parent_id).await
    }

    pub async fn list_roots(&self) -> BookResult<Vec<AccountNode>> {
        self.chart.list_roots().await
    }

    pub async fn account_path(&self, id: &str) -> BookResult<Vec<AccountNode>> {
        self.chart.account_path(id).await
    }

    pub async fn list_ledgers(&self) -> BookResult<Vec<LedgerAccount>> {
        self.chart.list_ledgers().await
    }

    /// Current balance of a ledger account
    pub async fn ledger_balance(&self, id: &str) -> BookResult<BigDecimal> {
        Ok(self.chart.get_ledger_required(id).await?.balance)
    }

    // Masters

    /// Register a tax rate; ids are unique
    pub async fn add_tax_rate(&mut self, tax_rate: TaxRate) -> BookResult<TaxRate> {
        tax_rate.validate()?;

        if self.storage.get_tax_rate(&tax_rate.id).await?.is_some() {
            return Err(BookError::Validation(format!(
                "Tax rate '{}' already exists",
                tax_rate.id
            )));
        }

        self.storage.save_tax_rate(&tax_rate).await?;
        info!(id = %tax_rate.id, rate = %tax_rate.rate, "tax rate added");
        Ok(tax_rate)
    }

    pub async fn list_tax_rates(&self) -> BookResult<Vec<TaxRate>> {
        self.storage.list_tax_rates().await
    }

    /// Delete a tax rate no product still defaults to
    pub async fn delete_tax_rate(&mut self, id: &str) -> BookResult<()> {
        let products = self.storage.list_products().await?;
        if let Some(product) = products
            .iter()
            .find(|p| p.tax_rate_id.as_deref() == Some(id))
        {
            warn!(id, product = %product.code, "tax rate deletion rejected");
            return Err(BookError::Validation(format!(
                "Tax rate '{}' is used by product '{}'",
                id, product.code
            )));
        }

        self.storage.delete_tax_rate(id).await?;
        info!(id, "tax rate deleted");
        Ok(())
    }

    /// Register a product; its default tax rate must exist
    pub async fn add_product(&mut self, product: Product) -> BookResult<Product> {
        product.validate()?;

        if self.storage.get_product(&product.id).await?.is_some() {
            return Err(BookError::Validation(format!(
                "Product '{}' already exists",
                product.id
            )));
        }

        if let Some(rate_id) = &product.tax_rate_id {
            if self.storage.get_tax_rate(rate_id).await?.is_none() {
                return Err(BookError::NotFound(format!("tax rate '{}'", rate_id)));
            }
        }

        self.storage.save_product(&product).await?;
        info!(id = %product.id, code = %product.code, "product added");
        Ok(product)
    }

    pub async fn list_products(&self) -> BookResult<Vec<Product>> {
        self.storage.list_products().await
    }

    // Documents

    /// Price and store a purchase, sale or return note
    #[instrument(skip(self, draft), fields(kind = ?draft.kind, note = %draft.note_number))]
    pub async fn save_document(&mut self, draft: &DocumentBuilder) -> BookResult<Document> {
        let tax_rates = self.storage.list_tax_rates().await?;
        let document = draft
            .build(&tax_rates, &self.config)
            .inspect_err(|e| warn!(error = %e, "document rejected"))?;

        if self
            .storage
            .get_document(document.kind, &document.note_number)
            .await?
            .is_some()
        {
            return Err(BookError::Validation(format!(
                "{:?} {} already exists",
                document.kind, document.note_number
            )));
        }

        for item in &document.items {
            if self.storage.get_product(&item.product_id).await?.is_none() {
                return Err(BookError::NotFound(format!("product '{}'", item.product_id)));
            }
        }

        if let (Some(original_kind), Some(original_note)) =
            (document.kind.original_kind(), &document.original_note)
        {
            if self
                .storage
                .get_document(original_kind, original_note)
                .await?
                .is_none()
            {
                return Err(BookError::NotFound(format!(
                    "{:?} {}",
                    original_kind, original_note
                )));
            }
        }

        self.storage.save_document(&document).await?;
        info!(grand_total = %document.grand_total, "document saved");
        Ok(document)
    }

    pub async fn get_document(
        &self,
        kind: DocumentKind,
        note_number: &str,
    ) -> BookResult<Option<Document>> {
        self.storage.get_document(kind, note_number).await
    }

    pub async fn list_documents(&self, kind: Option<DocumentKind>) -> BookResult<Vec<Document>> {
        self.storage.list_documents(kind).await
    }

    /// Post a stored document to its party, trade and tax ledgers
    pub async fn post_document(
        &mut self,
        kind: DocumentKind,
        note_number: &str,
        accounts: &DocumentPostingAccounts,
    ) -> BookResult<JournalVoucher> {
        let document = self
            .storage
            .get_document(kind, note_number)
            .await?
            .ok_or_else(|| BookError::NotFound(format!("{:?} {}", kind, note_number)))?;

        let voucher = document_journal(&document, accounts, &self.config.balance_tolerance)?;
        self.post_journal_voucher(voucher).await
    }

    // Vouchers

    /// Validate a journal voucher and apply it to ledger balances
    #[instrument(skip(self, voucher), fields(voucher = %voucher.voucher_number))]
    pub async fn post_journal_voucher(
        &mut self,
        voucher: JournalVoucher,
    ) -> BookResult<JournalVoucher> {
        self.voucher_validator
            .validate_voucher(&voucher, &self.config.balance_tolerance)
            .inspect_err(|e| warn!(error = %e, "voucher rejected"))?;

        if self
            .storage
            .get_journal_voucher(&voucher.voucher_number)
            .await?
            .is_some()
        {
            return Err(BookError::Validation(format!(
                "Journal voucher {} already exists",
                voucher.voucher_number
            )));
        }

        // Resolve every ledger before touching any balance
        let mut ledgers: HashMap<String, LedgerAccount> = HashMap::new();
        for entry in &voucher.entries {
            if ledgers.contains_key(&entry.account_id) {
                continue;
            }
            let ledger = self.chart.get_ledger_required(&entry.account_id).await?;
            if !ledger.can_post {
                return Err(BookError::Validation(format!(
                    "Ledger account '{}' does not accept postings",
                    ledger.code
                )));
            }
            ledgers.insert(entry.account_id.clone(), ledger);
        }

        for entry in &voucher.entries {
            if let Some(ledger) = ledgers.get_mut(&entry.account_id) {
                ledger.apply(&entry.debit, &entry.credit);
            }
        }

        for ledger in ledgers.into_values() {
            debug!(account = %ledger.code, balance = %ledger.balance, "ledger updated");
            self.chart.update_ledger(ledger).await?;
        }

        self.storage.save_journal_voucher(&voucher).await?;
        info!(amount = %voucher.total_debits(), "journal voucher posted");
        Ok(voucher)
    }

    /// Record money paid out of `settlement_account_id`
    pub async fn record_payment(
        &mut self,
        voucher: PaymentVoucher,
        settlement_account_id: &str,
    ) -> BookResult<JournalVoucher> {
        let journal = payment_journal(
            &voucher,
            settlement_account_id.to_string(),
            &self.config.balance_tolerance,
        )?;
        let journal = self.post_journal_voucher(journal).await?;
        self.storage.save_payment_voucher(&voucher).await?;
        Ok(journal)
    }

    /// Record money received into `settlement_account_id`
    pub async fn record_receipt(
        &mut self,
        voucher: ReceiptVoucher,
        settlement_account_id: &str,
    ) -> BookResult<JournalVoucher> {
        let journal = receipt_journal(
            &voucher,
            settlement_account_id.to_string(),
            &self.config.balance_tolerance,
        )?;
        let journal = self.post_journal_voucher(journal).await?;
        self.storage.save_receipt_voucher(&voucher).await?;
        Ok(journal)
    }

    pub async fn get_journal_voucher(
        &self,
        voucher_number: &str,
    ) -> BookResult<Option<JournalVoucher>> {
        self.storage.get_journal_voucher(voucher_number).await
    }

    pub async fn list_journal_vouchers(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BookResult<Vec<JournalVoucher>> {
        self.storage.list_journal_vouchers(start_date, end_date).await
    }

    pub async fn list_payment_vouchers(&self) -> BookResult<Vec<PaymentVoucher>> {
        self.storage.list_payment_vouchers().await
    }

    pub async fn list_receipt_vouchers(&self) -> BookResult<Vec<ReceiptVoucher>> {
        self.storage.list_receipt_vouchers().await
    }

    // Reports

    /// Trial balance over current ledger balances
    pub async fn trial_balance(&self) -> BookResult<TrialBalance> {
        let nodes = self.chart.list_nodes().await?;
        reports::trial_balance(&nodes, &self.config.balance_tolerance)
    }

    /// Ledger balances rolled up to every group node, keyed by node id
    pub async fn group_balances(&self) -> BookResult<BTreeMap<String, BigDecimal>> {
        let nodes = self.chart.list_nodes().await?;
        group_balances(&nodes)
    }
}

//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::chart::{AccountLevel, AccountNode};
use crate::documents::{Document, DocumentKind, Product};
use crate::tax::TaxRate;
use crate::traits::*;
use crate::types::*;
use crate::vouchers::{JournalVoucher, PaymentVoucher, ReceiptVoucher};

type Table<T> = Arc<RwLock<HashMap<String, T>>>;

fn read<T>(table: &Table<T>) -> BookResult<RwLockReadGuard<'_, HashMap<String, T>>> {
    table
        .read()
        .map_err(|_| BookError::Storage("lock poisoned".to_string()))
}

fn write<T>(table: &Table<T>) -> BookResult<RwLockWriteGuard<'_, HashMap<String, T>>> {
    table
        .write()
        .map_err(|_| BookError::Storage("lock poisoned".to_string()))
}

fn document_key(kind: DocumentKind, note_number: &str) -> String {
    format!("{:?}:{}", kind, note_number)
}

fn within(date: NaiveDate, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> bool {
    start_date.is_none_or(|start| date >= start) && end_date.is_none_or(|end| date <= end)
}

/// In-memory storage implementation for testing and development
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    nodes: Table<AccountNode>,
    tax_rates: Table<TaxRate>,
    products: Table<Product>,
    documents: Table<Document>,
    journal_vouchers: Table<JournalVoucher>,
    payment_vouchers: Table<PaymentVoucher>,
    receipt_vouchers: Table<ReceiptVoucher>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> BookResult<()> {
        write(&self.nodes)?.clear();
        write(&self.tax_rates)?.clear();
        write(&self.products)?.clear();
        write(&self.documents)?.clear();
        write(&self.journal_vouchers)?.clear();
        write(&self.payment_vouchers)?.clear();
        write(&self.receipt_vouchers)?.clear();
        Ok(())
    }
}

#[async_trait]
impl BookStorage for MemoryStorage {
    async fn save_node(&mut self, node: &AccountNode) -> BookResult<()> {
        write(&self.nodes)?.insert(node.id().to_string(), node.clone());
        Ok(())
    }

    async fn get_node(&self, id: &str) -> BookResult<Option<AccountNode>> {
        Ok(read(&self.nodes)?.get(id).cloned())
    }

    async fn list_nodes(&self, level: Option<AccountLevel>) -> BookResult<Vec<AccountNode>> {
        let nodes = read(&self.nodes)?;
        let mut filtered: Vec<AccountNode> = nodes
            .values()
            .filter(|node| level.is_none_or(|l| node.level() == l))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(filtered)
    }

    async fn update_node(&mut self, node: &AccountNode) -> BookResult<()> {
        let mut nodes = write(&self.nodes)?;
        match nodes.get_mut(node.id()) {
            Some(existing) => {
                *existing = node.clone();
                Ok(())
            }
            None => Err(BookError::NotFound(format!("account '{}'", node.id()))),
        }
    }

    async fn delete_node(&mut self, id: &str) -> BookResult<()> {
        if write(&self.nodes)?.remove(id).is_some() {
            Ok(())
        } else {
            Err(BookError::NotFound(format!("account '{}'", id)))
        }
    }

    async fn save_tax_rate(&mut self, tax_rate: &TaxRate) -> BookResult<()> {
        write(&self.tax_rates)?.insert(tax_rate.id.clone(), tax_rate.clone());
        Ok(())
    }

    async fn get_tax_rate(&self, id: &str) -> BookResult<Option<TaxRate>> {
        Ok(read(&self.tax_rates)?.get(id).cloned())
    }

    async fn list_tax_rates(&self) -> BookResult<Vec<TaxRate>> {
        let mut rates: Vec<TaxRate> = read(&self.tax_rates)?.values().cloned().collect();
        rates.sort_by(|a, b| a.rate.cmp(&b.rate).then_with(|| a.id.cmp(&b.id)));
        Ok(rates)
    }

    async fn delete_tax_rate(&mut self, id: &str) -> BookResult<()> {
        if write(&self.tax_rates)?.remove(id).is_some() {
            Ok(())
        } else {
            Err(BookError::NotFound(format!("tax rate '{}'", id)))
        }
    }

    async fn save_product(&mut self, product: &Product) -> BookResult<()> {
        write(&self.products)?.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn get_product(&self, id: &str) -> BookResult<Option<Product>> {
        Ok(read(&self.products)?.get(id).cloned())
    }

    async fn list_products(&self) -> BookResult<Vec<Product>> {
        let mut products: Vec<Product> = read(&self.products)?.values().cloned().collect();
        products.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(products)
    }

    async fn save_document(&mut self, document: &Document) -> BookResult<()> {
        write(&self.documents)?.insert(
            document_key(document.kind, &document.note_number),
            document.clone(),
        );
        Ok(())
    }

    async fn get_document(
        &self,
        kind: DocumentKind,
        note_number: &str,
    ) -> BookResult<Option<Document>> {
        Ok(read(&self.documents)?
            .get(&document_key(kind, note_number))
            .cloned())
    }

    async fn list_documents(&self, kind: Option<DocumentKind>) -> BookResult<Vec<Document>> {
        let documents = read(&self.documents)?;
        let mut filtered: Vec<Document> = documents
            .values()
            .filter(|document| kind.is_none_or(|k| document.kind == k))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.note_number.cmp(&b.note_number))
        });
        Ok(filtered)
    }

    async fn save_journal_voucher(&mut self, voucher: &JournalVoucher) -> BookResult<()> {
        write(&self.journal_vouchers)?.insert(voucher.voucher_number.clone(), voucher.clone());
        Ok(())
    }

    async fn get_journal_voucher(
        &self,
        voucher_number: &str,
    ) -> BookResult<Option<JournalVoucher>> {
        Ok(read(&self.journal_vouchers)?.get(voucher_number).cloned())
    }

    async fn list_journal_vouchers(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BookResult<Vec<JournalVoucher>> {
        let vouchers = read(&self.journal_vouchers)?;
        let mut filtered: Vec<JournalVoucher> = vouchers
            .values()
            .filter(|voucher| within(voucher.date, start_date, end_date))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.voucher_number.cmp(&b.voucher_number))
        });
        Ok(filtered)
    }

    async fn save_payment_voucher(&mut self, voucher: &PaymentVoucher) -> BookResult<()> {
        write(&self.payment_vouchers)?.insert(voucher.voucher_number.clone(), voucher.clone());
        Ok(())
    }

    async fn list_payment_vouchers(&self) -> BookResult<Vec<PaymentVoucher>> {
        let mut vouchers: Vec<PaymentVoucher> =
            read(&self.payment_vouchers)?.values().cloned().collect();
        vouchers.sort_by(|a, b| a.voucher_number.cmp(&b.voucher_number));
        Ok(vouchers)
    }

    async fn save_receipt_voucher(&mut self, voucher: &ReceiptVoucher) -> BookResult<()> {
        write(&self.receipt_vouchers)?.insert(voucher.voucher_number.clone(), voucher.clone());
        Ok(())
    }

    async fn list_receipt_vouchers(&self) -> BookResult<Vec<ReceiptVoucher>> {
        let mut vouchers: Vec<ReceiptVoucher> =
            read(&self.receipt_vouchers)?.values().cloned().collect();
        vouchers.sort_by(|a, b| a.voucher_number.cmp(&b.voucher_number));
        Ok(vouchers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ControlGroup;

    #[tokio::test]
    async fn test_clones_share_tables() {
        let mut storage = MemoryStorage::new();
        let view = storage.clone();

        let node = AccountNode::ControlGroup(ControlGroup {
            id: "cg-1".to_string(),
            code: "1".to_string(),
            name: "Assets".to_string(),
            account_type: AccountType::Asset,
        });
        storage.save_node(&node).await.unwrap();

        assert_eq!(view.get_node("cg-1").await.unwrap(), Some(node));

        view.clear().unwrap();
        assert!(storage.list_nodes(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let mut storage = MemoryStorage::new();
        let node = AccountNode::ControlGroup(ControlGroup {
            id: "cg-9".to_string(),
            code: "9".to_string(),
            name: "Suspense".to_string(),
            account_type: AccountType::Asset,
        });

        assert!(matches!(
            storage.update_node(&node).await,
            Err(BookError::NotFound(_))
        ));
        assert!(matches!(
            storage.delete_node("cg-9").await,
            Err(BookError::NotFound(_))
        ));
    }

    #[test]
    fn test_date_window() {
        let d = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 4, 1);
        let end = NaiveDate::from_ymd_opt(2024, 4, 30);
        assert!(within(d, start, end));
        assert!(within(d, None, None));
        assert!(!within(d, end, None));
    }
}

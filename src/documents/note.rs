//! Purchase, sale and return notes

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::item::*;
use crate::config::BooksConfig;
use crate::session::Draft;
use crate::tax::{SupplyType, TaxBreakdown, TaxRate};
use crate::types::*;

/// The four trading documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    PurchaseNote,
    SaleNote,
    PurchaseReturnNote,
    SaleReturnNote,
}

impl DocumentKind {
    /// Return notes must reference the note they reverse
    pub fn is_return(&self) -> bool {
        matches!(
            self,
            DocumentKind::PurchaseReturnNote | DocumentKind::SaleReturnNote
        )
    }

    /// Purchase side (supplier) versus sale side (customer)
    pub fn is_purchase(&self) -> bool {
        matches!(
            self,
            DocumentKind::PurchaseNote | DocumentKind::PurchaseReturnNote
        )
    }

    /// Kind of note a return may reference
    pub fn original_kind(&self) -> Option<DocumentKind> {
        match self {
            DocumentKind::PurchaseReturnNote => Some(DocumentKind::PurchaseNote),
            DocumentKind::SaleReturnNote => Some(DocumentKind::SaleNote),
            _ => None,
        }
    }

    /// Short code used in derived voucher numbers
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::PurchaseNote => "PN",
            DocumentKind::SaleNote => "SN",
            DocumentKind::PurchaseReturnNote => "PRN",
            DocumentKind::SaleReturnNote => "SRN",
        }
    }

    pub fn counterparty_label(&self) -> &'static str {
        if self.is_purchase() {
            "supplier"
        } else {
            "customer"
        }
    }
}

/// Totals of a whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Σ quantity × unit price
    pub sub_total: BigDecimal,
    pub discount_amount: BigDecimal,
    /// Σ line tax
    pub total_tax_amount: BigDecimal,
    /// sub total − discount + tax
    pub grand_total: BigDecimal,
}

/// Sum priced lines and apply a document-level discount
///
/// A negative discount is always rejected. A discount larger than the
/// subtotal is rejected unless `allow_negative_grand_total` is set, since the
/// trade line of such a document could never be posted.
pub fn compute_document_totals(
    items: &[DocumentItem],
    discount_amount: &BigDecimal,
    allow_negative_grand_total: bool,
) -> BookResult<DocumentTotals> {
    if *discount_amount < zero() {
        return Err(BookError::validation("Discount cannot be negative"));
    }

    let sub_total: BigDecimal = items.iter().map(|item| item.taxable_value()).sum();
    let total_tax_amount: BigDecimal = items.iter().map(|item| &item.tax_amount).sum();
    if *discount_amount > sub_total && !allow_negative_grand_total {
        return Err(BookError::Validation(format!(
            "Discount {} exceeds sub total {}",
            discount_amount, sub_total
        )));
    }

    let grand_total = &sub_total - discount_amount + &total_tax_amount;

    tracing::debug!(%sub_total, %total_tax_amount, %grand_total, "document totals computed");

    Ok(DocumentTotals {
        sub_total,
        discount_amount: discount_amount.clone(),
        total_tax_amount,
        grand_total,
    })
}

/// A saved trading document; derived fields are always consistent with `items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub note_number: String,
    pub date: NaiveDate,
    /// Supplier or customer name
    pub counterparty: String,
    /// Note reversed by a return
    pub original_note: Option<String>,
    pub supply: SupplyType,
    pub items: Vec<DocumentItem>,
    pub sub_total: BigDecimal,
    pub discount_amount: BigDecimal,
    pub total_tax_amount: BigDecimal,
    pub grand_total: BigDecimal,
    pub tax_breakdown: TaxBreakdown,
    pub narration: Option<String>,
}

impl Document {
    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals {
            sub_total: self.sub_total.clone(),
            discount_amount: self.discount_amount.clone(),
            total_tax_amount: self.total_tax_amount.clone(),
            grand_total: self.grand_total.clone(),
        }
    }

    /// Value credited to sales or debited to purchases: subtotal less discount
    pub fn net_value(&self) -> BigDecimal {
        &self.sub_total - &self.discount_amount
    }
}

/// Form state for a document being edited
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentBuilder {
    pub kind: Option<DocumentKind>,
    pub note_number: String,
    pub date: Option<NaiveDate>,
    pub counterparty: String,
    pub original_note: Option<String>,
    pub supply: Option<SupplyType>,
    pub items: Vec<ItemDraft>,
    pub discount_amount: Option<BigDecimal>,
    pub narration: Option<String>,
}

impl DocumentBuilder {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn note_number(mut self, note_number: String) -> Self {
        self.note_number = note_number;
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn counterparty(mut self, counterparty: String) -> Self {
        self.counterparty = counterparty;
        self
    }

    pub fn original_note(mut self, original_note: String) -> Self {
        self.original_note = Some(original_note);
        self
    }

    pub fn supply(mut self, supply: SupplyType) -> Self {
        self.supply = Some(supply);
        self
    }

    pub fn discount(mut self, discount_amount: BigDecimal) -> Self {
        self.discount_amount = Some(discount_amount);
        self
    }

    pub fn narration(mut self, narration: String) -> Self {
        self.narration = Some(narration);
        self
    }

    pub fn item(mut self, item: ItemDraft) -> Self {
        self.items.push(item);
        self
    }

    /// Header problems, one error per missing or inconsistent field
    fn header_errors(&self) -> Vec<BookError> {
        let mut errors = Vec::new();

        if self.kind.is_none() {
            errors.push(BookError::validation("Document kind is required"));
        }
        if self.note_number.trim().is_empty() {
            errors.push(BookError::validation("Note number is required"));
        }
        if self.date.is_none() {
            errors.push(BookError::validation("Date is required"));
        }
        if self.counterparty.trim().is_empty() {
            let label = self.kind.map_or("counterparty", |k| k.counterparty_label());
            errors.push(BookError::Validation(format!("A {} is required", label)));
        }
        if self.items.is_empty() {
            errors.push(BookError::validation("At least one item is required"));
        }

        let has_original = self
            .original_note
            .as_deref()
            .is_some_and(|note| !note.trim().is_empty());
        match self.kind {
            Some(kind) if kind.is_return() && !has_original => {
                errors.push(BookError::validation(
                    "A return note must reference the original note",
                ));
            }
            Some(kind) if !kind.is_return() && has_original => {
                errors.push(BookError::validation(
                    "Only return notes can reference an original note",
                ));
            }
            _ => {}
        }

        errors
    }

    /// Validate every field and price every line, collecting all errors
    pub fn check(
        &self,
        tax_rates: &[TaxRate],
        config: &BooksConfig,
    ) -> Result<Document, Vec<BookError>> {
        let mut errors = self.header_errors();

        let mut items = Vec::with_capacity(self.items.len());
        for (index, draft) in self.items.iter().enumerate() {
            let priced = tax_rates
                .iter()
                .find(|rate| rate.id == draft.tax_rate_id)
                .ok_or_else(|| {
                    BookError::Validation(format!(
                        "Line {}: unknown tax rate '{}'",
                        index + 1,
                        draft.tax_rate_id
                    ))
                })
                .and_then(|rate| DocumentItem::priced(draft.clone(), rate));
            match priced {
                Ok(item) => items.push(item),
                Err(e) => errors.push(e),
            }
        }

        let discount_amount = self.discount_amount.clone().unwrap_or_else(zero);
        let totals = if errors.is_empty() {
            match compute_document_totals(
                &items,
                &discount_amount,
                config.allow_negative_grand_total,
            ) {
                Ok(totals) => Some(totals),
                Err(e) => {
                    errors.push(e);
                    None
                }
            }
        } else {
            None
        };

        match (self.kind, self.date, totals) {
            (Some(kind), Some(date), Some(totals)) if errors.is_empty() => {
                let supply = self.supply.unwrap_or(config.default_supply);
                Ok(Document {
                    kind,
                    note_number: self.note_number.trim().to_string(),
                    date,
                    counterparty: self.counterparty.trim().to_string(),
                    original_note: self
                        .original_note
                        .as_ref()
                        .map(|note| note.trim().to_string()),
                    supply,
                    tax_breakdown: TaxBreakdown::split(&totals.total_tax_amount, supply),
                    items,
                    sub_total: totals.sub_total,
                    discount_amount: totals.discount_amount,
                    total_tax_amount: totals.total_tax_amount,
                    grand_total: totals.grand_total,
                    narration: self.narration.clone(),
                })
            }
            _ => Err(errors),
        }
    }

    /// Build the document, reporting the first problem found
    pub fn build(&self, tax_rates: &[TaxRate], config: &BooksConfig) -> BookResult<Document> {
        self.check(tax_rates, config).map_err(first_error)
    }
}

/// Pricing context for a document draft
pub struct PricingContext<'a> {
    pub tax_rates: &'a [TaxRate],
    pub config: &'a BooksConfig,
}

impl Draft for DocumentBuilder {
    type Line = ItemDraft;
    type Record = Document;
    type Context<'a> = PricingContext<'a>;

    fn lines_mut(&mut self) -> &mut Vec<ItemDraft> {
        &mut self.items
    }

    fn finalize(&self, context: &PricingContext<'_>) -> Result<Document, Vec<BookError>> {
        self.check(context.tax_rates, context.config)
    }
}

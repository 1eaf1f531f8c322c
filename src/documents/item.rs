//! Document line items and their derived totals

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::tax::TaxRate;
use crate::types::*;

/// A line as entered on the form, before tax is derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub product_id: String,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    pub tax_rate_id: String,
}

impl ItemDraft {
    pub fn new(
        product_id: String,
        quantity: BigDecimal,
        unit_price: BigDecimal,
        tax_rate_id: String,
    ) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
            tax_rate_id,
        }
    }

    /// quantity × unit price
    pub fn taxable_value(&self) -> BigDecimal {
        &self.quantity * &self.unit_price
    }
}

/// Derived amounts for one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTotals {
    /// quantity × unit price × rate / 100
    pub tax_amount: BigDecimal,
    /// quantity × unit price + tax
    pub total_amount: BigDecimal,
}

/// Compute tax and line total for a draft line
pub fn compute_line_total(item: &ItemDraft, tax_rate: &TaxRate) -> BookResult<LineTotals> {
    if item.quantity <= zero() {
        return Err(BookError::Validation(format!(
            "Quantity for product '{}' must be positive",
            item.product_id
        )));
    }

    if item.unit_price < zero() {
        return Err(BookError::Validation(format!(
            "Unit price for product '{}' cannot be negative",
            item.product_id
        )));
    }

    if item.tax_rate_id != tax_rate.id {
        return Err(BookError::Validation(format!(
            "Line references tax rate '{}' but was priced with '{}'",
            item.tax_rate_id, tax_rate.id
        )));
    }

    let taxable_value = item.taxable_value();
    let tax_amount = tax_rate.tax_on(&taxable_value);
    let total_amount = &taxable_value + &tax_amount;

    Ok(LineTotals {
        tax_amount,
        total_amount,
    })
}

/// A priced line on a saved document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub product_id: String,
    pub quantity: BigDecimal,
    pub unit_price: BigDecimal,
    pub tax_rate_id: String,
    pub tax_amount: BigDecimal,
    pub total_amount: BigDecimal,
}

impl DocumentItem {
    /// Price a draft line with its tax rate
    pub fn priced(draft: ItemDraft, tax_rate: &TaxRate) -> BookResult<Self> {
        let totals = compute_line_total(&draft, tax_rate)?;
        Ok(Self {
            product_id: draft.product_id,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            tax_rate_id: draft.tax_rate_id,
            tax_amount: totals.tax_amount,
            total_amount: totals.total_amount,
        })
    }

    pub fn taxable_value(&self) -> BigDecimal {
        &self.quantity * &self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn gst(rate: i32) -> TaxRate {
        TaxRate {
            id: format!("gst-{}", rate),
            name: format!("GST {}%", rate),
            rate: BigDecimal::from(rate),
        }
    }

    fn line(qty: &str, price: &str, rate: i32) -> ItemDraft {
        ItemDraft::new(
            "P001".to_string(),
            BigDecimal::from_str(qty).unwrap(),
            BigDecimal::from_str(price).unwrap(),
            format!("gst-{}", rate),
        )
    }

    #[test]
    fn test_line_total() {
        let totals = compute_line_total(&line("10", "45", 18), &gst(18)).unwrap();
        assert_eq!(totals.tax_amount, BigDecimal::from(81));
        assert_eq!(totals.total_amount, BigDecimal::from(531));
    }

    #[test]
    fn test_line_total_fractional() {
        let totals = compute_line_total(&line("2.5", "19.99", 5), &gst(5)).unwrap();
        // 2.5 × 19.99 = 49.975, 5% = 2.49875
        assert_eq!(totals.tax_amount, BigDecimal::from_str("2.49875").unwrap());
        assert_eq!(
            totals.total_amount,
            BigDecimal::from_str("52.47375").unwrap()
        );
    }

    #[test]
    fn test_line_invariant_holds() {
        let draft = line("7", "13.40", 12);
        let totals = compute_line_total(&draft, &gst(12)).unwrap();
        let base = draft.taxable_value();
        assert_eq!(totals.tax_amount, &base * BigDecimal::from(12) / BigDecimal::from(100));
        assert_eq!(totals.total_amount, &base + &totals.tax_amount);
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        assert!(compute_line_total(&line("0", "45", 18), &gst(18)).is_err());
        assert!(compute_line_total(&line("-1", "45", 18), &gst(18)).is_err());
    }

    #[test]
    fn test_rejects_negative_price_but_allows_free_items() {
        assert!(compute_line_total(&line("1", "-0.01", 18), &gst(18)).is_err());

        let free = compute_line_total(&line("1", "0", 18), &gst(18)).unwrap();
        assert_eq!(free.total_amount, BigDecimal::from(0));
    }

    #[test]
    fn test_rejects_mismatched_rate() {
        assert!(compute_line_total(&line("1", "10", 18), &gst(12)).is_err());
    }
}

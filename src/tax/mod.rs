//! Tax rates and GST splitting

pub mod gst;

pub use gst::*;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// A named tax rate, expressed as a percentage between 0 and 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: String,
    pub name: String,
    /// Percentage, e.g. 18 for 18%
    pub rate: BigDecimal,
}

impl TaxRate {
    /// Create a validated tax rate
    pub fn new(id: String, name: String, rate: BigDecimal) -> BookResult<Self> {
        let tax_rate = Self { id, name, rate };
        tax_rate.validate()?;
        Ok(tax_rate)
    }

    /// Check id, name and the 0-100 range
    pub fn validate(&self) -> BookResult<()> {
        if self.id.trim().is_empty() {
            return Err(BookError::validation("Tax rate ID cannot be empty"));
        }

        if self.name.trim().is_empty() {
            return Err(BookError::validation("Tax rate name cannot be empty"));
        }

        if self.rate < zero() || self.rate > BigDecimal::from(100) {
            return Err(BookError::Validation(format!(
                "Tax rate '{}' must be between 0 and 100, got {}",
                self.name, self.rate
            )));
        }

        Ok(())
    }

    /// Tax due on a taxable value
    pub fn tax_on(&self, taxable_value: &BigDecimal) -> BigDecimal {
        (taxable_value * &self.rate) / BigDecimal::from(100)
    }
}

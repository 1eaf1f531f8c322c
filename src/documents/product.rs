//! Product master

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// A stock item or service that can appear on purchase and sale notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub code: String,
    pub name: String,
    /// Unit of measure (kg, pcs, hrs, ...)
    pub unit: String,
    pub purchase_price: BigDecimal,
    pub sale_price: BigDecimal,
    /// HSN code for goods, SAC code for services
    pub hsn_sac: String,
    /// Default tax rate applied on notes
    pub tax_rate_id: Option<String>,
}

impl Product {
    pub fn validate(&self) -> BookResult<()> {
        if self.id.trim().is_empty() {
            return Err(BookError::validation("Product ID cannot be empty"));
        }

        if self.code.trim().is_empty() {
            return Err(BookError::validation("Product code cannot be empty"));
        }

        if self.name.trim().is_empty() {
            return Err(BookError::validation("Product name cannot be empty"));
        }

        if self.purchase_price < zero() || self.sale_price < zero() {
            return Err(BookError::Validation(format!(
                "Prices of product '{}' cannot be negative",
                self.code
            )));
        }

        // HSN/SAC codes are numeric, 4 to 8 digits
        let hsn = self.hsn_sac.trim();
        if !hsn.is_empty()
            && (!(4..=8).contains(&hsn.len()) || !hsn.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(BookError::Validation(format!(
                "HSN/SAC code '{}' must be 4 to 8 digits",
                self.hsn_sac
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fasteners() -> Product {
        Product {
            id: "P001".to_string(),
            code: "P001".to_string(),
            name: "Steel Fasteners".to_string(),
            unit: "box".to_string(),
            purchase_price: BigDecimal::from(45),
            sale_price: BigDecimal::from(60),
            hsn_sac: "7318".to_string(),
            tax_rate_id: Some("gst-18".to_string()),
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(fasteners().validate().is_ok());
    }

    #[test]
    fn test_bad_hsn_code() {
        let mut product = fasteners();
        product.hsn_sac = "73A8".to_string();
        assert!(product.validate().is_err());

        product.hsn_sac = "731".to_string();
        assert!(product.validate().is_err());

        product.hsn_sac = String::new();
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_negative_price() {
        let mut product = fasteners();
        product.sale_price = BigDecimal::from(-1);
        assert!(product.validate().is_err());
    }
}

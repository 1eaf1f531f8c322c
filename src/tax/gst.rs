//! GST split of a tax amount into central, state and integrated components

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Place-of-supply classification of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    /// Supplier and recipient in the same state: CGST + SGST
    #[default]
    IntraState,
    /// Supply across states: IGST
    InterState,
}

/// GST components of a tax amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub supply: SupplyType,
    /// Central GST
    pub cgst: BigDecimal,
    /// State GST
    pub sgst: BigDecimal,
    /// Integrated GST
    pub igst: BigDecimal,
}

impl TaxBreakdown {
    /// Split a total tax amount according to the supply type
    pub fn split(total_tax: &BigDecimal, supply: SupplyType) -> Self {
        match supply {
            SupplyType::IntraState => {
                let half = total_tax / BigDecimal::from(2);
                Self {
                    supply,
                    cgst: half.clone(),
                    sgst: half,
                    igst: zero(),
                }
            }
            SupplyType::InterState => Self {
                supply,
                cgst: zero(),
                sgst: zero(),
                igst: total_tax.clone(),
            },
        }
    }

    /// Sum of all components
    pub fn total(&self) -> BigDecimal {
        &self.cgst + &self.sgst + &self.igst
    }
}

/// Standard GST slabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GstSlab {
    /// Essential items (food, medicines, etc.) - 0%
    Exempt,
    /// Reduced rate items - 5%
    Reduced,
    /// Standard rate items - 12%
    Standard,
    /// Higher rate items - 18%
    Higher,
    /// Luxury/Sin goods - 28%
    Luxury,
}

impl GstSlab {
    pub const ALL: [GstSlab; 5] = [
        GstSlab::Exempt,
        GstSlab::Reduced,
        GstSlab::Standard,
        GstSlab::Higher,
        GstSlab::Luxury,
    ];

    /// Rate percentage for this slab
    pub fn rate(&self) -> BigDecimal {
        match self {
            GstSlab::Exempt => BigDecimal::from(0),
            GstSlab::Reduced => BigDecimal::from(5),
            GstSlab::Standard => BigDecimal::from(12),
            GstSlab::Higher => BigDecimal::from(18),
            GstSlab::Luxury => BigDecimal::from(28),
        }
    }

    /// Tax rate record for this slab, keyed `gst-<rate>`
    pub fn tax_rate(&self) -> super::TaxRate {
        let rate = self.rate();
        super::TaxRate {
            id: format!("gst-{}", rate),
            name: format!("GST {}%", rate),
            rate,
        }
    }
}

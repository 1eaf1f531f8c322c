//! Book-level configuration
//!
//! All fields carry defaults, so an empty YAML document yields
//! [`BooksConfig::default`].

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::tax::SupplyType;
use crate::types::*;

/// Configuration for a set of books
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooksConfig {
    /// Largest debit/credit difference still treated as balanced
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: BigDecimal,
    /// Currency assigned to ledger accounts created without one
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Require dotted account codes that extend the parent's code
    #[serde(default = "default_true")]
    pub enforce_code_convention: bool,
    /// Accept documents whose discount exceeds the subtotal
    #[serde(default)]
    pub allow_negative_grand_total: bool,
    /// Supply type used when a document draft does not set one
    #[serde(default)]
    pub default_supply: SupplyType,
}

fn default_balance_tolerance() -> BigDecimal {
    // 0.001
    BigDecimal::new(BigInt::from(1), 3)
}

fn default_base_currency() -> String {
    "INR".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
            base_currency: default_base_currency(),
            enforce_code_convention: true,
            allow_negative_grand_total: false,
            default_supply: SupplyType::default(),
        }
    }
}

impl BooksConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> BookResult<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| BookError::Config(format!("invalid YAML: {}", e)))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> BookResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BookError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loading books configuration");
        Self::from_yaml_str(&content)
    }

    /// Check the configuration for values the engine cannot work with
    pub fn validate(&self) -> BookResult<()> {
        if self.balance_tolerance <= zero() {
            return Err(BookError::Config(
                "balance_tolerance must be positive".to_string(),
            ));
        }

        if self.base_currency.trim().is_empty() {
            return Err(BookError::Config(
                "base_currency cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let config = BooksConfig::default();
        assert_eq!(
            config.balance_tolerance,
            BigDecimal::from_str("0.001").unwrap()
        );
        assert_eq!(config.base_currency, "INR");
        assert!(config.enforce_code_convention);
        assert!(!config.allow_negative_grand_total);
        assert_eq!(config.default_supply, SupplyType::IntraState);
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = BooksConfig::from_yaml_str("").unwrap();
        assert_eq!(config, BooksConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
balance_tolerance: "0.01"
base_currency: USD
allow_negative_grand_total: true
default_supply: inter_state
"#;
        let config = BooksConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.balance_tolerance,
            BigDecimal::from_str("0.01").unwrap()
        );
        assert_eq!(config.base_currency, "USD");
        assert!(config.allow_negative_grand_total);
        assert!(config.enforce_code_convention);
        assert_eq!(config.default_supply, SupplyType::InterState);
    }

    #[test]
    fn test_rejects_empty_currency() {
        let result = BooksConfig::from_yaml_str("base_currency: \"\"");
        assert!(matches!(result, Err(BookError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_tolerance() {
        let result = BooksConfig::from_yaml_str("balance_tolerance: \"0\"");
        assert!(matches!(result, Err(BookError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let result = BooksConfig::from_yaml_str("balance_tolerance: [1, 2");
        assert!(matches!(result, Err(BookError::Config(_))));
    }
}

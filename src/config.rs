//! Ledger configuration
//!
//! Every field defaults to the built-in screening rules, so an empty TOML
//! document yields the standard ledger.

use serde::Deserialize;
use crate::constants::{FRAUD_AMOUNT_THRESHOLD, FRAUD_KEYWORDS};
use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub fraud: FraudConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FraudConfig {
    /// Denylisted description substrings, matched case-insensitively
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Amounts strictly above this are flagged
    #[serde(default = "default_amount_threshold")]
    pub amount_threshold: f64,
}

fn default_keywords() -> Vec<String> {
    FRAUD_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_amount_threshold() -> f64 {
    FRAUD_AMOUNT_THRESHOLD
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            amount_threshold: default_amount_threshold(),
        }
    }
}

impl LedgerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LedgerConfig = toml::from_str(text)?;
        config.fraud.validate()?;
        Ok(config)
    }
}

impl FraudConfig {
    /// Reject rules that would flag everything or nothing by amount
    pub fn validate(&self) -> Result<()> {
        if !self.amount_threshold.is_finite() {
            return Err(LedgerError::Config(
                "fraud.amount_threshold must be finite".to_string(),
            ));
        }
        // An empty needle matches every description.
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(LedgerError::Config(
                "fraud.keywords must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }
}

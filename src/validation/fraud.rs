//! Pre-admission fraud screening
//!
//! A static heuristic: a transaction is suspicious when its description
//! contains a denylisted keyword (case-insensitive substring) or when its
//! amount is strictly above the threshold. Either check alone flags it.

use std::fmt;
use crate::config::FraudConfig;
use crate::constants::{FRAUD_AMOUNT_THRESHOLD, FRAUD_KEYWORDS};
use crate::error::Result;
use crate::validation::Transaction;

/// Why a transaction was flagged
#[derive(Debug, Clone, PartialEq)]
pub enum FraudReason {
    /// Description contains this keyword
    Keyword(String),
    /// Amount exceeds the threshold
    AmountAboveThreshold { amount: f64, threshold: f64 },
}

impl fmt::Display for FraudReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FraudReason::Keyword(word) => write!(f, "description contains '{}'", word),
            FraudReason::AmountAboveThreshold { amount, threshold } => {
                write!(f, "amount {} exceeds {}", amount, threshold)
            }
        }
    }
}

/// Keyword denylist plus amount threshold
#[derive(Debug, Clone, PartialEq)]
pub struct FraudScreen {
    keywords: Vec<String>,
    amount_threshold: f64,
}

impl FraudScreen {
    /// Build a screen from validated rules; keywords are lowercased here
    pub fn new(config: &FraudConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
            amount_threshold: config.amount_threshold,
        })
    }

    /// First reason the transaction is suspicious, if any
    ///
    /// Keywords are checked before the amount.
    pub fn screen(&self, tx: &Transaction) -> Option<FraudReason> {
        let description = tx.description.to_lowercase();
        if let Some(word) = self.keywords.iter().find(|k| description.contains(k.as_str())) {
            return Some(FraudReason::Keyword(word.clone()));
        }

        let amount = tx.amount.as_f64();
        if amount > self.amount_threshold {
            return Some(FraudReason::AmountAboveThreshold {
                amount,
                threshold: self.amount_threshold,
            });
        }

        None
    }

    pub fn is_fraudulent(&self, tx: &Transaction) -> bool {
        self.screen(tx).is_some()
    }
}

impl Default for FraudScreen {
    fn default() -> Self {
        Self {
            keywords: FRAUD_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            amount_threshold: FRAUD_AMOUNT_THRESHOLD,
        }
    }
}

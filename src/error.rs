//! Ledger error types

use thiserror::Error;

/// Errors surfaced by ledger operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("Unauthorized validator: {0}")]
    UnauthorizedValidator(String),
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid chain: {0}")]
    InvalidChain(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}

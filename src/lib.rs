//! Permissioned Ledger Core Library
//!
//! A single authority-gated chain of hash-linked blocks. Transactions are
//! screened for fraud on submission; admitted ones wait in a pending queue
//! until an authorized validator mines them into a block.

pub mod config;
pub mod consensus;
pub mod crypto;
pub mod error;
pub mod ledger;
pub mod node;
pub mod validation;

pub use config::{FraudConfig, LedgerConfig};
pub use consensus::{Block, PrevHash, Timestamp};
pub use crypto::Hash;
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerStats, SharedLedger};
pub use validation::{Amount, Transaction, TxStatus};

/// Protocol constants
pub mod constants {
    /// Previous-hash sentinel carried by the genesis block
    pub const GENESIS_PREV_HASH: &str = "0";

    /// Nonce of every block (no proof-of-work search is performed)
    pub const BLOCK_NONCE: u64 = 0;

    /// Description substrings that flag a transaction (case-insensitive)
    pub const FRAUD_KEYWORDS: [&str; 4] = ["fraud", "hack", "scam", "illegal"];

    /// Amounts strictly above this are flagged
    pub const FRAUD_AMOUNT_THRESHOLD: f64 = 10_000.0;
}

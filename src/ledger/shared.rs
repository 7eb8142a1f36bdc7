//! Thread-safe ledger handle
//!
//! Each operation runs under one exclusive lock over the whole ledger, so a
//! transaction is never seen both pending and inside a freshly mined block.

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use crate::crypto::Hash;
use crate::error::Result;
use crate::ledger::{Ledger, LedgerStats};
use crate::validation::Transaction;

/// Clonable handle to a ledger shared between threads
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn add_authority(&self, name: impl Into<String>) {
        self.inner.lock().add_authority(name);
    }

    pub fn add_transaction(&self, transaction: Transaction) -> Transaction {
        self.inner.lock().add_transaction(transaction)
    }

    pub fn add_transaction_value(&self, value: Value) -> Result<Transaction> {
        self.inner.lock().add_transaction_value(value)
    }

    pub fn mine_block(&self, validator: &str) -> Result<Hash> {
        self.inner.lock().mine_block(validator)
    }

    /// Run a read-only closure under the lock
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&*self.inner.lock())
    }

    /// Owned copy of the whole ledger at this instant
    pub fn snapshot(&self) -> Ledger {
        self.inner.lock().clone()
    }

    pub fn stats(&self) -> LedgerStats {
        self.inner.lock().stats()
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}

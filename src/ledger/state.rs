//! Ledger state management
//!
//! Owns the chain, the pending queue, the flagged log and the authority set.
//! Every transaction ends up in exactly one place: pending, flagged, or
//! embedded in a mined block.

use log::{debug, info, warn};
use serde_json::Value;
use crate::config::LedgerConfig;
use crate::consensus::{validate_chain, AuthoritySet, Block};
use crate::crypto::Hash;
use crate::error::{LedgerError, Result};
use crate::node::create_genesis_block;
use crate::validation::{FraudScreen, Transaction, TxStatus};

/// Complete ledger state
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Blocks from genesis to tip; never empty
    chain: Vec<Block>,
    /// Admitted, not yet mined
    pending_transactions: Vec<Transaction>,
    /// Rejected at admission; never mined, never cleared
    flagged_transactions: Vec<Transaction>,
    /// Validators allowed to mine
    authorities: AuthoritySet,
    screen: FraudScreen,
}

impl Ledger {
    /// Create a ledger with the built-in screening rules
    pub fn new() -> Self {
        Self::with_screen(FraudScreen::default())
    }

    /// Create a ledger with custom screening rules
    ///
    /// Fails when the rules do not pass `FraudConfig::validate`.
    pub fn with_config(config: &LedgerConfig) -> Result<Self> {
        Ok(Self::with_screen(FraudScreen::new(&config.fraud)?))
    }

    fn with_screen(screen: FraudScreen) -> Self {
        Self {
            chain: vec![create_genesis_block(None)],
            pending_transactions: Vec::new(),
            flagged_transactions: Vec::new(),
            authorities: AuthoritySet::new(),
            screen,
        }
    }

    /// Grant mining rights to a validator
    pub fn add_authority(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.authorities.grant(name.clone()) {
            info!("Granted authority to {}", name);
        }
    }

    pub fn is_authority(&self, name: &str) -> bool {
        self.authorities.contains(name)
    }

    /// Screen a transaction and queue or flag it
    ///
    /// Returns the record as admitted, with its status set.
    pub fn add_transaction(&mut self, mut transaction: Transaction) -> Transaction {
        match self.screen.screen(&transaction) {
            Some(reason) => {
                transaction.set_status(TxStatus::Flagged);
                warn!("Flagged transaction '{}': {}", transaction.description, reason);
                self.flagged_transactions.push(transaction.clone());
            }
            None => {
                transaction.set_status(TxStatus::Valid);
                debug!("Queued transaction '{}'", transaction.description);
                self.pending_transactions.push(transaction.clone());
            }
        }
        transaction
    }

    /// Parse a dynamic record, then admit it
    pub fn add_transaction_value(&mut self, value: Value) -> Result<Transaction> {
        let transaction = Transaction::try_from(value)?;
        Ok(self.add_transaction(transaction))
    }

    pub fn is_fraudulent(&self, transaction: &Transaction) -> bool {
        self.screen.is_fraudulent(transaction)
    }

    /// Package every pending transaction into a new block
    ///
    /// Fails without touching any state when `validator` is not an authority.
    pub fn mine_block(&mut self, validator: &str) -> Result<Hash> {
        if !self.authorities.contains(validator) {
            warn!("Rejected mining attempt by unauthorized validator {}", validator);
            return Err(LedgerError::UnauthorizedValidator(validator.to_string()));
        }

        let parent = self.latest_block().hash();
        let transactions = std::mem::take(&mut self.pending_transactions);
        let block = Block::new(self.chain.len() as u64, parent.into(), transactions, None);
        let hash = block.hash();

        info!(
            "Block {} mined by {} with {} transactions: {}",
            block.index(),
            validator,
            block.transactions().len(),
            hash
        );
        self.chain.push(block);

        Ok(hash)
    }

    /// Current tip
    pub fn latest_block(&self) -> &Block {
        // Genesis is pushed at construction and blocks are never removed.
        &self.chain[self.chain.len() - 1]
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }

    pub fn flagged_transactions(&self) -> &[Transaction] {
        &self.flagged_transactions
    }

    pub fn authorities(&self) -> &AuthoritySet {
        &self.authorities
    }

    /// Audit linkage and stored hashes of the whole chain
    pub fn verify_chain(&self) -> Result<()> {
        validate_chain(&self.chain)
    }

    /// Get statistics about the ledger
    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            height: self.latest_block().index(),
            tip_hash: self.latest_block().hash(),
            block_count: self.chain.len(),
            pending_count: self.pending_transactions.len(),
            flagged_count: self.flagged_transactions.len(),
            authority_count: self.authorities.len(),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerStats {
    pub height: u64,
    pub tip_hash: Hash,
    pub block_count: usize,
    pub pending_count: usize,
    pub flagged_count: usize,
    pub authority_count: usize,
}

//! Block structure for the permissioned ledger
//!
//! A block is fixed at construction: its hash is computed once from the
//! other fields and nothing can be changed afterwards.

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use crate::constants::{BLOCK_NONCE, GENESIS_PREV_HASH};
use crate::crypto::{canonical_json, hash_bytes, Hash};
use crate::error::{LedgerError, Result};
use crate::validation::Transaction;

/// Link to the preceding block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrevHash {
    /// The genesis block has no parent; renders as `"0"`
    Genesis,
    /// Hash of the parent block
    Block(Hash),
}

impl fmt::Display for PrevHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrevHash::Genesis => f.write_str(GENESIS_PREV_HASH),
            PrevHash::Block(hash) => write!(f, "{}", hash),
        }
    }
}

impl From<Hash> for PrevHash {
    fn from(hash: Hash) -> Self {
        PrevHash::Block(hash)
    }
}

impl Serialize for PrevHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Seconds since the Unix epoch, with sub-second precision; always finite
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    pub fn from_secs(secs: f64) -> Result<Self> {
        if !secs.is_finite() {
            return Err(LedgerError::InvalidTimestamp(secs.to_string()));
        }
        Ok(Timestamp(secs))
    }

    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Timestamp(secs)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

/// One link in the chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    index: u64,
    previous_hash: PrevHash,
    timestamp: Timestamp,
    transactions: Vec<Transaction>,
    nonce: u64,
    hash: Hash,
}

impl Block {
    /// Create a block and compute its hash
    ///
    /// `timestamp` defaults to the current time. An explicit zero is kept,
    /// so such blocks hash differently from Python ledgers, which replace a
    /// zero timestamp with the clock.
    pub fn new(
        index: u64,
        previous_hash: PrevHash,
        transactions: Vec<Transaction>,
        timestamp: Option<Timestamp>,
    ) -> Self {
        let mut block = Self {
            index,
            previous_hash,
            timestamp: timestamp.unwrap_or_else(Timestamp::now),
            transactions,
            nonce: BLOCK_NONCE,
            hash: Hash::from_bytes([0u8; 32]),
        };
        block.hash = block.calculate_hash();
        block
    }

    /// Canonical text the hash is computed over
    pub fn canonical_content(&self) -> String {
        let mut content = Map::new();
        content.insert("index".to_string(), Value::from(self.index));
        content.insert("nonce".to_string(), Value::from(self.nonce));
        content.insert(
            "previous_hash".to_string(),
            Value::String(self.previous_hash.to_string()),
        );
        content.insert(
            "timestamp".to_string(),
            // from_f64 only fails on non-finite input
            Number::from_f64(self.timestamp.as_secs()).map_or(Value::Null, Value::Number),
        );
        content.insert(
            "transactions".to_string(),
            Value::Array(
                self.transactions
                    .iter()
                    .map(Transaction::to_canonical_value)
                    .collect(),
            ),
        );
        canonical_json(&Value::Object(content))
    }

    /// Recompute the hash from the current fields
    pub fn calculate_hash(&self) -> Hash {
        hash_bytes(self.canonical_content().as_bytes())
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn previous_hash(&self) -> &PrevHash {
        &self.previous_hash
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Hash stored at construction
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.previous_hash == PrevHash::Genesis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Amount, TxStatus};

    const GENESIS_AT_1700000000_5: &str =
        "ef4b021fd66966ebd36f4284b9a83b9886c7ec2529992d246c160380e8c04d1e";

    fn at(secs: f64) -> Option<Timestamp> {
        Some(Timestamp::from_secs(secs).unwrap())
    }

    fn valid(description: &str, amount: Amount) -> Transaction {
        let mut tx = Transaction::new(description, amount);
        tx.set_status(TxStatus::Valid);
        tx
    }

    #[test]
    fn test_canonical_content_layout() {
        let block = Block::new(0, PrevHash::Genesis, vec![], at(1700000000.5));
        assert_eq!(
            block.canonical_content(),
            r#"{"index": 0, "nonce": 0, "previous_hash": "0", "timestamp": 1700000000.5, "transactions": []}"#
        );
    }

    #[test]
    fn test_genesis_hash_vector() {
        let block = Block::new(0, PrevHash::Genesis, vec![], at(1700000000.5));
        assert_eq!(block.hash().to_hex(), GENESIS_AT_1700000000_5);
        assert!(block.is_genesis());
    }

    #[test]
    fn test_block_with_transactions_hash_vector() {
        let genesis = Block::new(0, PrevHash::Genesis, vec![], at(1700000000.5));
        let txs = vec![
            valid("Payment for services", 500.into()),
            valid("Caf\u{e9} \"bill\"\n", Amount::from_float(12.75).unwrap()),
        ];
        let block = Block::new(1, genesis.hash().into(), txs, at(1700000001.25));

        assert_eq!(
            block.hash().to_hex(),
            "cb12978c867e9ab889632fba8c54c03cad20373f29292336600f1b12f04b6c8c"
        );
        assert_eq!(block.previous_hash().to_string(), GENESIS_AT_1700000000_5);
        assert!(!block.is_genesis());
    }

    #[test]
    fn test_hash_deterministic() {
        let txs = vec![valid("a", 1.into())];
        let a = Block::new(3, PrevHash::Genesis, txs.clone(), at(42.0));
        let b = Block::new(3, PrevHash::Genesis, txs, at(42.0));
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash(), a.calculate_hash());
    }

    #[test]
    fn test_hash_covers_every_field() {
        let base = Block::new(1, PrevHash::Genesis, vec![], at(1.0));
        assert_ne!(base.hash(), Block::new(2, PrevHash::Genesis, vec![], at(1.0)).hash());
        assert_ne!(base.hash(), Block::new(1, PrevHash::Genesis, vec![], at(2.0)).hash());
        assert_ne!(
            base.hash(),
            Block::new(1, base.hash().into(), vec![], at(1.0)).hash()
        );
        assert_ne!(
            base.hash(),
            Block::new(1, PrevHash::Genesis, vec![valid("x", 1.into())], at(1.0)).hash()
        );
    }

    #[test]
    fn test_default_timestamp_is_now() {
        let before = Timestamp::now();
        let block = Block::new(0, PrevHash::Genesis, vec![], None);
        assert!(block.timestamp() >= before);
        assert_eq!(block.nonce(), 0);
    }

    #[test]
    fn test_explicit_zero_timestamp_is_kept() {
        let block = Block::new(0, PrevHash::Genesis, vec![], at(0.0));
        assert_eq!(block.timestamp().as_secs(), 0.0);
        assert!(block.canonical_content().contains(r#""timestamp": 0.0"#));
    }

    #[test]
    fn test_non_finite_timestamp_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Timestamp::from_secs(bad),
                Err(LedgerError::InvalidTimestamp(_))
            ));
        }
    }

    #[test]
    fn test_serializes_prev_hash_as_text() {
        let block = Block::new(0, PrevHash::Genesis, vec![], at(5.0));
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["previous_hash"], "0");
        assert_eq!(json["hash"], block.hash().to_hex());
    }
}

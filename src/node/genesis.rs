//! Genesis block creation
//!
//! Every ledger starts from an empty block at index 0 whose parent link is
//! the `"0"` sentinel.

use log::info;
use crate::consensus::{Block, PrevHash, Timestamp};

/// Index of the genesis block
pub const GENESIS_INDEX: u64 = 0;

/// Create the genesis block
///
/// With no timestamp the current time is used, so two ledgers created at
/// different instants have different genesis hashes.
pub fn create_genesis_block(timestamp: Option<Timestamp>) -> Block {
    let genesis = Block::new(GENESIS_INDEX, PrevHash::Genesis, Vec::new(), timestamp);
    info!("Created genesis block {}", genesis.hash());
    genesis
}

/// Verify a block is a genesis block with the expected hash
pub fn verify_genesis(block: &Block, expected_hash: &crate::crypto::Hash) -> bool {
    block.is_genesis()
        && block.index() == GENESIS_INDEX
        && block.transactions().is_empty()
        && block.hash() == *expected_hash
}

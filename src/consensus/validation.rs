//! Chain validation
//!
//! Pure functions auditing a sequence of blocks.

use crate::consensus::{Block, PrevHash};
use crate::error::{LedgerError, Result};

/// Validate a block against its predecessor
pub fn validate_block_link(block: &Block, parent: &Block) -> Result<()> {
    if block.index() != parent.index() + 1 {
        return Err(LedgerError::InvalidChain(format!(
            "block {} follows block {}",
            block.index(),
            parent.index()
        )));
    }

    if *block.previous_hash() != PrevHash::Block(parent.hash()) {
        return Err(LedgerError::InvalidChain(format!(
            "block {} links to {}, expected {}",
            block.index(),
            block.previous_hash(),
            parent.hash()
        )));
    }

    Ok(())
}

fn validate_stored_hash(block: &Block) -> Result<()> {
    if block.calculate_hash() != block.hash() {
        return Err(LedgerError::InvalidChain(format!(
            "block {} hash does not match its contents",
            block.index()
        )));
    }
    Ok(())
}

/// Validate a whole chain from genesis to tip
pub fn validate_chain(blocks: &[Block]) -> Result<()> {
    let Some(genesis) = blocks.first() else {
        return Err(LedgerError::InvalidChain("chain is empty".to_string()));
    };

    if genesis.index() != 0 || !genesis.is_genesis() {
        return Err(LedgerError::InvalidChain(
            "first block is not a genesis block".to_string(),
        ));
    }
    validate_stored_hash(genesis)?;

    for pair in blocks.windows(2) {
        let (parent, block) = (&pair[0], &pair[1]);
        validate_block_link(block, parent)?;
        validate_stored_hash(block)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::Timestamp;

    fn at(secs: f64) -> Option<Timestamp> {
        Some(Timestamp::from_secs(secs).unwrap())
    }

    fn chain_of(len: u64) -> Vec<Block> {
        let mut blocks = vec![Block::new(0, PrevHash::Genesis, vec![], at(0.0))];
        for i in 1..len {
            let parent = blocks[blocks.len() - 1].hash();
            blocks.push(Block::new(i, parent.into(), vec![], at(i as f64)));
        }
        blocks
    }

    #[test]
    fn test_valid_chain() {
        assert!(validate_chain(&chain_of(5)).is_ok());
        assert!(validate_chain(&chain_of(1)).is_ok());
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert!(matches!(validate_chain(&[]), Err(LedgerError::InvalidChain(_))));
    }

    #[test]
    fn test_broken_link_rejected() {
        let mut blocks = chain_of(3);
        blocks[2] = Block::new(2, blocks[0].hash().into(), vec![], at(2.0));
        assert!(validate_chain(&blocks).is_err());
    }

    #[test]
    fn test_wrong_index_rejected() {
        let mut blocks = chain_of(2);
        blocks[1] = Block::new(7, blocks[0].hash().into(), vec![], at(1.0));
        assert!(validate_chain(&blocks).is_err());
    }

    #[test]
    fn test_non_genesis_first_block_rejected() {
        let blocks = chain_of(3);
        assert!(validate_chain(&blocks[1..]).is_err());
    }
}

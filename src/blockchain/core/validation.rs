use crate::blockchain::core::chain::Block;
use crate::diagnostics::DiagnosticsSink;
use crate::error::ChainError;
use std::sync::Arc;

/// Verifies hash integrity, chain linkage, and monotonic ordering between
/// adjacent blocks, and across an entire chain.
pub struct Validator {
    sink: Arc<dyn DiagnosticsSink>,
}

impl Validator {
    pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Validator { sink }
    }

    /// Checks `current` against its predecessor: content hash first, then
    /// linkage, then timestamp ordering. The failure reason names the block.
    pub fn validate_block(&self, current: &Block, previous: &Block) -> Result<(), ChainError> {
        let index = current.index;

        if current.hash != current.canonical_hash() {
            self.sink
                .warning(&format!("block {} has an invalid hash", index));
            return Err(ChainError::HashMismatch { index });
        }

        if current.previous_hash != previous.hash {
            self.sink
                .warning(&format!("block {} has an invalid previous hash", index));
            return Err(ChainError::BrokenLinkage { index });
        }

        if current.timestamp <= previous.timestamp {
            self.sink
                .warning(&format!("block {} has an invalid timestamp", index));
            return Err(ChainError::NonMonotonicTimestamp { index });
        }

        Ok(())
    }

    /// Pairwise validation across every adjacent pair; genesis is exempt.
    /// Short-circuits on the first failure.
    pub fn validate_chain(&self, chain: &[Block]) -> Result<(), ChainError> {
        for pair in chain.windows(2) {
            self.validate_block(&pair[1], &pair[0])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use crate::transaction::Transaction;

    fn validator() -> Validator {
        Validator::new(Arc::new(NullSink))
    }

    fn chain_of_two() -> (Block, Block) {
        let genesis = Block::new(0, "0".to_string(), 0, Vec::new());
        let tx = Transaction::new(None, b"recipient".to_vec(), 3, None, 5);
        let next = Block::new(1, genesis.hash.clone(), 10, vec![tx]);
        (genesis, next)
    }

    #[test]
    fn test_valid_pair_passes() {
        let (genesis, next) = chain_of_two();
        assert!(validator().validate_block(&next, &genesis).is_ok());
        assert!(validator().validate_chain(&[genesis, next]).is_ok());
    }

    #[test]
    fn test_tampered_content_is_a_hash_mismatch() {
        let (genesis, mut next) = chain_of_two();
        next.transactions[0].amount = 999;
        let err = validator().validate_block(&next, &genesis).unwrap_err();
        assert_eq!(err, ChainError::HashMismatch { index: 1 });
    }

    #[test]
    fn test_wrong_previous_hash_is_broken_linkage() {
        let (genesis, _) = chain_of_two();
        let tx = Transaction::new(None, b"recipient".to_vec(), 3, None, 5);
        let detached = Block::new(1, "somewhere-else".to_string(), 10, vec![tx]);
        let err = validator().validate_block(&detached, &genesis).unwrap_err();
        assert_eq!(err, ChainError::BrokenLinkage { index: 1 });
    }

    #[test]
    fn test_equal_timestamp_is_non_monotonic() {
        let genesis = Block::new(0, "0".to_string(), 0, Vec::new());
        let same_instant = Block::new(1, genesis.hash.clone(), 0, Vec::new());
        let err = validator()
            .validate_block(&same_instant, &genesis)
            .unwrap_err();
        assert_eq!(err, ChainError::NonMonotonicTimestamp { index: 1 });
    }

    #[test]
    fn test_validate_chain_reports_first_failure() {
        let (genesis, next) = chain_of_two();
        let mut third = Block::new(2, next.hash.clone(), 20, Vec::new());
        third.previous_hash = "broken".to_string();
        third.hash = third.canonical_hash();

        let err = validator()
            .validate_chain(&[genesis, next, third])
            .unwrap_err();
        assert_eq!(err, ChainError::BrokenLinkage { index: 2 });
    }

    #[test]
    fn test_single_block_chain_is_valid() {
        let genesis = Block::new(0, "0".to_string(), 0, Vec::new());
        assert!(validator().validate_chain(&[genesis]).is_ok());
    }
}

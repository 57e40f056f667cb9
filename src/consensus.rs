//! Proof-of-work admission gate: brute-force nonce search against a
//! leading-zero difficulty target.

use crate::blockchain::core::chain::Block;
use crate::diagnostics::DiagnosticsSink;
use crate::error::ChainError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation handle for the unbounded nonce search.
///
/// Cloneable and shareable across threads; any holder may cancel. The miner
/// checks it once per nonce iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Mines candidate blocks and checks hashes against the difficulty target.
/// Difficulty is fixed for the lifetime of an instance.
pub struct ProofOfWork {
    difficulty: usize,
    sink: Arc<dyn DiagnosticsSink>,
}

impl ProofOfWork {
    pub fn new(difficulty: usize, sink: Arc<dyn DiagnosticsSink>) -> Self {
        ProofOfWork { difficulty, sink }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// The leading-zero prefix an acceptable hash must carry.
    pub fn target(&self) -> String {
        "0".repeat(self.difficulty)
    }

    pub fn is_satisfied(&self, block: &Block) -> bool {
        block.hash.starts_with(&self.target())
    }

    /// Increments the nonce and recomputes the hash until the target is
    /// met, then returns the final hash.
    ///
    /// The search is unbounded; callers needing liveness impose it through
    /// `cancel`, which surfaces as [`ChainError::MiningInterrupted`]. The
    /// block is mutated in place: nonce and hash only.
    pub fn mine(&self, block: &mut Block, cancel: &CancelToken) -> Result<String, ChainError> {
        while !self.is_satisfied(block) {
            if cancel.is_cancelled() {
                return Err(ChainError::MiningInterrupted);
            }
            block.nonce += 1;
            block.hash = block.canonical_hash();
        }
        self.sink.info(&format!("block mined: {}", block.hash));
        Ok(block.hash.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;

    fn proof_of_work(difficulty: usize) -> ProofOfWork {
        ProofOfWork::new(difficulty, Arc::new(NullSink))
    }

    fn candidate() -> Block {
        Block::new(1, "previous".to_string(), 10, Vec::new())
    }

    #[test]
    fn test_target_repeats_zero_per_difficulty() {
        assert_eq!(proof_of_work(0).target(), "");
        assert_eq!(proof_of_work(3).target(), "000");
    }

    #[test]
    fn test_zero_difficulty_accepts_any_block() {
        let pow = proof_of_work(0);
        let mut block = candidate();
        assert!(pow.is_satisfied(&block));
        let hash = pow.mine(&mut block, &CancelToken::new()).unwrap();
        assert_eq!(block.nonce, 0);
        assert_eq!(hash, block.canonical_hash());
    }

    #[test]
    fn test_mined_hash_meets_difficulty_and_content() {
        for difficulty in 1..=2 {
            let pow = proof_of_work(difficulty);
            let mut block = candidate();
            let hash = pow.mine(&mut block, &CancelToken::new()).unwrap();

            assert!(hash.starts_with(&pow.target()));
            assert!(pow.is_satisfied(&block));
            // Mining touched nothing but nonce and hash.
            assert_eq!(block.hash, block.canonical_hash());
            assert_eq!(block.index, 1);
            assert_eq!(block.previous_hash, "previous");
            assert_eq!(block.timestamp, 10);
        }
    }

    #[test]
    fn test_cancelled_search_is_interrupted() {
        // 64 leading zeros cannot happen by accident, so the loop runs until
        // it observes the token.
        let pow = proof_of_work(64);
        let mut block = candidate();

        let cancel = CancelToken::new();
        cancel.cancel();

        let err = pow.mine(&mut block, &cancel).unwrap_err();
        assert_eq!(err, ChainError::MiningInterrupted);
    }

    #[test]
    fn test_cancel_token_is_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}

//! Inbound synchronization entrypoints: candidate-block delivery and
//! longest-valid-chain substitution.
//!
//! The transport collaborator hands decoded wire data to these two
//! operations; nothing else crosses the validated boundary.

use crate::blockchain::core::chain::{Block, Blockchain};
use crate::error::ChainError;
use crate::wire::WireBlock;

/// Result of offering a replacement chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The received chain was valid and strictly longer; it is now local.
    Replaced { old_len: usize, new_len: usize },
    /// The received chain was not longer; the local chain stands.
    Ignored { local_len: usize, remote_len: usize },
}

impl Blockchain {
    /// The committed chain in transfer form.
    pub fn wire_chain(&self) -> Vec<WireBlock> {
        self.chain.iter().map(WireBlock::from).collect()
    }

    /// Delivers an externally mined block. The reconstructed block must pass
    /// validation against the current tip before it is committed.
    pub fn receive_candidate_block(&mut self, wire: WireBlock) -> Result<(), ChainError> {
        let block = Block::try_from(wire)?;
        self.validator().validate_block(&block, self.latest_block())?;
        self.diagnostics()
            .info(&format!("accepted external block {}", block.index));
        self.chain.push(block);
        Ok(())
    }

    /// Longest-valid-chain substitution: the candidate replaces the local
    /// chain only if it is internally consistent and strictly longer. Ties
    /// favor the existing chain.
    pub fn receive_chain(&mut self, wire: Vec<WireBlock>) -> Result<SyncOutcome, ChainError> {
        let candidate = wire
            .into_iter()
            .map(Block::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.validator().validate_chain(&candidate)?;

        let local_len = self.chain.len();
        let remote_len = candidate.len();
        if remote_len > local_len {
            self.chain = candidate;
            self.diagnostics()
                .info(&format!("chain replaced: {} -> {} blocks", local_len, remote_len));
            Ok(SyncOutcome::Replaced {
                old_len: local_len,
                new_len: remote_len,
            })
        } else {
            self.diagnostics()
                .info("received chain is not longer; ignoring");
            Ok(SyncOutcome::Ignored {
                local_len,
                remote_len,
            })
        }
    }
}

//! Exclusive-writer ownership of the ledger.
//!
//! `mine_pending` reads the tip, mines against it, and commits conditionally
//! on that same tip still being current, so exactly one mining/commit
//! sequence may be in flight per chain. [`LedgerNode`] serializes admission,
//! mining, and inbound sync behind a single lock, and carries the
//! cancellation token that keeps an in-flight nonce search interruptible.

use crate::blockchain::core::chain::{Blockchain, MineOutcome};
use crate::config::Config;
use crate::consensus::CancelToken;
use crate::crypto::SignatureVerifier;
use crate::diagnostics::DiagnosticsSink;
use crate::error::ChainError;
use crate::sync::SyncOutcome;
use crate::transaction::Transaction;
use crate::wire::WireBlock;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct LedgerNode {
    ledger: Mutex<Blockchain>,
    cancel: CancelToken,
}

impl LedgerNode {
    pub fn new(
        difficulty: usize,
        verifier: Arc<dyn SignatureVerifier>,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        LedgerNode {
            ledger: Mutex::new(Blockchain::new(difficulty, verifier, sink)),
            cancel: CancelToken::new(),
        }
    }

    pub fn from_config(
        config: &Config,
        verifier: Arc<dyn SignatureVerifier>,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        LedgerNode {
            ledger: Mutex::new(Blockchain::from_config(config, verifier, sink)),
            cancel: CancelToken::new(),
        }
    }

    pub fn submit_transaction(&self, transaction: Transaction) -> Result<(), ChainError> {
        self.ledger.lock().add_transaction(transaction)
    }

    /// Mines the pending pool while holding the writer lock; the node's
    /// shutdown token can interrupt the search from another thread.
    pub fn mine(&self, miner: &[u8]) -> Result<MineOutcome, ChainError> {
        self.ledger.lock().mine_pending_cancelable(miner, &self.cancel)
    }

    pub fn balance_of(&self, identity: &[u8]) -> i128 {
        self.ledger.lock().balance_of(identity)
    }

    pub fn chain_len(&self) -> usize {
        self.ledger.lock().len()
    }

    pub fn is_chain_valid(&self) -> bool {
        self.ledger.lock().is_chain_valid()
    }

    pub fn wire_chain(&self) -> Vec<WireBlock> {
        self.ledger.lock().wire_chain()
    }

    pub fn receive_candidate_block(&self, wire: WireBlock) -> Result<(), ChainError> {
        self.ledger.lock().receive_candidate_block(wire)
    }

    pub fn receive_chain(&self, wire: Vec<WireBlock>) -> Result<SyncOutcome, ChainError> {
        self.ledger.lock().receive_chain(wire)
    }

    /// Stops the node's mining permanently. A blocked miner observes the
    /// token on its next nonce iteration; later `mine` calls are refused
    /// with the same interruption.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

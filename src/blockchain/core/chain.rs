use crate::blockchain::core::validation::Validator;
use crate::config::Config;
use crate::consensus::{CancelToken, ProofOfWork};
use crate::crypto::SignatureVerifier;
use crate::diagnostics::DiagnosticsSink;
use crate::error::ChainError;
use crate::transaction::Transaction;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Fixed reward credited to the miner of each committed block.
pub const MINING_REWARD: u64 = 1;
/// `previous_hash` carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// An ordered batch of transactions with linkage metadata and a content
/// hash over the canonical serialization.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub index: u64,
    pub previous_hash: String,
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub nonce: u64,
    pub hash: String,
}

impl Block {
    /// Fresh construction: the hash is computed from the block content.
    pub fn new(
        index: u64,
        previous_hash: String,
        timestamp: u64,
        transactions: Vec<Transaction>,
    ) -> Self {
        let mut block = Block {
            index,
            previous_hash,
            timestamp,
            transactions,
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.canonical_hash();
        block
    }

    /// Reconstruction from transferred data: the supplied hash is trusted
    /// provisionally and must pass [`Validator::validate_block`] before the
    /// block is treated as canonical.
    pub fn with_hash(
        index: u64,
        previous_hash: String,
        timestamp: u64,
        transactions: Vec<Transaction>,
        nonce: u64,
        hash: String,
    ) -> Self {
        Block {
            index,
            previous_hash,
            timestamp,
            transactions,
            nonce,
            hash,
        }
    }

    /// SHA-256 over the sorted-key serialization of the block content:
    /// index, previous hash, timestamp, transactions (signatures included),
    /// nonce. The block's own `hash` field is not part of the content.
    pub fn canonical_hash(&self) -> String {
        let fields = json!({
            "index": self.index,
            "previous_hash": self.previous_hash,
            "timestamp": self.timestamp,
            "transactions": self
                .transactions
                .iter()
                .map(Transaction::canonical_fields)
                .collect::<Vec<_>>(),
            "nonce": self.nonce,
        });
        hex::encode(Sha256::digest(fields.to_string().as_bytes()))
    }
}

/// Outcome of a mining round that did not fail validation.
#[derive(Debug, Clone)]
pub enum MineOutcome {
    /// Candidate appended to the chain; the reward transaction now seeds the
    /// pending pool.
    Committed { block: Block, reward: Transaction },
    /// The pending pool was empty; nothing changed.
    NothingToMine,
}

/// The ledger: committed chain plus the pending-transaction pool.
///
/// Single-writer by contract: `mine_pending` reads the tip, mines against
/// it, and commits conditionally on that same tip, so concurrent callers
/// must serialize all mutation (see [`crate::node::LedgerNode`]).
pub struct Blockchain {
    pub chain: Vec<Block>,
    pub pending_transactions: Vec<Transaction>,
    pub difficulty: usize,
    verifier: Arc<dyn SignatureVerifier>,
    sink: Arc<dyn DiagnosticsSink>,
    validator: Validator,
}

impl Blockchain {
    /// Creates a ledger holding only the genesis block.
    pub fn new(
        difficulty: usize,
        verifier: Arc<dyn SignatureVerifier>,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let validator = Validator::new(sink.clone());
        Blockchain {
            chain: vec![Self::create_genesis_block()],
            pending_transactions: Vec::new(),
            difficulty,
            verifier,
            sink,
            validator,
        }
    }

    pub fn from_config(
        config: &Config,
        verifier: Arc<dyn SignatureVerifier>,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        Self::new(config.ledger.difficulty, verifier, sink)
    }

    fn create_genesis_block() -> Block {
        Block::new(0, GENESIS_PREVIOUS_HASH.to_string(), 0, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn latest_block(&self) -> &Block {
        self.chain.last().expect("chain always contains the genesis block")
    }

    pub(crate) fn validator(&self) -> &Validator {
        &self.validator
    }

    pub(crate) fn diagnostics(&self) -> &dyn DiagnosticsSink {
        self.sink.as_ref()
    }

    /// Admits a transaction into the pending pool.
    ///
    /// Reward-style (sender-less) transactions are admitted unconditionally.
    /// Sender-bearing transactions must carry a verifying signature and a
    /// ledger balance covering the amount. Rejection leaves the pool
    /// untouched and returns the reason.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), ChainError> {
        if let Err(reason) = self.check_admissible(&transaction) {
            self.sink
                .warning(&format!("transaction rejected: {}", reason));
            return Err(reason);
        }
        self.pending_transactions.push(transaction);
        Ok(())
    }

    fn check_admissible(&self, transaction: &Transaction) -> Result<(), ChainError> {
        transaction.validate_size()?;

        let sender = match &transaction.sender {
            // Reward transactions bypass signature and balance checks.
            None => return Ok(()),
            Some(sender) => sender,
        };

        if !transaction.is_valid(self.verifier.as_ref()) {
            return Err(ChainError::InvalidSignature);
        }

        let balance = self.balance_of(sender);
        if balance < i128::from(transaction.amount) {
            return Err(ChainError::InsufficientBalance {
                balance,
                amount: transaction.amount,
            });
        }

        Ok(())
    }

    /// Derives a balance by scanning every transaction in every committed
    /// block. Deliberately uncached: cost grows linearly with ledger size.
    pub fn balance_of(&self, identity: &[u8]) -> i128 {
        let mut balance: i128 = 0;
        for block in &self.chain {
            for transaction in &block.transactions {
                if transaction.sender.as_deref() == Some(identity) {
                    balance -= i128::from(transaction.amount);
                }
                if transaction.recipient == identity {
                    balance += i128::from(transaction.amount);
                }
            }
        }
        balance
    }

    /// Mines the pending pool into a new block. See
    /// [`Blockchain::mine_pending_cancelable`]; this variant runs the nonce
    /// search to completion.
    pub fn mine_pending(&mut self, miner: &[u8]) -> Result<MineOutcome, ChainError> {
        self.mine_pending_cancelable(miner, &CancelToken::new())
    }

    /// One admission attempt: pending -> mining -> candidate -> committed or
    /// rejected.
    ///
    /// An empty pool is a no-op. Otherwise the full pending set is mined
    /// into a candidate extending the current tip; on successful validation
    /// the candidate is appended and the pool is replaced by a single reward
    /// transaction for `miner` (the reward seeds the next round rather than
    /// joining the block it paid for). A rejected candidate is discarded and
    /// the pool keeps the transactions it held. The nonce search checks
    /// `cancel` on every iteration.
    pub fn mine_pending_cancelable(
        &mut self,
        miner: &[u8],
        cancel: &CancelToken,
    ) -> Result<MineOutcome, ChainError> {
        if self.pending_transactions.is_empty() {
            self.sink.info("no transactions to mine");
            return Ok(MineOutcome::NothingToMine);
        }

        let now = chrono::Utc::now().timestamp_millis() as u64;
        // Strict timestamp monotonicity must survive sub-millisecond rounds.
        let timestamp = now.max(self.latest_block().timestamp + 1);

        let mut candidate = Block::new(
            self.chain.len() as u64,
            self.latest_block().hash.clone(),
            timestamp,
            self.pending_transactions.clone(),
        );

        let proof_of_work = ProofOfWork::new(self.difficulty, self.sink.clone());
        proof_of_work.mine(&mut candidate, cancel)?;

        let reward = Transaction::reward(miner.to_vec(), MINING_REWARD, timestamp);

        match self.validator.validate_block(&candidate, self.latest_block()) {
            Ok(()) => {
                self.chain.push(candidate.clone());
                self.pending_transactions = vec![reward.clone()];
                Ok(MineOutcome::Committed {
                    block: candidate,
                    reward,
                })
            }
            Err(reason) => {
                self.sink
                    .warning(&format!("mined candidate rejected: {}", reason));
                Err(reason)
            }
        }
    }

    /// Whether the committed chain is internally consistent.
    pub fn is_chain_valid(&self) -> bool {
        self.validator.validate_chain(&self.chain).is_ok()
    }
}

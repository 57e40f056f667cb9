//! Transferable forms of transactions, blocks, and chains.
//!
//! The transport collaborator carries these as ordered field mappings:
//! binary fields are lowercase hex, absent optionals are explicit nulls.
//! Decoding is fallible and never panics on malformed input.

use crate::blockchain::core::chain::Block;
use crate::error::ChainError;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTransaction {
    pub sender: Option<String>,
    pub recipient: String,
    pub amount: u64,
    pub content: Option<String>,
    pub sender_public_key: Option<String>,
    pub signature: Option<String>,
    pub timestamp: u64,
}

impl From<&Transaction> for WireTransaction {
    fn from(tx: &Transaction) -> Self {
        WireTransaction {
            sender: tx.sender.as_deref().map(hex::encode),
            recipient: hex::encode(&tx.recipient),
            amount: tx.amount,
            content: tx.content.as_deref().map(hex::encode),
            sender_public_key: tx.sender_public_key.as_deref().map(hex::encode),
            signature: tx.signature.as_deref().map(hex::encode),
            timestamp: tx.timestamp,
        }
    }
}

impl TryFrom<WireTransaction> for Transaction {
    type Error = ChainError;

    fn try_from(wire: WireTransaction) -> Result<Self, ChainError> {
        Ok(Transaction {
            sender: wire.sender.as_deref().map(hex::decode).transpose()?,
            recipient: hex::decode(&wire.recipient)?,
            amount: wire.amount,
            content: wire.content.as_deref().map(hex::decode).transpose()?,
            sender_public_key: wire
                .sender_public_key
                .as_deref()
                .map(hex::decode)
                .transpose()?,
            signature: wire.signature.as_deref().map(hex::decode).transpose()?,
            timestamp: wire.timestamp,
        })
    }
}

/// A block in transfer form. `hash` rides along for provisional-trust
/// reconstruction; the canonical hash content remains the other five fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBlock {
    pub index: u64,
    pub previous_hash: String,
    pub timestamp: u64,
    pub transactions: Vec<WireTransaction>,
    pub nonce: u64,
    pub hash: String,
}

impl From<&Block> for WireBlock {
    fn from(block: &Block) -> Self {
        WireBlock {
            index: block.index,
            previous_hash: block.previous_hash.clone(),
            timestamp: block.timestamp,
            transactions: block.transactions.iter().map(WireTransaction::from).collect(),
            nonce: block.nonce,
            hash: block.hash.clone(),
        }
    }
}

impl TryFrom<WireBlock> for Block {
    type Error = ChainError;

    fn try_from(wire: WireBlock) -> Result<Self, ChainError> {
        let transactions = wire
            .transactions
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Block::with_hash(
            wire.index,
            wire.previous_hash,
            wire.timestamp,
            transactions,
            wire.nonce,
            wire.hash,
        ))
    }
}

impl Transaction {
    pub fn to_wire(&self) -> WireTransaction {
        WireTransaction::from(self)
    }
}

impl Block {
    pub fn to_wire(&self) -> WireBlock {
        WireBlock::from(self)
    }
}

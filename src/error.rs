//! Error types for ledgerchain

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    HashMismatch { index: u64 },
    BrokenLinkage { index: u64 },
    NonMonotonicTimestamp { index: u64 },
    InvalidSignature,
    InsufficientBalance { balance: i128, amount: u64 },
    InvalidTransaction(String),
    MiningInterrupted,
    Wire(String),
    Config(String),
    Crypto(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::HashMismatch { index } => {
                write!(f, "Block {} hash does not match its content", index)
            }
            ChainError::BrokenLinkage { index } => {
                write!(f, "Block {} previous hash does not match the prior block", index)
            }
            ChainError::NonMonotonicTimestamp { index } => {
                write!(f, "Block {} timestamp is not after its predecessor", index)
            }
            ChainError::InvalidSignature => write!(f, "Invalid transaction signature"),
            ChainError::InsufficientBalance { balance, amount } => write!(
                f,
                "Insufficient balance: {} available, {} required",
                balance, amount
            ),
            ChainError::InvalidTransaction(msg) => write!(f, "Invalid transaction: {}", msg),
            ChainError::MiningInterrupted => write!(f, "Mining interrupted"),
            ChainError::Wire(msg) => write!(f, "Wire error: {}", msg),
            ChainError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ChainError::Crypto(msg) => write!(f, "Cryptographic error: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<hex::FromHexError> for ChainError {
    fn from(err: hex::FromHexError) -> Self {
        ChainError::Wire(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;

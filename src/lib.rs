//! ledgerchain - a tamper-evident, append-only ledger of value-transfer
//! records, secured by a proof-of-work admission gate and validated through
//! hash-chain linkage.
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Chain ownership, transaction admission, mining commit,
//!   and block/chain validation
//! - [`transaction`] - Transaction types and validation
//!
//! ## Consensus
//! - [`consensus`] - Proof-of-work nonce search and cancellation
//!
//! ## Boundaries
//! - [`crypto`] - Signature-verification seam (secp256k1 by default)
//! - [`wire`] - Transferable forms for the transport collaborator
//! - [`sync`] - Inbound candidate-block and chain delivery
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`diagnostics`] - Injected diagnostics sink
//! - [`error`] - Error types
//! - [`node`] - Exclusive-writer ledger ownership

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod transaction;

// ============================================================================
// Consensus & Mining
// ============================================================================
pub mod consensus;

// ============================================================================
// Boundaries
// ============================================================================
pub mod crypto;
pub mod sync;
pub mod wire;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod node;

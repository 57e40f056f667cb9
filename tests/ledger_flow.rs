//! Integration tests for the full admit -> mine -> commit flow with real
//! signing keys.

use ledgerchain::blockchain::{Blockchain, MineOutcome, MINING_REWARD};
use ledgerchain::crypto::{KeyPair, Secp256k1Verifier};
use ledgerchain::diagnostics::NullSink;
use ledgerchain::error::ChainError;
use ledgerchain::transaction::Transaction;
use std::sync::Arc;

/// Helper to create a ledger with the stock verifier and silent diagnostics
fn test_ledger(difficulty: usize) -> Blockchain {
    Blockchain::new(difficulty, Arc::new(Secp256k1Verifier), Arc::new(NullSink))
}

/// Helper to build a signed transfer from `signer`
fn signed_transfer(
    signer: &KeyPair,
    recipient: Vec<u8>,
    amount: u64,
    timestamp: u64,
) -> Result<Transaction, Box<dyn std::error::Error>> {
    let mut tx = Transaction::new(
        Some(signer.identity()),
        recipient,
        amount,
        Some(b"settlement note".to_vec()),
        timestamp,
    );
    let signature = signer.sign(&tx.signable_message())?;
    tx.sign(signature.to_vec(), signer.identity());
    Ok(tx)
}

#[test]
fn test_funded_transfer_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = test_ledger(2);
    let alice = KeyPair::generate()?;
    let bob = KeyPair::generate()?;
    let miner = KeyPair::generate()?;

    // Grant: sender-less transactions bypass signature and balance checks.
    ledger.add_transaction(Transaction::new(None, alice.identity(), 5, None, 10))?;
    let outcome = ledger.mine_pending(&miner.identity())?;
    assert!(matches!(outcome, MineOutcome::Committed { .. }));
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.balance_of(&alice.identity()), 5);

    // The pool now holds exactly the miner's reward, seeding the next round.
    assert_eq!(ledger.pending_transactions.len(), 1);
    let seeded = &ledger.pending_transactions[0];
    assert!(seeded.is_reward());
    assert_eq!(seeded.recipient, miner.identity());
    assert_eq!(seeded.amount, MINING_REWARD);

    // Alice pays Bob out of her mined-in balance.
    let tx = signed_transfer(&alice, bob.identity(), 3, 20)?;
    ledger.add_transaction(tx)?;
    ledger.mine_pending(&miner.identity())?;

    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.balance_of(&alice.identity()), 2);
    assert_eq!(ledger.balance_of(&bob.identity()), 3);
    assert_eq!(ledger.balance_of(&miner.identity()), 1);
    assert!(ledger.is_chain_valid());
    Ok(())
}

#[test]
fn test_forged_signature_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = test_ledger(1);
    let alice = KeyPair::generate()?;

    let mut tx = Transaction::new(
        Some(alice.identity()),
        b"recipient".to_vec(),
        1,
        Some(b"note".to_vec()),
        10,
    );
    tx.sign(vec![0u8; 64], alice.identity());

    let err = ledger.add_transaction(tx).unwrap_err();
    assert_eq!(err, ChainError::InvalidSignature);
    assert!(ledger.pending_transactions.is_empty());
    assert_eq!(ledger.balance_of(&alice.identity()), 0);
    Ok(())
}

#[test]
fn test_signature_from_a_different_key_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = test_ledger(1);
    let alice = KeyPair::generate()?;
    let mallory = KeyPair::generate()?;

    ledger.add_transaction(Transaction::new(None, alice.identity(), 5, None, 10))?;
    ledger.mine_pending(b"miner")?;

    // Mallory signs but presents Alice's key as the verification key.
    let mut tx = Transaction::new(
        Some(alice.identity()),
        b"recipient".to_vec(),
        1,
        Some(b"note".to_vec()),
        20,
    );
    let signature = mallory.sign(&tx.signable_message())?;
    tx.sign(signature.to_vec(), alice.identity());

    let err = ledger.add_transaction(tx).unwrap_err();
    assert_eq!(err, ChainError::InvalidSignature);
    Ok(())
}

#[test]
fn test_spending_more_than_the_ledger_grants_is_rejected(
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = test_ledger(1);
    let alice = KeyPair::generate()?;

    ledger.add_transaction(Transaction::new(None, alice.identity(), 5, None, 10))?;
    ledger.mine_pending(b"miner")?;

    let tx = signed_transfer(&alice, b"recipient".to_vec(), 6, 20)?;
    let err = ledger.add_transaction(tx).unwrap_err();
    assert!(matches!(err, ChainError::InsufficientBalance { .. }));

    // A spend within the balance goes through afterwards.
    let tx = signed_transfer(&alice, b"recipient".to_vec(), 5, 21)?;
    ledger.add_transaction(tx)?;
    Ok(())
}

#[test]
fn test_every_mined_chain_validates() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = test_ledger(1);
    for round in 0..4 {
        ledger.add_transaction(Transaction::new(
            None,
            b"recipient".to_vec(),
            round + 1,
            None,
            10 + round,
        ))?;
        ledger.mine_pending(b"miner")?;
    }

    assert_eq!(ledger.len(), 5);
    assert!(ledger.is_chain_valid());

    // Every committed hash satisfies the difficulty target except genesis.
    for block in &ledger.chain[1..] {
        assert!(block.hash.starts_with('0'));
        assert_eq!(block.hash, block.canonical_hash());
    }
    Ok(())
}

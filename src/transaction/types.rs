/// Transaction types for the ledger
use serde_json::json;
use sha2::{Digest, Sha256};

/// Maximum transaction size in bytes (100KB) to prevent DoS
pub const MAX_TRANSACTION_SIZE: usize = 100_000;

/// A signed value-transfer record.
///
/// `sender` is `None` for reward transactions, which carry no signature and
/// are exempt from balance checks. Once admitted to a block a transaction is
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    pub sender: Option<Vec<u8>>,
    pub recipient: Vec<u8>,
    pub amount: u64,
    pub content: Option<Vec<u8>>,
    pub sender_public_key: Option<Vec<u8>>,
    pub signature: Option<Vec<u8>>,
    pub timestamp: u64,
}

impl Transaction {
    /// Creates an unsigned transaction. Sender-bearing transactions must be
    /// signed before admission.
    pub fn new(
        sender: Option<Vec<u8>>,
        recipient: Vec<u8>,
        amount: u64,
        content: Option<Vec<u8>>,
        timestamp: u64,
    ) -> Self {
        Transaction {
            sender,
            recipient,
            amount,
            content,
            sender_public_key: None,
            signature: None,
            timestamp,
        }
    }

    /// A reward transaction credits a miner: no sender, no content, no
    /// signature.
    pub fn reward(recipient: Vec<u8>, amount: u64, timestamp: u64) -> Self {
        Transaction::new(None, recipient, amount, None, timestamp)
    }

    pub fn is_reward(&self) -> bool {
        self.sender.is_none()
    }

    /// The payload a wallet signs: the content bytes (empty when absent).
    pub fn signable_message(&self) -> Vec<u8> {
        self.content.clone().unwrap_or_default()
    }

    pub fn sign(&mut self, signature: Vec<u8>, public_key: Vec<u8>) {
        self.signature = Some(signature);
        self.sender_public_key = Some(public_key);
    }

    /// The transaction rendered as its canonical field mapping: binary
    /// fields hex-encoded, absent optionals as explicit nulls. Sorted-key
    /// serialization of this mapping is the hashing input for blocks.
    pub(crate) fn canonical_fields(&self) -> serde_json::Value {
        json!({
            "sender": self.sender.as_deref().map(hex::encode),
            "recipient": hex::encode(&self.recipient),
            "amount": self.amount,
            "content": self.content.as_deref().map(hex::encode),
            "sender_public_key": self.sender_public_key.as_deref().map(hex::encode),
            "signature": self.signature.as_deref().map(hex::encode),
            "timestamp": self.timestamp,
        })
    }

    /// SHA-256 over the sorted-key serialization of the canonical mapping
    /// with the `signature` key removed. Identical logical content hashes
    /// identically regardless of how the transaction was constructed.
    pub fn canonical_hash(&self) -> String {
        let mut fields = self.canonical_fields();
        if let Some(map) = fields.as_object_mut() {
            map.remove("signature");
        }
        hex::encode(Sha256::digest(fields.to_string().as_bytes()))
    }
}

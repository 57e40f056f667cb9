/// Validation logic for transactions separated from type definitions
use crate::crypto::SignatureVerifier;
use crate::error::ChainError;
use crate::transaction::types::{Transaction, MAX_TRANSACTION_SIZE};

impl Transaction {
    /// Checks the signature through the injected verify capability.
    ///
    /// Fails closed: a transaction missing its signature or verification key
    /// is never valid, and the verifier's answer is always this function's
    /// return value.
    pub fn is_valid(&self, verifier: &dyn SignatureVerifier) -> bool {
        let (public_key, signature) = match (&self.sender_public_key, &self.signature) {
            (Some(pk), Some(sig)) => (pk, sig),
            _ => return false,
        };

        verifier.verify(public_key, &self.signable_message(), signature)
    }

    /// Validate transaction size to prevent DoS attacks
    pub fn validate_size(&self) -> Result<(), ChainError> {
        let serialized = bincode::serialize(self)
            .map_err(|e| ChainError::InvalidTransaction(format!("Serialization failed: {}", e)))?;

        if serialized.len() > MAX_TRANSACTION_SIZE {
            return Err(ChainError::InvalidTransaction(format!(
                "Transaction too large: {} bytes (max: {})",
                serialized.len(),
                MAX_TRANSACTION_SIZE
            )));
        }
        Ok(())
    }
}

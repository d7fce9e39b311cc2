//! Ed25519 verification of inbound interaction requests
//!
//! The chat platform signs `timestamp || raw body` with the application's
//! private key and sends the hex signature and the timestamp as headers.
//! Verification must run over the exact bytes received, before any parsing.

use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use thiserror::Error;

/// Header carrying the hex-encoded signature
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the signed timestamp
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Signature verification errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Malformed signature")]
    MalformedSignature,

    #[error("Signature mismatch")]
    Mismatch,
}

/// Verifies request signatures against one application public key
#[derive(Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Create a verifier from a hex-encoded 32-byte public key
    ///
    /// # Errors
    /// Returns an error if the key is not valid hex or not a valid curve point
    pub fn from_hex(public_key: &str) -> Result<Self, VerificationError> {
        let bytes = hex::decode(public_key.trim())
            .map_err(|e| VerificationError::InvalidPublicKey(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            VerificationError::InvalidPublicKey(format!(
                "expected {PUBLIC_KEY_LENGTH} bytes, got {}",
                b.len()
            ))
        })?;

        Self::from_bytes(&bytes)
    }

    /// Create a verifier from raw key bytes
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid curve point
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, VerificationError> {
        let key = VerifyingKey::from_bytes(bytes)
            .map_err(|e| VerificationError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { key })
    }

    /// Check `signature_hex` over `timestamp || body`
    ///
    /// # Errors
    /// Returns `MalformedSignature` for undecodable input and `Mismatch`
    /// when the signature does not verify.
    pub fn verify(
        &self,
        timestamp: &str,
        body: &[u8],
        signature_hex: &str,
    ) -> Result<(), VerificationError> {
        let raw = hex::decode(signature_hex.trim()).map_err(|_| VerificationError::MalformedSignature)?;
        let raw: [u8; SIGNATURE_LENGTH] = raw
            .try_into()
            .map_err(|_| VerificationError::MalformedSignature)?;
        let signature = Signature::from_bytes(&raw);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify_strict(&message, &signature)
            .map_err(|_| VerificationError::Mismatch)
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("public_key", &hex::encode(self.key.as_bytes()))
            .finish()
    }
}

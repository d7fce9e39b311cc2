//! Inbound request authentication

mod signature;

pub use signature::{SignatureVerifier, VerificationError, SIGNATURE_HEADER, TIMESTAMP_HEADER};

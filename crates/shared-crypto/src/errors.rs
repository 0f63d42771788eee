//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Signature has a high S value (malleable form)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid public key (not a point on the curve)
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid signature encoding
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signing primitive failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// The operating system random source could not be read
    #[error("Random source unavailable: {0}")]
    RandomSourceUnavailable(String),
}

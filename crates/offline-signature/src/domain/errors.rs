//! # Offline Signature Errors
//!
//! Verification failures are terminal and non-retryable: the message must be
//! discarded. None of them indicates a system fault. Chain lookups keep
//! "not found" out of the error space entirely.

use super::keys::Algorithm;
use chrono::{DateTime, Utc};
use shared_crypto::CryptoError;
use std::time::Duration;
use thiserror::Error;

/// Why a self-describing public key string could not be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyEncodingError {
    /// No `<algorithm>:` prefix
    #[error("missing algorithm prefix")]
    MissingPrefix,

    /// Prefix names no supported algorithm
    #[error("unknown key algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// Key body is not valid base58
    #[error("invalid base58: {0}")]
    Base58(String),

    /// Key body is longer than any supported key can encode to
    #[error("key body of {0} characters is too long")]
    TooLong(usize),

    /// Decoded key has the wrong length for its algorithm
    #[error("{algorithm} key must be {expected} bytes, got {actual}")]
    Length {
        algorithm: Algorithm,
        expected: usize,
        actual: usize,
    },

    /// Bytes have the right length but are not a valid curve point
    #[error("not a valid {0} point")]
    InvalidPoint(Algorithm),
}

/// Errors on the verification path, in check order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// Wrapper is not a single-key object under the expected key
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Domain tag differs from the protocol constant
    #[error("domain mismatch: expected {expected:?}, got {actual:?}")]
    DomainMismatch {
        expected: &'static str,
        actual: Option<String>,
    },

    /// A required envelope field is absent
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// Nonce is not base58 of 16-32 bytes
    #[error("invalid nonce: {0}")]
    InvalidNonce(String),

    /// Current time is past `exp` (plus tolerated skew)
    #[error("envelope expired at {expires_at}, now {now}")]
    Expired {
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// `aud` differs from the audience the verifier expects
    #[error("audience mismatch: expected {expected:?}, got {actual:?}")]
    AudienceMismatch { expected: String, actual: String },

    /// `network` differs from the network the verifier expects
    #[error("network mismatch: expected {expected}, got {actual:?}")]
    NetworkMismatch {
        expected: String,
        actual: Option<String>,
    },

    /// `pk` could not be decoded
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(#[from] KeyEncodingError),

    /// Declared `alg` differs from the algorithm implied by `pk`
    #[error("algorithm mismatch: declared {declared:?}, key implies {implied}")]
    AlgorithmMismatch {
        declared: String,
        implied: Algorithm,
    },

    /// Transport `publicKey` differs from the signed `pk`
    #[error("transport public key does not match signed key")]
    PublicKeyMismatch,

    /// Signature bytes are malformed or do not verify
    #[error("bad signature")]
    BadSignature,
}

/// Errors on the signing path. No partial output is produced on failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignError {
    /// Key prefix names no supported algorithm
    #[error("unsupported algorithm `{0}`")]
    UnsupportedAlgorithm(String),

    /// The OS random source could not supply a nonce
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// The signing key is not the key named in the envelope
    #[error("signing key does not match envelope public key")]
    KeyMismatch,

    /// TTL is zero, above the configured maximum, or overflows the clock
    #[error("invalid ttl: {0:?}")]
    InvalidTtl(Duration),

    /// Nonce length outside 16..=32 bytes
    #[error("invalid nonce length {0}")]
    InvalidNonceLength(usize),

    /// Curve primitive failure
    #[error("crypto error: {0}")]
    Crypto(CryptoError),
}

impl From<CryptoError> for SignError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::RandomSourceUnavailable(reason) => Self::RandomSourceUnavailable(reason),
            other => Self::Crypto(other),
        }
    }
}

/// Chain lookup failures. A missing key or account is NOT one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Directory unreachable or answered with an unexpected error
    #[error("lookup transport error: {0}")]
    Transport(String),

    /// Directory did not answer within the caller's deadline
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure of a verify-then-lookup flow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainVerifyError {
    /// The message itself is invalid; no lookup was made
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// The message is valid but the lookup failed
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

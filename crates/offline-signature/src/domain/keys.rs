//! # Keys and Algorithms
//!
//! Public keys travel as self-describing strings `"<prefix>:<base58(raw)>"`.
//! The prefix selects the curve; all algorithm branching dispatches on the
//! [`PublicKey`] variant.
//!
//! | Algorithm | `alg` wire name | key prefix | raw key bytes |
//! |-----------|-----------------|------------|---------------|
//! | Ed25519 | `ed25519` | `ed25519` | 32 |
//! | ECDSA/secp256k1 | `secp256k1-ecdsa` | `secp256k1` | 64 (`X \|\| Y`) |

use super::errors::KeyEncodingError;
use serde::{Deserialize, Serialize};
use shared_crypto::ecdsa::SECP256K1_PUBLIC_KEY_LENGTH;
use shared_crypto::signatures::ED25519_PUBLIC_KEY_LENGTH;
use shared_crypto::{
    sha256, CryptoError, Ed25519PublicKey, Ed25519Signature, Secp256k1PublicKey,
    Secp256k1Signature, SIGNATURE_LENGTH,
};
use std::fmt;
use std::str::FromStr;

/// Raw 64-byte signature (Ed25519, or compact ECDSA `r || s`).
pub type SignatureBytes = [u8; SIGNATURE_LENGTH];

/// Longest base58 text that can decode to `bytes` bytes.
///
/// Each base58 digit carries log2(58) ~ 5.858 bits, so `n` bytes need at most
/// `ceil(n * 1.3658)` digits. Strings longer than this are rejected before
/// decoding, which is quadratic in the input length.
pub const fn max_base58_len(bytes: usize) -> usize {
    (bytes * 1366 + 999) / 1000
}

/// Longest accepted key body: the 64-byte secp256k1 key.
const MAX_KEY_BODY_LEN: usize = max_base58_len(SECP256K1_PUBLIC_KEY_LENGTH);

/// Signature algorithm declared in an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Edwards curve; canonical bytes are signed directly.
    #[serde(rename = "ed25519")]
    Ed25519,
    /// ECDSA over secp256k1; the SHA-256 digest of the canonical bytes is signed.
    #[serde(rename = "secp256k1-ecdsa")]
    Secp256k1Ecdsa,
}

impl Algorithm {
    /// Name used in the envelope's `alg` field.
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1Ecdsa => "secp256k1-ecdsa",
        }
    }

    /// Prefix used in self-describing key strings.
    pub const fn key_prefix(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1Ecdsa => "secp256k1",
        }
    }

    /// Exact raw public key length.
    pub const fn public_key_len(&self) -> usize {
        match self {
            Self::Ed25519 => ED25519_PUBLIC_KEY_LENGTH,
            Self::Secp256k1Ecdsa => SECP256K1_PUBLIC_KEY_LENGTH,
        }
    }

    /// Parse an `alg` field value.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "ed25519" => Some(Self::Ed25519),
            "secp256k1-ecdsa" => Some(Self::Secp256k1Ecdsa),
            _ => None,
        }
    }

    /// Parse a key-string prefix.
    pub fn from_key_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ed25519" => Some(Self::Ed25519),
            "secp256k1" => Some(Self::Secp256k1Ecdsa),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A verification key, tagged by curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519(Ed25519PublicKey),
    Secp256k1(Secp256k1PublicKey),
}

impl PublicKey {
    /// Algorithm implied by this key.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Secp256k1(_) => Algorithm::Secp256k1Ecdsa,
        }
    }

    /// Raw key bytes (32 for Ed25519, 64 `X || Y` for secp256k1).
    pub fn raw_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(pk) => pk.as_bytes(),
            Self::Secp256k1(pk) => pk.as_bytes(),
        }
    }

    /// Self-describing `"<prefix>:<base58>"` form.
    pub fn encode(&self) -> String {
        format!(
            "{}:{}",
            self.algorithm().key_prefix(),
            bs58::encode(self.raw_bytes()).into_string()
        )
    }

    /// Read only the algorithm prefix of a key string, without decoding the key.
    pub fn algorithm_of(encoded: &str) -> Result<Algorithm, KeyEncodingError> {
        let (prefix, _) = encoded
            .split_once(':')
            .ok_or(KeyEncodingError::MissingPrefix)?;
        Algorithm::from_key_prefix(prefix)
            .ok_or_else(|| KeyEncodingError::UnknownAlgorithm(prefix.to_string()))
    }

    /// Decode a self-describing key string, enforcing the exact length per curve.
    pub fn parse(encoded: &str) -> Result<Self, KeyEncodingError> {
        let algorithm = Self::algorithm_of(encoded)?;
        let (_, body) = encoded
            .split_once(':')
            .ok_or(KeyEncodingError::MissingPrefix)?;

        if body.len() > MAX_KEY_BODY_LEN {
            return Err(KeyEncodingError::TooLong(body.len()));
        }

        let raw = bs58::decode(body)
            .into_vec()
            .map_err(|e| KeyEncodingError::Base58(e.to_string()))?;

        if raw.len() != algorithm.public_key_len() {
            return Err(KeyEncodingError::Length {
                algorithm,
                expected: algorithm.public_key_len(),
                actual: raw.len(),
            });
        }

        let key = match algorithm {
            Algorithm::Ed25519 => Ed25519PublicKey::from_slice(&raw).map(Self::Ed25519),
            Algorithm::Secp256k1Ecdsa => Secp256k1PublicKey::from_slice(&raw).map(Self::Secp256k1),
        };
        key.map_err(|_| KeyEncodingError::InvalidPoint(algorithm))
    }

    /// Verify `signature` over canonical message bytes.
    ///
    /// Ed25519 verifies the bytes directly; secp256k1 verifies their SHA-256
    /// digest and refuses high-S signatures.
    pub fn verify(&self, message: &[u8], signature: &SignatureBytes) -> Result<(), CryptoError> {
        match self {
            Self::Ed25519(pk) => pk.verify(message, &Ed25519Signature::from_bytes(*signature)),
            Self::Secp256k1(pk) => {
                pk.verify_prehash(&sha256(message), &Secp256k1Signature::from_bytes(*signature))
            }
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for PublicKey {
    type Err = KeyEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(pk: Ed25519PublicKey) -> Self {
        Self::Ed25519(pk)
    }
}

impl From<Secp256k1PublicKey> for PublicKey {
    fn from(pk: Secp256k1PublicKey) -> Self {
        Self::Secp256k1(pk)
    }
}

/// Decode a base58 signature, requiring exactly 64 bytes.
pub fn decode_signature(encoded: &str) -> Option<SignatureBytes> {
    if encoded.len() > max_base58_len(SIGNATURE_LENGTH) {
        return None;
    }
    let raw = bs58::decode(encoded).into_vec().ok()?;
    raw.try_into().ok()
}

/// Encode a raw signature as base58.
pub fn encode_signature(signature: &SignatureBytes) -> String {
    bs58::encode(signature).into_string()
}

//! # SHA-256 Hashing
//!
//! Digest used by the secp256k1 branch: the canonical envelope bytes are
//! hashed once and the 32-byte digest is what gets signed.

use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Digest32 = [u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Digest32 {
    Sha256::digest(data).into()
}

//! # Shared Crypto - Curve Primitives for Offline Signatures
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Direct signing over canonical bytes |
//! | `ecdsa` | secp256k1 | Prehash signing over a SHA-256 digest |
//! | `hashing` | SHA-256 | Digest for the ECDSA branch |
//! | `random` | OS CSPRNG | Envelope nonces |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, strict verification (no malleable encodings)
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (BIP-62)
//! - **Nonces**: Drawn fresh from the OS on every call, never from a seeded PRNG

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod random;
pub mod signatures;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{sha256, Digest32};
pub use random::random_bytes;
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Length of every signature produced by this crate (Ed25519 and compact r||s).
pub const SIGNATURE_LENGTH: usize = 64;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

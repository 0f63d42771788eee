//! # Domain Layer
//!
//! Envelope construction, canonicalization, signing and verification.
//! Pure logic: no I/O, no clock reads, no network.

pub mod access_key;
pub mod canonical;
pub mod envelope;
pub mod errors;
pub mod keys;
pub mod message;
pub mod scheme;
pub mod signer;
pub mod verifier;

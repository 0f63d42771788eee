//! # Offline Signature Envelope (FN-OS1)
//!
//! Lets a key holder prove control of a public key, and bind that proof to a
//! payload, without submitting a transaction. A relying party verifies the
//! result entirely offline.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): envelope, canonical JSON, signing, verification
//! - **Ports Layer** (`ports/`): inbound API, outbound key holder / clock / directory
//! - **Service Layer** (`service/`): clock- and config-aware facade, chain checker
//! - **Adapters** (`adapters/`): local key pairs, in-memory and JSON-RPC directories
//!
//! ## Envelope
//!
//! ```text
//! { "offline_signature": {
//!     "domain": "FN-OS1", "alg": "ed25519" | "secp256k1-ecdsa",
//!     "network": "testnet" | "mainnet", "aud", "sub", "pk",
//!     "nonce", "iat", "exp", "payload" } }
//! ```
//!
//! The whole wrapper is canonicalized (sorted keys, no whitespace) and signed:
//! Ed25519 over the bytes, secp256k1 ECDSA over their SHA-256 digest (compact
//! `r || s`, low-S). Public keys travel as `<prefix>:<base58>`.
//!
//! ## Security Notes
//!
//! - **Replay**: bounded by `exp`; nonce deduplication is the relying party's job
//! - **Cross-protocol**: the domain tag and single wrapper key separate envelopes
//!   from any other signed structure
//! - **Malleability**: high-S secp256k1 signatures and non-canonical Ed25519
//!   encodings are rejected
//! - **Authority**: a valid signature proves key possession, not that the key
//!   still controls `sub`; use [`ChainIdentityChecker`] for that

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::directory::InMemoryAccessKeyDirectory;
pub use adapters::keypair::KeyPair;
pub use adapters::rpc::{JsonRpcAccessKeyDirectory, RpcTransport};
#[cfg(feature = "http")]
pub use adapters::rpc::HttpRpcTransport;
pub use config::{ChainConfig, ConfigError, OfflineSignatureConfig};
pub use domain::access_key::{AccessKeyLookup, AccessKeyPermission};
pub use domain::canonical::{canonicalize, canonicalize_serializable};
pub use domain::envelope::{
    Envelope, EnvelopeBody, EnvelopeBuilder, Network, Nonce, DEFAULT_TTL, DOMAIN_TAG, ENVELOPE_KEY,
    MAX_NONCE_LEN, MIN_NONCE_LEN,
};
pub use domain::errors::{
    ChainVerifyError, KeyEncodingError, LookupError, SignError, VerifyError,
};
pub use domain::keys::{decode_signature, encode_signature, Algorithm, PublicKey, SignatureBytes};
pub use domain::message::{EnvelopeClaims, SignedMessage, VerifiedMessage};
pub use domain::scheme::{EnvelopeScheme, SignRequest, SignatureScheme, SimpleScheme};
pub use domain::signer::{sign_canonical, sign_envelope, sign_value};
pub use domain::verifier::{verify_envelope, VerifyPolicy};
pub use ports::inbound::OfflineSignatureApi;
pub use ports::outbound::{
    AccessKeyDirectory, FixedTimeSource, MessageSigner, SystemTimeSource, TimeSource,
};
pub use service::{ChainIdentityChecker, ChainVerdict, OfflineSignatureService};

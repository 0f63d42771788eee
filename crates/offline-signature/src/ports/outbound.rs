//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators this crate consumes but does not own: a key holder that can
//! sign raw bytes, a clock, and a ledger directory of access keys.

use crate::domain::access_key::AccessKeyLookup;
use crate::domain::errors::{LookupError, SignError};
use crate::domain::keys::{PublicKey, SignatureBytes};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Key-pair capability.
///
/// `sign_bytes` receives exactly what the curve signs: the canonical message
/// for Ed25519, the 32-byte SHA-256 prehash for secp256k1. Hashing is the
/// caller's job, so implementations never need to know the envelope format.
pub trait MessageSigner: Send + Sync {
    /// The key that verifies this signer's output.
    fn public_key(&self) -> PublicKey;

    /// Produce a 64-byte signature over `bytes`.
    fn sign_bytes(&self, bytes: &[u8]) -> Result<SignatureBytes, SignError>;
}

/// Time source for issuing and checking envelope timestamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable time source for tests and replays.
#[derive(Debug)]
pub struct FixedTimeSource {
    time: RwLock<DateTime<Utc>>,
}

impl FixedTimeSource {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            time: RwLock::new(initial),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut time = self.time.write();
        *time += by;
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.time.write() = time;
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.time.read()
    }
}

/// Ledger directory of account access keys.
///
/// # Returns
/// - `Ok(Found(_))`: the key is registered on the account
/// - `Ok(NotFound)` / `Ok(AccountNotFound)`: a valid negative answer
/// - `Err(_)`: the directory could not answer; never conflate with "not found"
#[async_trait]
pub trait AccessKeyDirectory: Send + Sync {
    async fn query_access_key(
        &self,
        account_id: &str,
        public_key: &PublicKey,
    ) -> Result<AccessKeyLookup, LookupError>;
}

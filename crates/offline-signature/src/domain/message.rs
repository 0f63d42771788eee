//! # Transport and Result Types

use super::envelope::{Network, Nonce};
use super::keys::PublicKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transport unit: `{ message, signature, publicKey }`.
///
/// `message` is kept as raw JSON so verification canonicalizes exactly what
/// was signed, never a re-derived copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    /// The signed value: an envelope wrapper, or a bare payload for the
    /// simple scheme.
    pub message: Value,
    /// Base58 of the 64 signature bytes.
    pub signature: String,
    /// Self-describing signer key, duplicated for convenience.
    pub public_key: String,
}

/// Envelope fields that survived verification.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvelopeClaims {
    pub network: Option<Network>,
    pub audience: String,
    pub subject: String,
    pub nonce: Nonce,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

/// A message whose signature and structure have been checked.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifiedMessage {
    pub public_key: PublicKey,
    pub payload: Value,
    /// Present for envelope-scheme messages only.
    pub claims: Option<EnvelopeClaims>,
}

//! # Envelope
//!
//! The signed unit. On the wire it is a single-key object:
//!
//! ```text
//! { "offline_signature": { domain, alg, network, aud, sub, pk, nonce, iat, exp, payload } }
//! ```
//!
//! The whole wrapper, key included, is what gets canonicalized and signed.
//! Envelopes are built fresh per signing operation and never mutated.

use super::errors::SignError;
use super::keys::{max_base58_len, Algorithm, PublicKey};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Protocol and version tag. Any other value is rejected.
pub const DOMAIN_TAG: &str = "FN-OS1";

/// The envelope's only top-level key.
pub const ENVELOPE_KEY: &str = "offline_signature";

/// TTL applied when the caller does not supply one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Shortest accepted nonce, in bytes.
pub const MIN_NONCE_LEN: usize = 16;

/// Longest accepted nonce, in bytes.
pub const MAX_NONCE_LEN: usize = 32;

/// Envelope field names.
pub mod fields {
    pub const DOMAIN: &str = "domain";
    pub const ALG: &str = "alg";
    pub const NETWORK: &str = "network";
    pub const AUD: &str = "aud";
    pub const SUB: &str = "sub";
    pub const PK: &str = "pk";
    pub const NONCE: &str = "nonce";
    pub const IAT: &str = "iat";
    pub const EXP: &str = "exp";
    pub const PAYLOAD: &str = "payload";
}

// =============================================================================
// NETWORK
// =============================================================================

/// Ledger context the signature is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Mainnet,
}

impl Network {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testnet" => Ok(Self::Testnet),
            "mainnet" => Ok(Self::Mainnet),
            other => Err(format!("unknown network `{other}`")),
        }
    }
}

// =============================================================================
// NONCE
// =============================================================================

/// Random replay-protection nonce, 16 to 32 bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nonce(Vec<u8>);

impl Nonce {
    /// Draw a fresh nonce from the OS random source.
    pub fn generate(len: usize) -> Result<Self, SignError> {
        if !(MIN_NONCE_LEN..=MAX_NONCE_LEN).contains(&len) {
            return Err(SignError::InvalidNonceLength(len));
        }
        let bytes = shared_crypto::random_bytes(len)?;
        Ok(Self(bytes))
    }

    /// Wrap existing bytes, enforcing the length bounds.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SignError> {
        if !(MIN_NONCE_LEN..=MAX_NONCE_LEN).contains(&bytes.len()) {
            return Err(SignError::InvalidNonceLength(bytes.len()));
        }
        Ok(Self(bytes))
    }

    /// Decode a base58 nonce, enforcing the length bounds.
    pub fn parse(encoded: &str) -> Result<Self, String> {
        let max_chars = max_base58_len(MAX_NONCE_LEN);
        if encoded.len() > max_chars {
            return Err(format!(
                "encoded length {} exceeds {max_chars} characters",
                encoded.len()
            ));
        }
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| format!("invalid base58: {e}"))?;
        if !(MIN_NONCE_LEN..=MAX_NONCE_LEN).contains(&bytes.len()) {
            return Err(format!(
                "expected {MIN_NONCE_LEN}-{MAX_NONCE_LEN} bytes, got {}",
                bytes.len()
            ));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn encode(&self) -> String {
        bs58::encode(&self.0).into_string()
    }
}

// =============================================================================
// TIMESTAMPS
// =============================================================================

/// ISO-8601 UTC with millisecond precision and a `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|ts| ts.with_timezone(&Utc))
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// The envelope's inner field set.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvelopeBody {
    pub domain: String,
    pub alg: Algorithm,
    pub network: Network,
    pub aud: String,
    pub sub: String,
    pub pk: String,
    pub nonce: Nonce,
    pub iat: DateTime<Utc>,
    pub exp: DateTime<Utc>,
    pub payload: Value,
}

/// An unsigned envelope, ready to be canonicalized and signed.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    body: EnvelopeBody,
}

impl Envelope {
    /// Wrap a field set. The caller is responsible for the field values;
    /// prefer [`EnvelopeBuilder`].
    pub fn from_body(body: EnvelopeBody) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &EnvelopeBody {
        &self.body
    }

    pub fn payload(&self) -> &Value {
        &self.body.payload
    }

    /// Wire form: `{ "offline_signature": { ... } }`.
    pub fn to_value(&self) -> Value {
        let b = &self.body;
        let mut inner = Map::new();
        inner.insert(fields::DOMAIN.into(), Value::String(b.domain.clone()));
        inner.insert(fields::ALG.into(), Value::String(b.alg.wire_name().into()));
        inner.insert(fields::NETWORK.into(), Value::String(b.network.as_str().into()));
        inner.insert(fields::AUD.into(), Value::String(b.aud.clone()));
        inner.insert(fields::SUB.into(), Value::String(b.sub.clone()));
        inner.insert(fields::PK.into(), Value::String(b.pk.clone()));
        inner.insert(fields::NONCE.into(), Value::String(b.nonce.encode()));
        inner.insert(fields::IAT.into(), Value::String(format_timestamp(&b.iat)));
        inner.insert(fields::EXP.into(), Value::String(format_timestamp(&b.exp)));
        inner.insert(fields::PAYLOAD.into(), b.payload.clone());

        let mut outer = Map::new();
        outer.insert(ENVELOPE_KEY.into(), Value::Object(inner));
        Value::Object(outer)
    }

    /// Canonical bytes of the full wrapper; what the signer signs.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        super::canonical::canonicalize(&self.to_value())
    }
}

/// Assembles envelopes from caller parameters plus a fresh nonce and clock.
#[derive(Clone, Debug)]
pub struct EnvelopeBuilder {
    network: Network,
    audience: String,
    subject: String,
    public_key: String,
    payload: Value,
    ttl: Duration,
    nonce_len: usize,
}

impl EnvelopeBuilder {
    /// Start an envelope. `public_key` is the self-describing key string.
    pub fn new(
        network: Network,
        audience: impl Into<String>,
        subject: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            network,
            audience: audience.into(),
            subject: subject.into(),
            public_key: public_key.into(),
            payload: Value::Null,
            ttl: DEFAULT_TTL,
            nonce_len: MIN_NONCE_LEN,
        }
    }

    #[must_use]
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn nonce_len(mut self, len: usize) -> Self {
        self.nonce_len = len;
        self
    }

    /// Build with a freshly drawn nonce, issued at `now`.
    pub fn build(self, now: DateTime<Utc>) -> Result<Envelope, SignError> {
        // Validate cheap parameters before consuming entropy
        PublicKey::algorithm_of(&self.public_key)
            .map_err(|_| SignError::UnsupportedAlgorithm(self.public_key_prefix()))?;
        let nonce = Nonce::generate(self.nonce_len)?;
        self.build_with_nonce(now, nonce)
    }

    /// Build with a caller-supplied nonce. Deterministic; meant for fixtures
    /// and reproducibility checks, never for production signing.
    pub fn build_with_nonce(self, now: DateTime<Utc>, nonce: Nonce) -> Result<Envelope, SignError> {
        let alg = PublicKey::algorithm_of(&self.public_key)
            .map_err(|_| SignError::UnsupportedAlgorithm(self.public_key_prefix()))?;

        if self.ttl.is_zero() {
            return Err(SignError::InvalidTtl(self.ttl));
        }
        let ttl = chrono::Duration::from_std(self.ttl).map_err(|_| SignError::InvalidTtl(self.ttl))?;

        // Wire timestamps carry milliseconds; keep the in-memory value identical
        let iat = now.trunc_subsecs(3);
        let exp = iat
            .checked_add_signed(ttl)
            .ok_or(SignError::InvalidTtl(self.ttl))?;

        Ok(Envelope::from_body(EnvelopeBody {
            domain: DOMAIN_TAG.to_string(),
            alg,
            network: self.network,
            aud: self.audience,
            sub: self.subject,
            pk: self.public_key,
            nonce,
            iat,
            exp,
            payload: self.payload,
        }))
    }

    fn public_key_prefix(&self) -> String {
        self.public_key
            .split_once(':')
            .map(|(prefix, _)| prefix)
            .unwrap_or(&self.public_key)
            .to_string()
    }
}

//! # Envelope Verification
//!
//! Ordered checks, short-circuiting on the first failure. Everything cheap
//! runs before any curve arithmetic, so malformed input never reaches the
//! expensive path:
//!
//! 1. Structure: one top-level key, and it is `offline_signature`
//! 2. Domain tag equals [`DOMAIN_TAG`]
//! 3. Required fields present (`alg`, `aud`, `pk`, `nonce`, `exp`, `sub`), nonce well-formed
//! 4. Not expired (with policy skew); expected audience / network if configured
//! 5. `pk` decodes with the exact length for its curve
//! 6. Declared `alg` matches the key; transport `publicKey` matches `pk`
//! 7. Signature is 64 bytes and verifies over the canonical received message

use super::canonical::canonicalize;
use super::envelope::{fields, parse_timestamp, Network, Nonce, DOMAIN_TAG, ENVELOPE_KEY};
use super::errors::VerifyError;
use super::keys::{decode_signature, Algorithm, PublicKey};
use super::message::{EnvelopeClaims, SignedMessage, VerifiedMessage};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

/// Relying-party expectations applied during verification.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifyPolicy {
    /// Tolerance added to `exp`. Zero means strict expiry.
    pub clock_skew: chrono::Duration,
    /// If set, `aud` must equal this.
    pub expected_audience: Option<String>,
    /// If set, `network` must equal this.
    pub expected_network: Option<Network>,
}

impl Default for VerifyPolicy {
    fn default() -> Self {
        Self {
            clock_skew: chrono::Duration::zero(),
            expected_audience: None,
            expected_network: None,
        }
    }
}

impl VerifyPolicy {
    #[must_use]
    pub fn with_clock_skew(mut self, skew: chrono::Duration) -> Self {
        self.clock_skew = skew;
        self
    }

    #[must_use]
    pub fn expect_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }

    #[must_use]
    pub fn expect_network(mut self, network: Network) -> Self {
        self.expected_network = Some(network);
        self
    }
}

/// Verify an envelope-scheme message at time `now`.
pub fn verify_envelope(
    message: &SignedMessage,
    policy: &VerifyPolicy,
    now: DateTime<Utc>,
) -> Result<VerifiedMessage, VerifyError> {
    let result = check_envelope(message, policy, now);
    match &result {
        Ok(verified) => debug!(
            public_key = %verified.public_key,
            "[offline-sig] envelope verified"
        ),
        Err(error) => debug!(%error, "[offline-sig] envelope rejected"),
    }
    result
}

fn check_envelope(
    message: &SignedMessage,
    policy: &VerifyPolicy,
    now: DateTime<Utc>,
) -> Result<VerifiedMessage, VerifyError> {
    // 1. Structure
    let body = envelope_body(&message.message)?;

    // 2. Domain
    let domain = body.get(fields::DOMAIN).and_then(Value::as_str);
    if domain != Some(DOMAIN_TAG) {
        return Err(VerifyError::DomainMismatch {
            expected: DOMAIN_TAG,
            actual: domain.map(str::to_string),
        });
    }

    // 3. Required fields
    let alg = required_str(body, fields::ALG)?;
    let aud = required_str(body, fields::AUD)?;
    let pk = required_str(body, fields::PK)?;
    let nonce = required_str(body, fields::NONCE)?;
    let exp = required_str(body, fields::EXP)?;
    let sub = required_str(body, fields::SUB)?;

    let nonce = Nonce::parse(nonce).map_err(VerifyError::InvalidNonce)?;
    let network = optional_str(body, fields::NETWORK)?
        .map(|n| n.parse::<Network>().map_err(VerifyError::MalformedEnvelope))
        .transpose()?;
    let issued_at = optional_str(body, fields::IAT)?
        .map(|ts| timestamp(fields::IAT, ts))
        .transpose()?;

    // 4. Expiry and relying-party expectations
    let expires_at = timestamp(fields::EXP, exp)?;
    let deadline = expires_at
        .checked_add_signed(policy.clock_skew)
        .unwrap_or(expires_at);
    if now > deadline {
        return Err(VerifyError::Expired { expires_at, now });
    }

    if let Some(expected) = &policy.expected_audience {
        if expected != aud {
            return Err(VerifyError::AudienceMismatch {
                expected: expected.clone(),
                actual: aud.to_string(),
            });
        }
    }

    if let Some(expected) = policy.expected_network {
        if network != Some(expected) {
            return Err(VerifyError::NetworkMismatch {
                expected: expected.to_string(),
                actual: network.map(|n| n.to_string()),
            });
        }
    }

    // 5. Key encoding
    let public_key = PublicKey::parse(pk)?;

    // 6. Algorithm consistency
    if Algorithm::from_wire_name(alg) != Some(public_key.algorithm()) {
        return Err(VerifyError::AlgorithmMismatch {
            declared: alg.to_string(),
            implied: public_key.algorithm(),
        });
    }
    if message.public_key != pk {
        return Err(VerifyError::PublicKeyMismatch);
    }

    // 7. Cryptographic verification over the received bytes
    verify_signature(&public_key, &message.message, &message.signature)?;

    Ok(VerifiedMessage {
        public_key,
        payload: body.get(fields::PAYLOAD).cloned().unwrap_or(Value::Null),
        claims: Some(EnvelopeClaims {
            network,
            audience: aud.to_string(),
            subject: sub.to_string(),
            nonce,
            issued_at,
            expires_at,
        }),
    })
}

/// Check a 64-byte base58 signature over the canonical bytes of `signed`.
pub fn verify_signature(
    public_key: &PublicKey,
    signed: &Value,
    signature: &str,
) -> Result<(), VerifyError> {
    let signature = decode_signature(signature).ok_or(VerifyError::BadSignature)?;

    public_key
        .verify(&canonicalize(signed), &signature)
        .map_err(|reason| {
            debug!(%reason, "[offline-sig] signature check failed");
            VerifyError::BadSignature
        })
}

fn envelope_body(message: &Value) -> Result<&Map<String, Value>, VerifyError> {
    let outer = message
        .as_object()
        .ok_or_else(|| VerifyError::MalformedEnvelope("message is not an object".into()))?;

    if outer.len() != 1 {
        return Err(VerifyError::MalformedEnvelope(format!(
            "expected exactly one top-level key, found {}",
            outer.len()
        )));
    }

    outer
        .get(ENVELOPE_KEY)
        .ok_or_else(|| {
            VerifyError::MalformedEnvelope(format!("top-level key must be `{ENVELOPE_KEY}`"))
        })?
        .as_object()
        .ok_or_else(|| VerifyError::MalformedEnvelope(format!("`{ENVELOPE_KEY}` is not an object")))
}

fn required_str<'a>(body: &'a Map<String, Value>, name: &'static str) -> Result<&'a str, VerifyError> {
    optional_str(body, name)?.ok_or(VerifyError::MissingField(name))
}

fn optional_str<'a>(
    body: &'a Map<String, Value>,
    name: &'static str,
) -> Result<Option<&'a str>, VerifyError> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(VerifyError::MalformedEnvelope(format!(
            "field `{name}` must be a string"
        ))),
    }
}

fn timestamp(name: &'static str, value: &str) -> Result<DateTime<Utc>, VerifyError> {
    parse_timestamp(value).map_err(|e| {
        VerifyError::MalformedEnvelope(format!("field `{name}` is not an RFC 3339 timestamp: {e}"))
    })
}

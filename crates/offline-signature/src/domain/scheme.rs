//! # Signature Schemes
//!
//! Two strategies behind one seam:
//!
//! - [`EnvelopeScheme`]: payload wrapped in the `FN-OS1` envelope with
//!   domain, audience, network, expiry and nonce bindings. The default.
//! - [`SimpleScheme`]: signs the canonical payload alone. No replay,
//!   audience or expiry protection; only for callers that supply their own.

use super::envelope::{Envelope, EnvelopeBuilder, Network, DEFAULT_TTL, MIN_NONCE_LEN};
use super::errors::{SignError, VerifyError};
use super::keys::PublicKey;
use super::message::{SignedMessage, VerifiedMessage};
use super::signer::{sign_envelope, sign_value};
use super::verifier::{verify_envelope, verify_signature, VerifyPolicy};
use crate::ports::outbound::MessageSigner;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Caller parameters for one signing operation.
#[derive(Clone, Debug, PartialEq)]
pub struct SignRequest {
    pub network: Network,
    pub audience: String,
    pub subject: String,
    pub payload: Value,
    /// Falls back to the scheme's default when `None`.
    pub ttl: Option<Duration>,
}

impl SignRequest {
    pub fn new(
        network: Network,
        audience: impl Into<String>,
        subject: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            network,
            audience: audience.into(),
            subject: subject.into(),
            payload,
            ttl: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// A way of turning a request into a signed message, and of checking one.
pub trait SignatureScheme: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn sign(
        &self,
        request: &SignRequest,
        signer: &dyn MessageSigner,
        now: DateTime<Utc>,
    ) -> Result<SignedMessage, SignError>;

    fn verify(
        &self,
        message: &SignedMessage,
        policy: &VerifyPolicy,
        now: DateTime<Utc>,
    ) -> Result<VerifiedMessage, VerifyError>;
}

/// The `FN-OS1` envelope scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvelopeScheme {
    pub default_ttl: Duration,
    /// Requested TTLs above this are refused.
    pub max_ttl: Duration,
    pub nonce_len: usize,
}

impl Default for EnvelopeScheme {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            max_ttl: Duration::from_secs(60 * 60),
            nonce_len: MIN_NONCE_LEN,
        }
    }
}

impl EnvelopeScheme {
    /// Assemble the unsigned envelope for `request`, bound to `public_key`.
    pub fn build(
        &self,
        request: &SignRequest,
        public_key: &PublicKey,
        now: DateTime<Utc>,
    ) -> Result<Envelope, SignError> {
        let ttl = request.ttl.unwrap_or(self.default_ttl);
        if ttl > self.max_ttl {
            return Err(SignError::InvalidTtl(ttl));
        }

        EnvelopeBuilder::new(
            request.network,
            request.audience.clone(),
            request.subject.clone(),
            public_key.encode(),
        )
        .payload(request.payload.clone())
        .ttl(ttl)
        .nonce_len(self.nonce_len)
        .build(now)
    }
}

impl SignatureScheme for EnvelopeScheme {
    fn name(&self) -> &'static str {
        "envelope"
    }

    fn sign(
        &self,
        request: &SignRequest,
        signer: &dyn MessageSigner,
        now: DateTime<Utc>,
    ) -> Result<SignedMessage, SignError> {
        let envelope = self.build(request, &signer.public_key(), now)?;
        sign_envelope(&envelope, signer)
    }

    fn verify(
        &self,
        message: &SignedMessage,
        policy: &VerifyPolicy,
        now: DateTime<Utc>,
    ) -> Result<VerifiedMessage, VerifyError> {
        verify_envelope(message, policy, now)
    }
}

/// Payload-only signing. Audience, network, expiry and nonce are not bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimpleScheme;

impl SignatureScheme for SimpleScheme {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn sign(
        &self,
        request: &SignRequest,
        signer: &dyn MessageSigner,
        _now: DateTime<Utc>,
    ) -> Result<SignedMessage, SignError> {
        sign_value(&request.payload, signer)
    }

    /// Only the key and signature are checked; the policy is ignored.
    fn verify(
        &self,
        message: &SignedMessage,
        _policy: &VerifyPolicy,
        _now: DateTime<Utc>,
    ) -> Result<VerifiedMessage, VerifyError> {
        let public_key = PublicKey::parse(&message.public_key)?;
        verify_signature(&public_key, &message.message, &message.signature).inspect_err(|e| {
            debug!(error = %e, "[offline-sig] simple message rejected");
        })?;

        Ok(VerifiedMessage {
            public_key,
            payload: message.message.clone(),
            claims: None,
        })
    }
}

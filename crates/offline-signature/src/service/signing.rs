//! # Offline Signature Service
//!
//! Application service implementing [`OfflineSignatureApi`]. Holds the
//! configuration and a clock; all protocol logic lives in the domain layer.

use super::chain::{ChainIdentityChecker, ChainVerdict};
use crate::config::{ConfigError, OfflineSignatureConfig};
use crate::domain::envelope::Envelope;
use crate::domain::errors::{ChainVerifyError, SignError, VerifyError};
use crate::domain::message::{SignedMessage, VerifiedMessage};
use crate::domain::scheme::{EnvelopeScheme, SignRequest, SignatureScheme, SimpleScheme};
use crate::domain::signer;
use crate::domain::verifier::VerifyPolicy;
use crate::ports::inbound::OfflineSignatureApi;
use crate::ports::outbound::{AccessKeyDirectory, MessageSigner, SystemTimeSource, TimeSource};
use serde_json::Value;
use tracing::{debug, info};

pub struct OfflineSignatureService<T: TimeSource = SystemTimeSource> {
    config: OfflineSignatureConfig,
    scheme: EnvelopeScheme,
    policy: VerifyPolicy,
    clock: T,
}

impl OfflineSignatureService<SystemTimeSource> {
    /// Service on the system clock.
    pub fn new(config: OfflineSignatureConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl<T: TimeSource> OfflineSignatureService<T> {
    /// Service on a caller-supplied clock. The config is validated here so
    /// later calls cannot hit an out-of-range TTL or nonce length.
    pub fn with_time_source(config: OfflineSignatureConfig, clock: T) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            default_ttl = ?config.default_ttl,
            max_ttl = ?config.max_ttl,
            clock_skew = ?config.clock_skew,
            nonce_len = config.nonce_len,
            "[offline-sig] service configured"
        );
        Ok(Self {
            scheme: config.envelope_scheme(),
            policy: config.verify_policy(),
            config,
            clock,
        })
    }

    pub fn config(&self) -> &OfflineSignatureConfig {
        &self.config
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Policy derived from the configured skew and expectations.
    pub fn verify_policy(&self) -> &VerifyPolicy {
        &self.policy
    }

    /// Verify, then check the signer's key against the ledger.
    pub async fn verify_on_chain<D: AccessKeyDirectory>(
        &self,
        checker: &ChainIdentityChecker<D>,
        message: &SignedMessage,
    ) -> Result<ChainVerdict, ChainVerifyError> {
        checker
            .verify_and_check(&self.scheme, message, &self.policy, self.clock.now())
            .await
    }
}

impl<T: TimeSource> OfflineSignatureApi for OfflineSignatureService<T> {
    fn build_envelope(
        &self,
        request: &SignRequest,
        signer: &dyn MessageSigner,
    ) -> Result<Envelope, SignError> {
        self.scheme
            .build(request, &signer.public_key(), self.clock.now())
    }

    fn sign(
        &self,
        request: &SignRequest,
        signer: &dyn MessageSigner,
    ) -> Result<SignedMessage, SignError> {
        let signed = self.scheme.sign(request, signer, self.clock.now())?;
        debug!(
            scheme = self.scheme.name(),
            audience = %request.audience,
            subject = %request.subject,
            "[offline-sig] message signed"
        );
        Ok(signed)
    }

    fn sign_envelope(
        &self,
        envelope: &Envelope,
        signer: &dyn MessageSigner,
    ) -> Result<SignedMessage, SignError> {
        signer::sign_envelope(envelope, signer)
    }

    fn sign_simple(
        &self,
        payload: &Value,
        signer: &dyn MessageSigner,
    ) -> Result<SignedMessage, SignError> {
        signer::sign_value(payload, signer)
    }

    fn verify(&self, message: &SignedMessage) -> Result<VerifiedMessage, VerifyError> {
        self.verify_with_policy(message, &self.policy)
    }

    fn verify_with_policy(
        &self,
        message: &SignedMessage,
        policy: &VerifyPolicy,
    ) -> Result<VerifiedMessage, VerifyError> {
        self.scheme.verify(message, policy, self.clock.now())
    }

    fn verify_simple(&self, message: &SignedMessage) -> Result<VerifiedMessage, VerifyError> {
        SimpleScheme.verify(message, &self.policy, self.clock.now())
    }
}

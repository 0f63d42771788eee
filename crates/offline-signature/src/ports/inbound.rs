//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the offline signature subsystem. Wallets call the
//! signing half, relying parties the verifying half.

use crate::domain::envelope::Envelope;
use crate::domain::errors::{SignError, VerifyError};
use crate::domain::message::{SignedMessage, VerifiedMessage};
use crate::domain::scheme::SignRequest;
use crate::domain::verifier::VerifyPolicy;
use crate::ports::outbound::MessageSigner;
use serde_json::Value;

/// Primary offline signature API.
///
/// Implementations must be thread-safe (`Send + Sync`). Every call reads the
/// clock once; expiry decisions within a call use that single reading.
pub trait OfflineSignatureApi: Send + Sync {
    // =========================================================================
    // Signing
    // =========================================================================

    /// Build an unsigned envelope for `request`, bound to the signer's key.
    fn build_envelope(
        &self,
        request: &SignRequest,
        signer: &dyn MessageSigner,
    ) -> Result<Envelope, SignError>;

    /// Build and sign an envelope in one step.
    fn sign(
        &self,
        request: &SignRequest,
        signer: &dyn MessageSigner,
    ) -> Result<SignedMessage, SignError>;

    /// Sign an envelope built earlier (e.g. shown to the user first).
    fn sign_envelope(
        &self,
        envelope: &Envelope,
        signer: &dyn MessageSigner,
    ) -> Result<SignedMessage, SignError>;

    /// Sign a bare payload with no envelope bindings.
    fn sign_simple(
        &self,
        payload: &Value,
        signer: &dyn MessageSigner,
    ) -> Result<SignedMessage, SignError>;

    // =========================================================================
    // Verification
    // =========================================================================

    /// Verify an envelope-scheme message under the configured policy.
    ///
    /// # Security
    /// - Rejects expired, cross-domain and cross-audience messages
    /// - Rejects high-S secp256k1 signatures
    fn verify(&self, message: &SignedMessage) -> Result<VerifiedMessage, VerifyError>;

    /// Verify an envelope-scheme message under an explicit policy.
    fn verify_with_policy(
        &self,
        message: &SignedMessage,
        policy: &VerifyPolicy,
    ) -> Result<VerifiedMessage, VerifyError>;

    /// Verify a simple-scheme message. Only the signature is checked.
    fn verify_simple(&self, message: &SignedMessage) -> Result<VerifiedMessage, VerifyError>;
}

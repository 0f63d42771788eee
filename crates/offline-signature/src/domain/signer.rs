//! # Envelope Signing
//!
//! Canonicalize, branch on the declared algorithm, encode. Either a complete
//! [`SignedMessage`] comes back or nothing does.

use super::canonical::canonicalize;
use super::envelope::Envelope;
use super::errors::SignError;
use super::keys::{encode_signature, Algorithm, SignatureBytes};
use super::message::SignedMessage;
use crate::ports::outbound::MessageSigner;
use serde_json::Value;
use shared_crypto::sha256;

/// Sign canonical bytes under `algorithm`.
///
/// - Ed25519: the bytes are signed directly.
/// - secp256k1: their SHA-256 digest is signed (compact `r || s`, low-S).
pub fn sign_canonical(
    algorithm: Algorithm,
    canonical: &[u8],
    signer: &dyn MessageSigner,
) -> Result<SignatureBytes, SignError> {
    if signer.public_key().algorithm() != algorithm {
        return Err(SignError::KeyMismatch);
    }

    match algorithm {
        Algorithm::Ed25519 => signer.sign_bytes(canonical),
        Algorithm::Secp256k1Ecdsa => signer.sign_bytes(&sha256(canonical)),
    }
}

/// Sign a full envelope. The signer must hold the envelope's `pk`.
pub fn sign_envelope(
    envelope: &Envelope,
    signer: &dyn MessageSigner,
) -> Result<SignedMessage, SignError> {
    let public_key = signer.public_key().encode();
    if public_key != envelope.body().pk {
        return Err(SignError::KeyMismatch);
    }

    let message = envelope.to_value();
    let signature = sign_canonical(envelope.body().alg, &canonicalize(&message), signer)?;

    Ok(SignedMessage {
        message,
        signature: encode_signature(&signature),
        public_key,
    })
}

/// Sign a bare value (no envelope) over its canonical bytes.
pub fn sign_value(value: &Value, signer: &dyn MessageSigner) -> Result<SignedMessage, SignError> {
    let public_key = signer.public_key();
    let signature = sign_canonical(public_key.algorithm(), &canonicalize(value), signer)?;

    Ok(SignedMessage {
        message: value.clone(),
        signature: encode_signature(&signature),
        public_key: public_key.encode(),
    })
}

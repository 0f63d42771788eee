//! Shared fixtures.

use chrono::{DateTime, TimeZone, Utc};
use offline_signature::{
    sign_envelope, Algorithm, EnvelopeBuilder, KeyPair, Network, Nonce, SignedMessage,
    ENVELOPE_KEY,
};
use serde_json::{json, Map, Value};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test subscriber once. Honors `RUST_LOG`; silent otherwise.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub const AUDIENCE: &str = "https://app.example";
pub const SUBJECT: &str = "alice.testnet";

/// 2026-10-18T12:00:00Z
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

pub fn payload() -> Value {
    json!({ "action": "test" })
}

pub fn builder(key: &KeyPair) -> EnvelopeBuilder {
    EnvelopeBuilder::new(Network::Testnet, AUDIENCE, SUBJECT, key.public_key().encode())
        .payload(payload())
}

/// Envelope with a fixed nonce, issued at [`t0`], signed by `key`.
pub fn signed_fixed(key: &KeyPair) -> SignedMessage {
    let nonce = Nonce::from_bytes(vec![9u8; 16]).unwrap();
    let envelope = builder(key).build_with_nonce(t0(), nonce).unwrap();
    sign_envelope(&envelope, key).unwrap()
}

pub fn both_algorithms() -> [Algorithm; 2] {
    [Algorithm::Ed25519, Algorithm::Secp256k1Ecdsa]
}

/// Mutable view of the envelope body.
pub fn body_mut(message: &mut SignedMessage) -> &mut Map<String, Value> {
    message.message[ENVELOPE_KEY]
        .as_object_mut()
        .expect("envelope body")
}

/// Replace the last character of `s` with a different one from `alphabet`.
pub fn flip_last_char(s: &str, alphabet: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    let last = chars.pop().expect("non-empty");
    let replacement = alphabet
        .chars()
        .find(|&c| c != last)
        .expect("alphabet has two characters");
    chars.push(replacement);
    chars.into_iter().collect()
}

//! Fuzz target for envelope verification.
//!
//! Feeds arbitrary JSON, signatures and transport keys through the verifier.
//!
//! ## Running
//!
//! ```bash
//! cd crates/offline-signature
//! cargo +nightly fuzz run fuzz_verify_envelope
//! ```

#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use offline_signature::{verify_envelope, SignedMessage, VerifyPolicy};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    message: String,
    signature: String,
    public_key: String,
    now_secs: u32,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(message) = serde_json::from_str(&input.message) else {
        return;
    };
    let signed = SignedMessage {
        message,
        signature: input.signature,
        public_key: input.public_key,
    };
    let Some(now) = Utc.timestamp_opt(i64::from(input.now_secs), 0).single() else {
        return;
    };

    // Must never panic, and must be deterministic
    let first = verify_envelope(&signed, &VerifyPolicy::default(), now);
    let second = verify_envelope(&signed, &VerifyPolicy::default(), now);
    assert_eq!(first, second);

    // Anything that verifies was signed by the transport key
    if let Ok(verified) = first {
        assert_eq!(verified.public_key.encode(), signed.public_key);
    }
});

//! Fuzz target for canonical JSON encoding.
//!
//! ## Running
//!
//! ```bash
//! cd crates/offline-signature
//! cargo +nightly fuzz run fuzz_canonicalize
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use offline_signature::canonicalize;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let canonical = canonicalize(&value);

    // Output is valid JSON describing the same value
    let reparsed: Value = serde_json::from_slice(&canonical).expect("canonical output must parse");
    assert_eq!(canonicalize(&reparsed), canonical);
});

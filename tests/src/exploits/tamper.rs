//! # Tampering
//!
//! Attacker edits a captured envelope without the signer's key. Any change
//! to a signed field must surface as `BadSignature`.

#[cfg(test)]
mod tests {
    use crate::common::*;
    use offline_signature::{verify_envelope, KeyPair, VerifyError, VerifyPolicy};
    use serde_json::json;

    const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

    fn assert_bad_signature(message: &offline_signature::SignedMessage) {
        assert_eq!(
            verify_envelope(message, &VerifyPolicy::default(), t0()),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn test_untampered_baseline_verifies() {
        init_tracing();
        for alg in both_algorithms() {
            let key = KeyPair::generate(alg);
            assert!(verify_envelope(&signed_fixed(&key), &VerifyPolicy::default(), t0()).is_ok());
        }
    }

    #[test]
    fn test_payload_byte_flip() {
        for alg in both_algorithms() {
            let mut message = signed_fixed(&KeyPair::generate(alg));
            body_mut(&mut message).insert("payload".into(), json!({ "action": "tesu" }));
            assert_bad_signature(&message);
        }
    }

    #[test]
    fn test_payload_field_added() {
        let mut message = signed_fixed(&KeyPair::generate(both_algorithms()[0]));
        body_mut(&mut message).insert("payload".into(), json!({ "action": "test", "amount": 1 }));
        assert_bad_signature(&message);
    }

    #[test]
    fn test_nonce_char_flip() {
        for alg in both_algorithms() {
            let mut message = signed_fixed(&KeyPair::generate(alg));
            let body = body_mut(&mut message);
            let nonce = body["nonce"].as_str().unwrap().to_string();
            // Skip '1' so the decoded length stays the same
            let flipped = flip_last_char(&nonce, &BASE58_ALPHABET[1..]);
            body.insert("nonce".into(), json!(flipped));
            assert_bad_signature(&message);
        }
    }

    #[test]
    fn test_subject_flip() {
        for alg in both_algorithms() {
            let mut message = signed_fixed(&KeyPair::generate(alg));
            body_mut(&mut message).insert("sub".into(), json!(flip_last_char(SUBJECT, "xyz")));
            assert_bad_signature(&message);
        }
    }

    #[test]
    fn test_audience_flip() {
        for alg in both_algorithms() {
            let mut message = signed_fixed(&KeyPair::generate(alg));
            body_mut(&mut message).insert("aud".into(), json!(flip_last_char(AUDIENCE, "xyz")));
            assert_bad_signature(&message);
        }
    }

    #[test]
    fn test_expiry_extended() {
        for alg in both_algorithms() {
            let mut message = signed_fixed(&KeyPair::generate(alg));
            body_mut(&mut message).insert("exp".into(), json!("2026-10-18T13:00:00.000Z"));
            assert_bad_signature(&message);
        }
    }

    #[test]
    fn test_network_switched() {
        let mut message = signed_fixed(&KeyPair::generate(both_algorithms()[1]));
        body_mut(&mut message).insert("network".into(), json!("mainnet"));
        assert_bad_signature(&message);
    }

    #[test]
    fn test_signature_bit_flip() {
        for alg in both_algorithms() {
            let mut message = signed_fixed(&KeyPair::generate(alg));
            let mut raw = bs58::decode(&message.signature).into_vec().unwrap();
            raw[10] ^= 0x01;
            message.signature = bs58::encode(raw).into_string();
            assert_bad_signature(&message);
        }
    }

    #[test]
    fn test_substituted_key_and_signature() {
        // Attacker re-signs with their own key but keeps the victim's `pk`
        let victim = KeyPair::generate(both_algorithms()[0]);
        let attacker = KeyPair::generate(both_algorithms()[0]);

        let mut message = signed_fixed(&victim);
        message.signature = signed_fixed(&attacker).signature;
        assert_bad_signature(&message);
    }

    proptest::proptest! {
        #[test]
        fn prop_any_payload_substitution_rejected(action in "[a-z]{1,12}") {
            proptest::prop_assume!(action != "test");
            let mut message = signed_fixed(&KeyPair::generate(both_algorithms()[0]));
            body_mut(&mut message).insert("payload".into(), json!({ "action": action }));
            proptest::prop_assert_eq!(
                verify_envelope(&message, &VerifyPolicy::default(), t0()),
                Err(VerifyError::BadSignature)
            );
        }
    }
}

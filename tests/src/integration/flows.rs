//! # Integration Test Flows
//!
//! Wallet builds and signs, relying party verifies, optionally against the
//! ledger:
//!
//! 1. **Ed25519**: build → sign → verify; canonical bytes reproducible
//! 2. **secp256k1**: hash-then-sign; 64-byte compact low-S signature
//! 3. **Freshness**: identical inputs at different times differ in nonce and signature
//! 4. **Chain identity**: valid signature plus access-key lookup

#[cfg(test)]
mod tests {
    use crate::common::*;
    use offline_signature::{
        decode_signature, verify_envelope, AccessKeyPermission, Algorithm, ChainIdentityChecker,
        FixedTimeSource, InMemoryAccessKeyDirectory, KeyPair, Network, Nonce,
        OfflineSignatureApi, OfflineSignatureConfig, OfflineSignatureService, SignRequest,
        SignedMessage, VerifyPolicy,
    };
    use shared_crypto::Secp256k1Signature;
    use std::time::Duration;

    fn service() -> OfflineSignatureService<FixedTimeSource> {
        init_tracing();
        OfflineSignatureService::with_time_source(
            OfflineSignatureConfig::default(),
            FixedTimeSource::new(t0()),
        )
        .unwrap()
    }

    fn request() -> SignRequest {
        SignRequest::new(Network::Testnet, AUDIENCE, SUBJECT, payload())
            .with_ttl(Duration::from_secs(300))
    }

    // =========================================================================
    // SCENARIO 1: ED25519
    // =========================================================================

    #[test]
    fn test_scenario_ed25519_sign_verify() {
        let service = service();
        let key = KeyPair::generate(Algorithm::Ed25519);

        let signed = service.sign(&request(), &key).unwrap();
        let verified = service.verify(&signed).unwrap();

        assert_eq!(verified.payload, payload());
        assert_eq!(verified.public_key, key.public_key());
        let claims = verified.claims.unwrap();
        assert_eq!(claims.audience, AUDIENCE);
        assert_eq!(claims.subject, SUBJECT);
        assert_eq!(claims.network, Some(Network::Testnet));
        assert_eq!(claims.expires_at, t0() + chrono::Duration::seconds(300));
    }

    #[test]
    fn test_scenario_ed25519_canonical_reproducible() {
        let key = KeyPair::generate(Algorithm::Ed25519);
        let nonce = Nonce::from_bytes(vec![0x42; 24]).unwrap();

        let a = builder(&key).build_with_nonce(t0(), nonce.clone()).unwrap();
        let b = builder(&key).build_with_nonce(t0(), nonce).unwrap();

        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        // Ed25519 signatures are deterministic too
        assert_eq!(signed_fixed(&key), signed_fixed(&key));
    }

    // =========================================================================
    // SCENARIO 2: SECP256K1
    // =========================================================================

    #[test]
    fn test_scenario_secp256k1_sign_verify() {
        let service = service();
        let key = KeyPair::generate(Algorithm::Secp256k1Ecdsa);

        let signed = service.sign(&request(), &key).unwrap();
        let raw = bs58::decode(&signed.signature).into_vec().unwrap();
        assert_eq!(raw.len(), 64);

        let signature = decode_signature(&signed.signature).unwrap();
        assert!(Secp256k1Signature::from_bytes(signature).is_low_s());

        let verified = service.verify(&signed).unwrap();
        assert_eq!(verified.payload, payload());
        assert_eq!(verified.public_key.algorithm(), Algorithm::Secp256k1Ecdsa);
    }

    #[test]
    fn test_scenario_secp256k1_key_is_64_byte_xy() {
        let key = KeyPair::generate(Algorithm::Secp256k1Ecdsa);
        let encoded = key.public_key().encode();
        let (prefix, body) = encoded.split_once(':').unwrap();

        assert_eq!(prefix, "secp256k1");
        assert_eq!(bs58::decode(body).into_vec().unwrap().len(), 64);
    }

    // =========================================================================
    // SCENARIO 3: FRESHNESS
    // =========================================================================

    #[test]
    fn test_scenario_fresh_nonce_and_signature() {
        let service = service();
        for alg in both_algorithms() {
            let key = KeyPair::generate(alg);

            let first = service.sign(&request(), &key).unwrap();
            service.clock().advance(chrono::Duration::seconds(1));
            let second = service.sign(&request(), &key).unwrap();

            let nonce = |m: &SignedMessage| m.message["offline_signature"]["nonce"].clone();
            assert_ne!(nonce(&first), nonce(&second));
            assert_ne!(first.signature, second.signature);

            assert!(service.verify(&first).is_ok());
            assert!(service.verify(&second).is_ok());
        }
    }

    #[test]
    fn test_payload_roundtrip_for_assorted_values() {
        let service = service();
        let key = KeyPair::generate(Algorithm::Ed25519);
        let payloads = [
            serde_json::json!(null),
            serde_json::json!(42),
            serde_json::json!("plain string"),
            serde_json::json!([1, "two", { "three": 3.5 }]),
            serde_json::json!({ "nested": { "z": [], "a": {} }, "unicode": "héllo \u{1F600}" }),
        ];

        for payload in payloads {
            let request = SignRequest::new(Network::Mainnet, AUDIENCE, SUBJECT, payload.clone());
            let signed = service.sign(&request, &key).unwrap();
            assert_eq!(service.verify(&signed).unwrap().payload, payload);
        }
    }

    #[test]
    fn test_message_survives_json_transport() {
        let service = service();
        let key = KeyPair::generate(Algorithm::Secp256k1Ecdsa);
        let signed = service.sign(&request(), &key).unwrap();

        let wire = serde_json::to_vec(&signed).unwrap();
        let received: SignedMessage = serde_json::from_slice(&wire).unwrap();
        assert!(service.verify(&received).is_ok());
    }

    // =========================================================================
    // SCENARIO 4: CHAIN IDENTITY
    // =========================================================================

    #[tokio::test]
    async fn test_chain_identity_lifecycle() {
        let service = service();
        let key = KeyPair::generate(Algorithm::Ed25519);
        let checker = ChainIdentityChecker::from_config(
            InMemoryAccessKeyDirectory::new(),
            &service.config().chain,
        );
        let signed = service.sign(&request(), &key).unwrap();

        // Account missing
        let verdict = service.verify_on_chain(&checker, &signed).await.unwrap();
        assert!(!verdict.is_authorized());

        // Key added with a function-call scope
        checker.directory().add_key(
            SUBJECT,
            &key.public_key(),
            AccessKeyPermission::FunctionCall {
                receiver_id: "app.testnet".into(),
                method_names: vec![],
                allowance: None,
            },
        );
        let verdict = service.verify_on_chain(&checker, &signed).await.unwrap();
        assert!(verdict.is_authorized());

        // Key revoked: signature still valid, authority gone
        checker.directory().remove_key(SUBJECT, &key.public_key());
        assert!(service.verify(&signed).is_ok());
        let verdict = service.verify_on_chain(&checker, &signed).await.unwrap();
        assert!(!verdict.is_authorized());
    }

    #[tokio::test]
    async fn test_chain_lookup_uses_subject_not_caller_input() {
        let key = KeyPair::generate(Algorithm::Secp256k1Ecdsa);
        let checker = ChainIdentityChecker::new(InMemoryAccessKeyDirectory::new(), Duration::from_secs(1));
        checker
            .directory()
            .add_key("bob.testnet", &key.public_key(), AccessKeyPermission::FullAccess);

        // Signed for alice: bob's registration does not help
        let signed = signed_fixed(&key);
        let verified = verify_envelope(&signed, &VerifyPolicy::default(), t0()).unwrap();
        let verdict = checker.check_claims(verified).await.unwrap();
        assert!(!verdict.is_authorized());
    }
}

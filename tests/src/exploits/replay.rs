//! # Replay
//!
//! A captured message presented again: after expiry, to a different relying
//! party, or on a different network.

#[cfg(test)]
mod tests {
    use crate::common::*;
    use offline_signature::{
        verify_envelope, Algorithm, KeyPair, Network, OfflineSignatureApi,
        OfflineSignatureConfig, OfflineSignatureService, SignRequest, FixedTimeSource,
        VerifyError, VerifyPolicy,
    };
    use std::time::Duration;

    #[test]
    fn test_replay_after_expiry() {
        init_tracing();
        let key = KeyPair::generate(Algorithm::Ed25519);
        let message = signed_fixed(&key);
        let exp = t0() + chrono::Duration::seconds(300);

        // exp = now + 1s: fine
        assert!(verify_envelope(
            &message,
            &VerifyPolicy::default(),
            exp - chrono::Duration::seconds(1)
        )
        .is_ok());

        // exp = now - 1s: rejected
        assert!(matches!(
            verify_envelope(
                &message,
                &VerifyPolicy::default(),
                exp + chrono::Duration::seconds(1)
            ),
            Err(VerifyError::Expired { .. })
        ));
    }

    #[test]
    fn test_replay_far_future() {
        let key = KeyPair::generate(Algorithm::Secp256k1Ecdsa);
        let message = signed_fixed(&key);
        let later = t0() + chrono::Duration::days(365);

        let lenient = VerifyPolicy::default().with_clock_skew(chrono::Duration::minutes(2));
        assert!(matches!(
            verify_envelope(&message, &lenient, later),
            Err(VerifyError::Expired { .. })
        ));
    }

    #[test]
    fn test_replay_to_other_relying_party() {
        let key = KeyPair::generate(Algorithm::Ed25519);
        let message = signed_fixed(&key);

        let other_site = VerifyPolicy::default().expect_audience("https://bank.example");
        assert!(matches!(
            verify_envelope(&message, &other_site, t0()),
            Err(VerifyError::AudienceMismatch { .. })
        ));
    }

    #[test]
    fn test_replay_on_other_network() {
        let key = KeyPair::generate(Algorithm::Ed25519);
        let message = signed_fixed(&key);

        let mainnet = VerifyPolicy::default().expect_network(Network::Mainnet);
        assert!(matches!(
            verify_envelope(&message, &mainnet, t0()),
            Err(VerifyError::NetworkMismatch { .. })
        ));
    }

    #[test]
    fn test_short_ttl_through_service() {
        let service = OfflineSignatureService::with_time_source(
            OfflineSignatureConfig::default(),
            FixedTimeSource::new(t0()),
        )
        .unwrap();
        let key = KeyPair::generate(Algorithm::Secp256k1Ecdsa);
        let request = SignRequest::new(Network::Testnet, AUDIENCE, SUBJECT, payload())
            .with_ttl(Duration::from_secs(5));
        let message = service.sign(&request, &key).unwrap();

        service.clock().advance(chrono::Duration::seconds(6));
        assert!(matches!(
            service.verify(&message),
            Err(VerifyError::Expired { .. })
        ));
    }
}

//! # Signature Malleability
//!
//! For any valid ECDSA `(r, s)`, `(r, n - s)` also verifies under plain
//! ECDSA. Only the low-S form is accepted here, so a third party cannot mint
//! a second valid encoding of the same proof. Ed25519 is checked with strict
//! verification, which refuses non-canonical `S`.

#[cfg(test)]
mod tests {
    use crate::common::*;
    use offline_signature::{
        decode_signature, encode_signature, verify_envelope, Algorithm, KeyPair, VerifyError,
        VerifyPolicy,
    };
    use shared_crypto::Secp256k1Signature;

    /// Ed25519 group order L, little-endian.
    const ED25519_L: [u8; 32] = [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
        0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x10,
    ];

    #[test]
    fn test_high_s_twin_rejected() {
        init_tracing();
        let key = KeyPair::generate(Algorithm::Secp256k1Ecdsa);
        let mut message = signed_fixed(&key);

        let original = Secp256k1Signature::from_bytes(decode_signature(&message.signature).unwrap());
        assert!(original.is_low_s());

        let twin = original.malleate();
        assert!(!twin.is_low_s());
        assert_eq!(twin.components().0, original.components().0);

        message.signature = encode_signature(twin.as_bytes());
        assert_eq!(
            verify_envelope(&message, &VerifyPolicy::default(), t0()),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn test_zero_signature_rejected() {
        for alg in both_algorithms() {
            let mut message = signed_fixed(&KeyPair::generate(alg));
            message.signature = encode_signature(&[0u8; 64]);
            assert_eq!(
                verify_envelope(&message, &VerifyPolicy::default(), t0()),
                Err(VerifyError::BadSignature)
            );
        }
    }

    #[test]
    fn test_ed25519_s_plus_l_rejected() {
        let key = KeyPair::generate(Algorithm::Ed25519);
        let mut message = signed_fixed(&key);
        let mut raw = decode_signature(&message.signature).unwrap();

        // S' = S + L (little-endian add over the upper half)
        let mut carry = 0u16;
        for (byte, l) in raw[32..].iter_mut().zip(ED25519_L) {
            let sum = u16::from(*byte) + u16::from(l) + carry;
            *byte = sum as u8;
            carry = sum >> 8;
        }
        message.signature = encode_signature(&raw);

        assert_eq!(
            verify_envelope(&message, &VerifyPolicy::default(), t0()),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn test_overlong_signature_rejected() {
        let mut message = signed_fixed(&KeyPair::generate(Algorithm::Ed25519));
        let mut raw = bs58::decode(&message.signature).into_vec().unwrap();
        raw.push(0);
        message.signature = bs58::encode(raw).into_string();

        assert_eq!(
            verify_envelope(&message, &VerifyPolicy::default(), t0()),
            Err(VerifyError::BadSignature)
        );
    }
}

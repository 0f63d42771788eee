//! # ECDSA Signatures (secp256k1)
//!
//! ECDSA over secp256k1 with a caller-supplied 32-byte prehash.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization on signing, low-S enforcement on verification (BIP-62)
//! - Scalar range and low-S checks use constant-time comparisons
//!
//! ## Key Encoding
//!
//! Public keys are carried as the raw 64-byte `X || Y` coordinates. The SEC1
//! `0x04` tag is only re-attached internally when decoding the point.

use crate::hashing::Digest32;
use crate::CryptoError;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Raw `X || Y` public key length in bytes.
pub const SECP256K1_PUBLIC_KEY_LENGTH: usize = 64;

/// SEC1 tag for an uncompressed point.
const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// floor(n / 2). Low-S means `s <= SECP256K1_HALF_ORDER`.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Uncompressed secp256k1 public key without the SEC1 tag (`X || Y`, 64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey([u8; 64]);

impl Secp256k1PublicKey {
    /// Create from raw `X || Y` bytes, checking the point is on the curve.
    pub fn from_xy_bytes(bytes: [u8; 64]) -> Result<Self, CryptoError> {
        Self::decode_point(&bytes)?;
        Ok(Self(bytes))
    }

    /// Create from a slice, enforcing the exact 64-byte length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; 64] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: SECP256K1_PUBLIC_KEY_LENGTH,
            actual: bytes.len(),
        })?;
        Self::from_xy_bytes(array)
    }

    /// Get raw `X || Y` bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Verify a compact `r || s` signature over a 32-byte prehash.
    pub fn verify_prehash(
        &self,
        digest: &Digest32,
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        let (r, s) = signature.components();

        if !is_valid_scalar(&r) || !is_valid_scalar(&s) {
            return Err(CryptoError::InvalidSignature);
        }

        if !is_low_s(&s) {
            return Err(CryptoError::MalleableSignature);
        }

        let verifying_key = Self::decode_point(&self.0)?;
        let sig = Signature::from_slice(&signature.0).map_err(|_| CryptoError::InvalidSignature)?;

        verifying_key
            .verify_prehash(digest, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    fn decode_point(xy: &[u8; 64]) -> Result<VerifyingKey, CryptoError> {
        let mut sec1 = [0u8; 65];
        sec1[0] = SEC1_UNCOMPRESSED_TAG;
        sec1[1..].copy_from_slice(xy);
        VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| CryptoError::InvalidPublicKey)
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; 64]);

impl Secp256k1Signature {
    /// Create from bytes (64 bytes).
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Split into `(r, s)`.
    pub fn components(&self) -> ([u8; 32], [u8; 32]) {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&self.0[..32]);
        s.copy_from_slice(&self.0[32..]);
        (r, s)
    }

    /// Whether S is in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        let (_, s) = self.components();
        is_low_s(&s)
    }

    /// The malleated twin of this signature: `(r, n - s)`.
    ///
    /// Verifies against the same digest under plain ECDSA, which is exactly
    /// why verification here refuses the high-S form.
    pub fn malleate(&self) -> Self {
        let (r, s) = self.components();
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&r);
        bytes[32..].copy_from_slice(&invert_s(&s));
        Self(bytes)
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key as raw `X || Y`.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        let encoded = self.signing_key.verifying_key().to_encoded_point(false);
        // Uncompressed SEC1 is always 0x04 || X || Y (65 bytes)
        let mut xy = [0u8; 64];
        xy.copy_from_slice(&encoded.as_bytes()[1..]);
        Secp256k1PublicKey(xy)
    }

    /// Sign a 32-byte prehash (deterministic RFC 6979), normalized to low-S.
    pub fn sign_prehash(&self, digest: &Digest32) -> Result<Secp256k1Signature, CryptoError> {
        let sig = PrehashSigner::<Signature>::sign_prehash(&self.signing_key, digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let sig = sig.normalize_s().unwrap_or(sig);
        let bytes: [u8; 64] = sig.to_bytes().into();
        Ok(Secp256k1Signature(bytes))
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl Drop for Secp256k1KeyPair {
    fn drop(&mut self) {
        // Zeroize secret key material
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}

// =============================================================================
// SCALAR CHECKS
// =============================================================================

/// Constant-time big-endian comparison. Returns `(less, greater)`.
fn ct_compare(a: &[u8; 32], b: &[u8; 32]) -> (Choice, Choice) {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (less, greater)
}

/// Check `s <= floor(n/2)` (BIP-62 low-S), in constant time.
pub fn is_low_s(s: &[u8; 32]) -> bool {
    let (_, greater) = ct_compare(s, &SECP256K1_HALF_ORDER);
    (!greater).into()
}

/// Check a scalar lies in `[1, n-1]`, in constant time.
pub fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let (less, _) = ct_compare(scalar, &SECP256K1_ORDER);
    (!is_zero & less).into()
}

/// Compute `n - s`.
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

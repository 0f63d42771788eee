//! # Local Key Pairs
//!
//! In-process key holders implementing [`MessageSigner`]. Hardware wallets
//! and remote signers plug in through the same trait.

use crate::domain::errors::SignError;
use crate::domain::keys::{Algorithm, PublicKey, SignatureBytes};
use crate::ports::outbound::MessageSigner;
use shared_crypto::{Digest32, Ed25519KeyPair, Secp256k1KeyPair};

impl MessageSigner for Ed25519KeyPair {
    fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(Ed25519KeyPair::public_key(self))
    }

    fn sign_bytes(&self, bytes: &[u8]) -> Result<SignatureBytes, SignError> {
        Ok(*self.sign(bytes).as_bytes())
    }
}

impl MessageSigner for Secp256k1KeyPair {
    fn public_key(&self) -> PublicKey {
        PublicKey::Secp256k1(Secp256k1KeyPair::public_key(self))
    }

    /// `bytes` must be the 32-byte SHA-256 prehash.
    fn sign_bytes(&self, bytes: &[u8]) -> Result<SignatureBytes, SignError> {
        let digest: &Digest32 = bytes
            .try_into()
            .map_err(|_| SignError::Crypto(shared_crypto::CryptoError::InvalidKeyLength {
                expected: 32,
                actual: bytes.len(),
            }))?;
        Ok(*self.sign_prehash(digest)?.as_bytes())
    }
}

/// A local key pair of either supported curve.
pub enum KeyPair {
    Ed25519(Ed25519KeyPair),
    Secp256k1(Secp256k1KeyPair),
}

impl KeyPair {
    /// Generate a fresh key pair from the OS random source.
    pub fn generate(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Ed25519 => Self::Ed25519(Ed25519KeyPair::generate()),
            Algorithm::Secp256k1Ecdsa => Self::Secp256k1(Secp256k1KeyPair::generate()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Secp256k1(_) => Algorithm::Secp256k1Ecdsa,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Ed25519(kp) => MessageSigner::public_key(kp),
            Self::Secp256k1(kp) => MessageSigner::public_key(kp),
        }
    }
}

impl MessageSigner for KeyPair {
    fn public_key(&self) -> PublicKey {
        KeyPair::public_key(self)
    }

    fn sign_bytes(&self, bytes: &[u8]) -> Result<SignatureBytes, SignError> {
        match self {
            Self::Ed25519(kp) => kp.sign_bytes(bytes),
            Self::Secp256k1(kp) => kp.sign_bytes(bytes),
        }
    }
}

impl From<Ed25519KeyPair> for KeyPair {
    fn from(kp: Ed25519KeyPair) -> Self {
        Self::Ed25519(kp)
    }
}

impl From<Secp256k1KeyPair> for KeyPair {
    fn from(kp: Secp256k1KeyPair) -> Self {
        Self::Secp256k1(kp)
    }
}

//! # Random Bytes
//!
//! Every call reads the operating system CSPRNG directly. There is no
//! process-wide seeded generator, so two draws can never repeat by reuse.

use crate::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;

/// Draw `len` bytes from the OS random source.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, CryptoError> {
    let mut bytes = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::RandomSourceUnavailable(e.to_string()))?;
    Ok(bytes)
}

//! # Attack Simulations
//!
//! Each module plays an attacker holding a captured signed message (and, in
//! some cases, a key of their own) and checks the verifier refuses.

pub mod malleability;
pub mod replay;
pub mod tamper;

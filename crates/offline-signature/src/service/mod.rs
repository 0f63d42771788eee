//! # Service Layer
//!
//! Wires the domain to a clock, configuration and a ledger directory.

pub mod chain;
pub mod signing;

pub use chain::{ChainIdentityChecker, ChainVerdict};
pub use signing::OfflineSignatureService;

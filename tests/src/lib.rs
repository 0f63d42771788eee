//! # Offline Signature Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── common.rs         # Fixtures, clocks, tracing setup
//! ├── benchmarks/       # Criterion groups (run from benches/)
//! ├── exploits/         # Attack simulations
//! │   ├── tamper.rs     # Post-signing edits
//! │   ├── replay.rs     # Expired and cross-audience reuse
//! │   ├── malleability.rs
//! │   └── cross_protocol.rs
//! └── integration/      # End-to-end flows, chain identity checks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p offline-signature-tests
//!
//! # By category
//! cargo test -p offline-signature-tests integration::
//! cargo test -p offline-signature-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p offline-signature-tests
//!
//! # With logs
//! RUST_LOG=offline_signature=debug cargo test -p offline-signature-tests
//! ```

pub mod benchmarks;
pub mod common;
pub mod exploits;
pub mod integration;

//! # Offline Signature Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | canonicalize (16-entry payload) | < 10μs |
//! | Ed25519 sign + verify | < 100μs |
//! | secp256k1 sign + verify | < 500μs |

use criterion::{criterion_group, criterion_main};
use offline_signature_tests::benchmarks::envelope::register_benchmarks;

criterion_group!(benches, register_benchmarks);
criterion_main!(benches);

//! # Benchmarks
//!
//! Criterion groups, registered from `benches/envelope_benchmarks.rs`.

//! # Integration Tests
//!
//! End-to-end wallet → relying party flows.

pub mod flows;

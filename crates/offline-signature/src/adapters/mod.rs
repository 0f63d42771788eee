//! # Adapters Module
//!
//! Concrete implementations of the outbound ports.

pub mod directory;
pub mod keypair;
pub mod rpc;

//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that relying parties and wallets call
//! - **Outbound (Driven)**: Key holders, clocks and ledger directories

pub mod inbound;
pub mod outbound;

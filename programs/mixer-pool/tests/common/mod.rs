//! Shared test helpers for the pool tests.
//!
//! - `host`: in-memory host recording payouts and events
//! - `verifier`: proof verifiers standing in for the withdrawal circuit
//! - `fixtures`: field elements, notes and pool construction
//! - `groth16`: real proofs for a small withdrawal-shaped circuit

#![allow(dead_code)]

pub mod fixtures;
pub mod groth16;
pub mod host;
pub mod verifier;

pub use fixtures::*;
pub use groth16::*;
pub use host::*;
pub use verifier::*;

//! Fixed-denomination mixing pool.
//!
//! Depositors append a commitment `Poseidon(nullifier, secret)` to an
//! incremental merkle accumulator while paying exactly one denomination.
//! Withdrawers later prove, in zero knowledge, membership of some commitment
//! under a recent root and reveal `Poseidon(nullifier)` so the same deposit
//! cannot be withdrawn twice.
//!
//! # Modules
//!
//! - [`pool`] - the deposit/withdraw ledger
//! - [`state`] - persisted pool state
//! - [`verifier`] / [`groth16`] - withdrawal proof verification
//! - [`host`] - execution environment seam (clock, payouts, events)
//! - [`events`] - event payloads and their wire encoding
//! - [`note`] - depositor secrets
//! - [`config`] / [`errors`]

pub mod config;
pub mod errors;
pub mod events;
pub mod groth16;
pub mod host;
pub mod note;
pub mod pool;
pub mod state;
pub mod verifier;

pub use config::{DEFAULT_TREE_DEPTH, PoolConfig};
pub use errors::{Groth16Error, MixerError};
pub use events::{DepositEvent, EventBytes, EventType, LeafInsertedEvent, PoolEvent, WithdrawalEvent};
pub use host::{Host, PayoutError};
pub use note::Note;
pub use pool::MixerPool;
pub use state::PoolState;
pub use verifier::{Groth16ProofVerifier, ProofVerifier, WITHDRAW_PUBLIC_INPUTS};

pub use mixer_merkle;

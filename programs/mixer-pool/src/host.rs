//! Execution environment the pool runs inside.

use crate::events::PoolEvent;
use core::fmt;

/// Why the host could not pay a recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutError {
    /// Recipient cannot receive value
    RecipientRejected,
    /// Host-side transfer failed
    TransferFailed,
}

impl fmt::Display for PayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipientRejected => f.write_str("recipient rejected payout"),
            Self::TransferFailed => f.write_str("transfer failed"),
        }
    }
}

/// Services the pool needs from its host.
///
/// `release` may run arbitrary recipient code. It cannot reach the pool it
/// was called from: the pool is exclusively borrowed for the whole
/// withdrawal.
pub trait Host {
    /// Current time in unix seconds, stamped into events.
    fn unix_timestamp(&self) -> i64;

    /// Transfer `amount` out of the pool to `recipient`.
    ///
    /// # Errors
    /// Any [`PayoutError`]; the pool then rolls the withdrawal back.
    fn release(&mut self, recipient: &[u8; 32], amount: u64) -> Result<(), PayoutError>;

    /// Publish an event. Called only after an operation has fully succeeded.
    fn emit(&mut self, event: &PoolEvent);
}

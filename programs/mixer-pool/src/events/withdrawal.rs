//! Withdrawal event definition.

use super::{EventBytes, EventType};
use bytemuck::{Pod, Zeroable};

/// Event emitted when a withdrawal has been paid out.
///
/// Carries the nullifier hash, never the commitment, so it cannot be linked
/// to a deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct WithdrawalEvent {
    /// Recipient identity (32 bytes, big-endian field element)
    pub recipient: [u8; 32],
    /// Nullifier hash marked spent by this withdrawal
    pub nullifier: [u8; 32],
    /// Host timestamp (unix seconds)
    pub timestamp: i64,
}

impl EventBytes for WithdrawalEvent {
    const EVENT_TYPE: EventType = EventType::Withdrawal;
}

//! Deposit event definition.

use super::{EventBytes, EventType};
use bytemuck::{Pod, Zeroable};

/// Event emitted when a commitment is deposited into the pool.
///
/// Provers collect these, sort by `leaf_index` and rebuild the commitment
/// tree locally to obtain a membership path for their own note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct DepositEvent {
    /// The commitment hash (32 bytes, big-endian)
    pub commitment: [u8; 32],
    /// Index of the commitment in the tree
    pub leaf_index: u64,
    /// Host timestamp (unix seconds)
    pub timestamp: i64,
}

impl EventBytes for DepositEvent {
    const EVENT_TYPE: EventType = EventType::Deposit;
}

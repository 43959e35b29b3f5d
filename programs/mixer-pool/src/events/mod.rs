//! Event definitions for the mixer pool.
//!
//! # Event Types
//!
//! - [`LeafInsertedEvent`] - Emitted when a leaf is appended to the accumulator
//! - [`DepositEvent`] - Emitted when a commitment is deposited
//! - [`WithdrawalEvent`] - Emitted when a withdrawal is paid out
//!
//! # Event Pattern
//!
//! Every event is a fixed-size `#[repr(C)]` Pod struct. On the wire it is
//! prefixed with its `u64` discriminator (little-endian):
//!
//! ```text
//! [discriminator: 8 bytes][event: size_of::<T>() bytes]
//! ```

mod deposit;
mod withdrawal;

pub use deposit::*;
pub use mixer_merkle::LeafInsertedEvent;
pub use withdrawal::*;

use bytemuck::Pod;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Event type discriminators for identifying event types in logs.
#[repr(u64)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr, IntoPrimitive, TryFromPrimitive,
)]
pub enum EventType {
    /// Leaf appended to the commitment accumulator
    LeafInserted = 1,
    /// Commitment deposited
    Deposit = 2,
    /// Withdrawal paid out
    Withdrawal = 3,
}

/// Discriminator-prefixed Pod encoding.
pub trait EventBytes: Pod {
    /// Discriminator written before the event body
    const EVENT_TYPE: EventType;

    /// `[discriminator][bytes_of(self)]`
    fn to_event_bytes(&self) -> Vec<u8> {
        let discriminator: u64 = Self::EVENT_TYPE.into();
        let body = bytemuck::bytes_of(self);
        let mut data = Vec::with_capacity(8 + body.len());
        data.extend_from_slice(&discriminator.to_le_bytes());
        data.extend_from_slice(body);
        data
    }
}

impl EventBytes for LeafInsertedEvent {
    const EVENT_TYPE: EventType = EventType::LeafInserted;
}

/// Any event the pool emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolEvent {
    /// See [`LeafInsertedEvent`]
    LeafInserted(LeafInsertedEvent),
    /// See [`DepositEvent`]
    Deposit(DepositEvent),
    /// See [`WithdrawalEvent`]
    Withdrawal(WithdrawalEvent),
}

impl PoolEvent {
    /// Discriminator of the wrapped event.
    pub fn event_type(&self) -> EventType {
        match self {
            Self::LeafInserted(_) => EventType::LeafInserted,
            Self::Deposit(_) => EventType::Deposit,
            Self::Withdrawal(_) => EventType::Withdrawal,
        }
    }

    /// Event name for logs, e.g. `"Deposit"`.
    pub fn name(&self) -> &'static str {
        self.event_type().into()
    }

    /// Wire encoding, see the module docs.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::LeafInserted(event) => event.to_event_bytes(),
            Self::Deposit(event) => event.to_event_bytes(),
            Self::Withdrawal(event) => event.to_event_bytes(),
        }
    }

    /// Parse an encoded event. Returns `None` on an unknown discriminator or a
    /// body of the wrong size.
    pub fn decode(data: &[u8]) -> Option<Self> {
        let (discriminator, body) = data.split_first_chunk::<8>()?;
        let event_type = EventType::try_from(u64::from_le_bytes(*discriminator)).ok()?;
        match event_type {
            EventType::LeafInserted => bytemuck::try_pod_read_unaligned(body)
                .ok()
                .map(Self::LeafInserted),
            EventType::Deposit => bytemuck::try_pod_read_unaligned(body)
                .ok()
                .map(Self::Deposit),
            EventType::Withdrawal => bytemuck::try_pod_read_unaligned(body)
                .ok()
                .map(Self::Withdrawal),
        }
    }
}

//! In-memory host.

use mixer_pool::{Host, PayoutError, PoolEvent};
use std::collections::{HashMap, HashSet};

/// Records every payout and event; can be told to refuse recipients.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub now: i64,
    pub paid: HashMap<[u8; 32], u64>,
    pub events: Vec<PoolEvent>,
    pub rejected_recipients: HashSet<[u8; 32]>,
    pub release_calls: usize,
}

impl MemoryHost {
    pub fn at(now: i64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn paid_to(&self, recipient: &[u8; 32]) -> u64 {
        self.paid.get(recipient).copied().unwrap_or(0)
    }

    /// Events as they would appear on the wire.
    pub fn encoded_events(&self) -> Vec<Vec<u8>> {
        self.events.iter().map(PoolEvent::encode).collect()
    }
}

impl Host for MemoryHost {
    fn unix_timestamp(&self) -> i64 {
        self.now
    }

    fn release(&mut self, recipient: &[u8; 32], amount: u64) -> Result<(), PayoutError> {
        self.release_calls += 1;
        if self.rejected_recipients.contains(recipient) {
            return Err(PayoutError::RecipientRejected);
        }
        *self.paid.entry(*recipient).or_default() += amount;
        Ok(())
    }

    fn emit(&mut self, event: &PoolEvent) {
        self.events.push(*event);
    }
}

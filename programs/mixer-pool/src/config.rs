use crate::errors::MixerError;
use borsh::{BorshDeserialize, BorshSerialize};
use mixer_merkle::MAX_DEPTH;

/// Depth used when a deployment does not choose one (2^20 = 1,048,576 deposits).
pub const DEFAULT_TREE_DEPTH: u8 = 20;

/// Deployment-time pool parameters. Immutable once the pool exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PoolConfig {
    /// Accumulator depth, `1..=32`
    pub depth: u8,
    /// Exact value accepted per deposit and paid per withdrawal
    pub denomination: u64,
}

impl PoolConfig {
    /// Pool with the default depth.
    pub fn with_denomination(denomination: u64) -> Self {
        Self {
            depth: DEFAULT_TREE_DEPTH,
            denomination,
        }
    }

    /// Reject parameters the pool cannot run with.
    pub fn validate(&self) -> Result<(), MixerError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(MixerError::InvalidDepth);
        }
        if self.denomination == 0 {
            return Err(MixerError::InvalidDenomination);
        }
        Ok(())
    }
}

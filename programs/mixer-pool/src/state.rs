//! Persisted pool state.
//!
//! Everything a pool needs to survive between operations: the accumulator,
//! the commitment and nullifier sets, and value accounting. The host decides
//! where the bytes live; the encoding is borsh.

use crate::config::PoolConfig;
use crate::errors::MixerError;
use borsh::{BorshDeserialize, BorshSerialize};
use mixer_merkle::{MerkleTree, ZERO_LEAF, is_less_than_bn254_field_size_be};
use pinocchio_log::log;
use std::collections::HashSet;

/// Complete state of one pool.
///
/// Invariants (checked by [`PoolState::validate`]):
/// - `tree.depth() == config.depth`
/// - every commitment is a non-zero field element, and there is one per leaf
/// - `deposit_count == tree.next_index()`, `withdrawal_count == nullifiers.len()`
/// - `total_deposited` and `total_withdrawn` are the counts times the denomination
/// - `balance == total_deposited - total_withdrawn`
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PoolState {
    /// Deployment parameters
    pub config: PoolConfig,
    /// Commitment accumulator
    pub tree: MerkleTree,
    /// Every commitment ever deposited
    pub commitments: HashSet<[u8; 32]>,
    /// Every nullifier hash ever spent
    pub nullifiers: HashSet<[u8; 32]>,
    /// Value currently held
    pub balance: u64,
    /// Value received over the pool's lifetime
    pub total_deposited: u64,
    /// Value paid out over the pool's lifetime
    pub total_withdrawn: u64,
    /// Successful deposits
    pub deposit_count: u64,
    /// Successful withdrawals
    pub withdrawal_count: u64,
}

impl PoolState {
    /// Fresh state for `config`.
    pub fn new(config: PoolConfig) -> Result<Self, MixerError> {
        config.validate()?;
        Ok(Self {
            config,
            tree: MerkleTree::new(config.depth)?,
            commitments: HashSet::new(),
            nullifiers: HashSet::new(),
            balance: 0,
            total_deposited: 0,
            total_withdrawn: 0,
            deposit_count: 0,
            withdrawal_count: 0,
        })
    }

    /// Borsh encoding of the state.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MixerError> {
        let mut data = Vec::new();
        self.write_to(&mut data)?;
        Ok(data)
    }

    /// Borsh-encode into `writer`. Fails with `InvalidState` if the writer
    /// runs out of space or a set is too large for borsh's `u32` length prefix.
    pub fn write_to<W: borsh::io::Write>(&self, writer: &mut W) -> Result<(), MixerError> {
        self.serialize(writer).map_err(|_| {
            log!(
                "pool state: serialization failed ({} commitments)",
                self.commitments.len() as u64
            );
            MixerError::InvalidState
        })
    }

    /// Decode and validate state written by [`PoolState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MixerError> {
        let state = Self::try_from_slice(bytes).map_err(|_| {
            log!("pool state: undecodable ({} bytes)", bytes.len() as u64);
            MixerError::InvalidState
        })?;
        state.validate()?;
        Ok(state)
    }

    /// Check every cross-field invariant.
    pub fn validate(&self) -> Result<(), MixerError> {
        self.config.validate()?;
        self.tree.validate().map_err(|_| MixerError::InvalidState)?;
        if self.tree.depth() != self.config.depth {
            log!("pool state: tree depth does not match config");
            return Err(MixerError::InvalidState);
        }

        let leaves = self.tree.next_index();
        if self.deposit_count != leaves || self.commitments.len() as u64 != leaves {
            log!("pool state: {} leaves but {} deposits", leaves, self.deposit_count);
            return Err(MixerError::InvalidState);
        }
        if self.withdrawal_count != self.nullifiers.len() as u64 {
            log!("pool state: withdrawal count does not match nullifiers");
            return Err(MixerError::InvalidState);
        }

        let valid_commitments = self
            .commitments
            .iter()
            .all(|c| *c != ZERO_LEAF && is_less_than_bn254_field_size_be(c));
        let valid_nullifiers = self.nullifiers.iter().all(is_less_than_bn254_field_size_be);
        if !valid_commitments || !valid_nullifiers {
            log!("pool state: set member outside the field");
            return Err(MixerError::InvalidState);
        }

        let denomination = self.config.denomination;
        let expected_deposited = denomination
            .checked_mul(self.deposit_count)
            .ok_or(MixerError::InvalidState)?;
        let expected_withdrawn = denomination
            .checked_mul(self.withdrawal_count)
            .ok_or(MixerError::InvalidState)?;
        if self.total_deposited != expected_deposited
            || self.total_withdrawn != expected_withdrawn
            || self.total_deposited.checked_sub(self.total_withdrawn) != Some(self.balance)
        {
            log!("pool state: value accounting mismatch");
            return Err(MixerError::InvalidState);
        }

        Ok(())
    }
}

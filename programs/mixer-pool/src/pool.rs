//! Deposit/withdraw ledger.
//!
//! # Deposit
//!
//! 1. Commitment must be a non-zero field element (`InvalidLeaf`)
//! 2. Commitment must be new (`DuplicateCommitment`)
//! 3. Paid value must equal the denomination (`WrongAmount`)
//! 4. Commitment is appended to the accumulator (`TreeFull`)
//!
//! # Withdraw
//!
//! 1. Nullifier must be unspent (`NullifierSpent`)
//! 2. Root must be in the recent root history (`UnknownRoot`)
//! 3. Public inputs must be field elements (`ValueOutOfRange`)
//! 4. Verifier must accept `[root, nullifier, recipient]` (`InvalidProof`)
//! 5. Nullifier is marked spent, then the denomination is released
//!    (`PayoutFailed` unmarks it again)
//!
//! A rejected operation leaves the state untouched and emits nothing.

use crate::config::PoolConfig;
use crate::errors::MixerError;
use crate::events::{DepositEvent, PoolEvent, WithdrawalEvent};
use crate::host::Host;
use crate::state::PoolState;
use crate::verifier::{ProofVerifier, WITHDRAW_PUBLIC_INPUTS};
use mixer_merkle::{Insertion, ZERO_LEAF, is_less_than_bn254_field_size_be};
use pinocchio_log::log;

/// A fixed-denomination mixing pool.
///
/// All mutation goes through `&mut self`. A withdrawal therefore holds the
/// pool exclusively until both the nullifier update and the payout have
/// either completed or been rolled back, and a recipient callback cannot
/// re-enter it.
#[derive(Debug)]
pub struct MixerPool<V> {
    state: PoolState,
    verifier: V,
}

impl<V: ProofVerifier> MixerPool<V> {
    /// Create an empty pool.
    pub fn new(config: PoolConfig, verifier: V) -> Result<Self, MixerError> {
        let state = PoolState::new(config)?;
        log!(
            "pool: created depth {} denomination {}",
            config.depth,
            config.denomination
        );
        Ok(Self { state, verifier })
    }

    /// Restore a pool from persisted state.
    pub fn from_state(state: PoolState, verifier: V) -> Result<Self, MixerError> {
        state.validate()?;
        Ok(Self { state, verifier })
    }

    /// Persisted state.
    pub fn state(&self) -> &PoolState {
        &self.state
    }

    /// Give up the pool, keeping its state.
    pub fn into_state(self) -> PoolState {
        self.state
    }

    /// Proof verifier in use.
    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Accept a deposit of `paid_value` for `commitment`.
    ///
    /// Returns the insertion, whose `proof` is the new leaf's membership path.
    ///
    /// # Errors
    /// `InvalidLeaf`, `DuplicateCommitment`, `WrongAmount`, `TreeFull`,
    /// `ArithmeticOverflow`.
    pub fn deposit<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        commitment: [u8; 32],
        paid_value: u64,
    ) -> Result<Insertion, MixerError> {
        if commitment == ZERO_LEAF || !is_less_than_bn254_field_size_be(&commitment) {
            log!("deposit: invalid commitment");
            return Err(MixerError::InvalidLeaf);
        }
        if self.state.commitments.contains(&commitment) {
            log!("deposit: duplicate commitment");
            return Err(MixerError::DuplicateCommitment);
        }
        if paid_value != self.state.config.denomination {
            log!(
                "deposit: paid {} expected {}",
                paid_value,
                self.state.config.denomination
            );
            return Err(MixerError::WrongAmount);
        }

        let balance = self
            .state
            .balance
            .checked_add(paid_value)
            .ok_or(MixerError::ArithmeticOverflow)?;
        let total_deposited = self
            .state
            .total_deposited
            .checked_add(paid_value)
            .ok_or(MixerError::ArithmeticOverflow)?;
        let deposit_count = self
            .state
            .deposit_count
            .checked_add(1)
            .ok_or(MixerError::ArithmeticOverflow)?;

        // Last fallible step; the tree is untouched if it fails
        let insertion = self.state.tree.insert(commitment)?;

        self.state.commitments.insert(commitment);
        self.state.balance = balance;
        self.state.total_deposited = total_deposited;
        self.state.deposit_count = deposit_count;

        log!(
            "deposit: leaf {} ({} deposits)",
            insertion.leaf_index,
            deposit_count
        );

        let timestamp = host.unix_timestamp();
        host.emit(&PoolEvent::LeafInserted(insertion.event()));
        host.emit(&PoolEvent::Deposit(DepositEvent {
            commitment,
            leaf_index: insertion.leaf_index,
            timestamp,
        }));

        Ok(insertion)
    }

    /// Pay one denomination to `recipient` against a proof of deposit.
    ///
    /// # Errors
    /// `NullifierSpent`, `UnknownRoot`, `ValueOutOfRange`, `InvalidProof`,
    /// `PayoutFailed`, `ArithmeticOverflow`.
    pub fn withdraw<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        proof: &[u8],
        root: [u8; 32],
        nullifier: [u8; 32],
        recipient: [u8; 32],
    ) -> Result<(), MixerError> {
        if self.state.nullifiers.contains(&nullifier) {
            log!("withdraw: nullifier already spent");
            return Err(MixerError::NullifierSpent);
        }
        if !self.state.tree.is_known_root(&root) {
            log!("withdraw: unknown root");
            return Err(MixerError::UnknownRoot);
        }

        let public_inputs: [[u8; 32]; WITHDRAW_PUBLIC_INPUTS] = [root, nullifier, recipient];
        if !public_inputs.iter().all(is_less_than_bn254_field_size_be) {
            log!("withdraw: public input outside the field");
            return Err(MixerError::ValueOutOfRange);
        }
        if !self.verifier.verify(proof, &public_inputs) {
            log!("withdraw: proof rejected");
            return Err(MixerError::InvalidProof);
        }

        let amount = self.state.config.denomination;
        let Some(balance) = self.state.balance.checked_sub(amount) else {
            log!(
                "withdraw: balance {} cannot cover {}",
                self.state.balance,
                amount
            );
            return Err(MixerError::PayoutFailed);
        };
        let total_withdrawn = self
            .state
            .total_withdrawn
            .checked_add(amount)
            .ok_or(MixerError::ArithmeticOverflow)?;
        let withdrawal_count = self
            .state
            .withdrawal_count
            .checked_add(1)
            .ok_or(MixerError::ArithmeticOverflow)?;

        // Spend before paying out
        let previous_balance = self.state.balance;
        self.state.nullifiers.insert(nullifier);
        self.state.balance = balance;

        if host.release(&recipient, amount).is_err() {
            self.state.nullifiers.remove(&nullifier);
            self.state.balance = previous_balance;
            log!("withdraw: payout failed, rolled back");
            return Err(MixerError::PayoutFailed);
        }

        self.state.total_withdrawn = total_withdrawn;
        self.state.withdrawal_count = withdrawal_count;

        log!("withdraw: paid {} ({} withdrawals)", amount, withdrawal_count);

        let timestamp = host.unix_timestamp();
        host.emit(&PoolEvent::Withdrawal(WithdrawalEvent {
            recipient,
            nullifier,
            timestamp,
        }));

        Ok(())
    }

    /// True if `nullifier` has been used by a withdrawal.
    pub fn is_spent(&self, nullifier: &[u8; 32]) -> bool {
        self.state.nullifiers.contains(nullifier)
    }

    /// [`MixerPool::is_spent`] for each nullifier, in order.
    pub fn is_spent_array(&self, nullifiers: &[[u8; 32]]) -> Vec<bool> {
        nullifiers.iter().map(|n| self.is_spent(n)).collect()
    }

    /// True if `root` is in the recent root history.
    pub fn is_known_root(&self, root: &[u8; 32]) -> bool {
        self.state.tree.is_known_root(root)
    }

    /// Current accumulator root.
    pub fn last_root(&self) -> [u8; 32] {
        self.state.tree.root()
    }

    /// True if `commitment` has been deposited.
    pub fn commitment_exists(&self, commitment: &[u8; 32]) -> bool {
        self.state.commitments.contains(commitment)
    }

    /// Index the next deposit will occupy.
    pub fn next_index(&self) -> u64 {
        self.state.tree.next_index()
    }

    /// Value per deposit and per withdrawal.
    pub fn denomination(&self) -> u64 {
        self.state.config.denomination
    }

    /// Value currently held.
    pub fn balance(&self) -> u64 {
        self.state.balance
    }

    /// Accumulator depth.
    pub fn depth(&self) -> u8 {
        self.state.config.depth
    }
}

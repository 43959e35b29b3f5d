//! Depositor secrets and the values derived from them.

use crate::errors::MixerError;
use light_hasher::{Hasher, Poseidon};
use mixer_merkle::is_less_than_bn254_field_size_be;
use pinocchio_log::log;

/// The pair a depositor keeps private until withdrawal.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Note {
    /// Preimage of the nullifier hash
    pub nullifier: [u8; 32],
    /// Blinding secret
    pub secret: [u8; 32],
}

impl Note {
    /// Both halves must be field elements.
    pub fn new(nullifier: [u8; 32], secret: [u8; 32]) -> Result<Self, MixerError> {
        if !is_less_than_bn254_field_size_be(&nullifier)
            || !is_less_than_bn254_field_size_be(&secret)
        {
            return Err(MixerError::ValueOutOfRange);
        }
        Ok(Self { nullifier, secret })
    }

    /// `Poseidon(nullifier, secret)`, the leaf deposited into the pool.
    pub fn commitment(&self) -> Result<[u8; 32], MixerError> {
        Poseidon::hashv(&[self.nullifier.as_slice(), self.secret.as_slice()]).map_err(|_| {
            log!("note: commitment hash failed");
            MixerError::ValueOutOfRange
        })
    }

    /// `Poseidon(nullifier)`, revealed at withdrawal.
    pub fn nullifier_hash(&self) -> Result<[u8; 32], MixerError> {
        Poseidon::hashv(&[self.nullifier.as_slice()]).map_err(|_| {
            log!("note: nullifier hash failed");
            MixerError::ValueOutOfRange
        })
    }
}

// Keep the secrets out of debug output.
impl core::fmt::Debug for Note {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Note").finish_non_exhaustive()
    }
}

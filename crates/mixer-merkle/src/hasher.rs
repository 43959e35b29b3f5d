//! Two-to-one Poseidon hashing and the empty-subtree table.
//!
//! # Zero Hashes
//!
//! The empty slot value is `0`, so the table is:
//! - `zero_hash(0) = 0`
//! - `zero_hash(i) = Poseidon(zero_hash(i-1), zero_hash(i-1))`
//!
//! The table is the one shipped with `light_hasher::Poseidon` (big-endian,
//! circom parameters), which is also what withdrawal circuits hard-code.

use crate::errors::MerkleTreeError;
use crate::merkle_tree::MAX_DEPTH;
use light_hasher::{Hasher, Poseidon};
use pinocchio_log::log;

/// Hash used for every internal node of the tree.
pub type TreeHasher = Poseidon;

/// Parent node of `left` and `right`.
///
/// Fails with [`MerkleTreeError::ValueOutOfRange`] if either child is not a
/// field element.
#[inline]
pub fn hash_left_right(left: &[u8; 32], right: &[u8; 32]) -> Result<[u8; 32], MerkleTreeError> {
    TreeHasher::hashv(&[left.as_slice(), right.as_slice()]).map_err(|_| {
        log!("merkle hash error");
        MerkleTreeError::ValueOutOfRange
    })
}

/// Root of an all-empty subtree of height `level`, for `level <= MAX_DEPTH`.
pub fn zero_hash(level: usize) -> Result<[u8; 32], MerkleTreeError> {
    if level > MAX_DEPTH as usize {
        return Err(MerkleTreeError::InvalidDepth);
    }
    match TreeHasher::zero_bytes().get(level) {
        Some(zero) => Ok(*zero),
        // level > 0 here: the table always holds level 0
        None => {
            let below = zero_hash(level - 1)?;
            hash_left_right(&below, &below)
        }
    }
}

//! Membership paths.

use crate::errors::MerkleTreeError;
use crate::hasher::hash_left_right;
use alloc::vec::Vec;
use borsh::{BorshDeserialize, BorshSerialize};

/// Authentication path for a single leaf.
///
/// `siblings[i]` is the sibling of the path node at level `i`; the side it sits
/// on is bit `i` of `leaf_index`. These are the private `pathElements` /
/// `pathIndices` inputs of the withdrawal circuit.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MerkleProof {
    /// Position of the leaf in the tree
    pub leaf_index: u64,
    /// Sibling hashes from the leaf level up to just below the root
    pub siblings: Vec<[u8; 32]>,
}

impl MerkleProof {
    /// Tree depth this path was produced for.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Direction bits, `0` when the path node is a left child and `1` when right.
    pub fn path_indices(&self) -> Vec<u8> {
        (0..self.siblings.len())
            .map(|level| ((self.leaf_index >> level) & 1) as u8)
            .collect()
    }

    /// Folds `leaf` up the path and returns the resulting root.
    pub fn compute_root(&self, leaf: &[u8; 32]) -> Result<[u8; 32], MerkleTreeError> {
        if self.siblings.len() < 64 && self.leaf_index >> self.siblings.len() != 0 {
            return Err(MerkleTreeError::InvalidState);
        }

        let mut current_index = self.leaf_index;
        let mut current = *leaf;
        for sibling in &self.siblings {
            current = if current_index.is_multiple_of(2) {
                hash_left_right(&current, sibling)?
            } else {
                hash_left_right(sibling, &current)?
            };
            current_index /= 2;
        }
        Ok(current)
    }

    /// True if `leaf` at `leaf_index` hashes up to `root`.
    pub fn verify(&self, leaf: &[u8; 32], root: &[u8; 32]) -> bool {
        matches!(self.compute_root(leaf), Ok(computed) if computed == *root)
    }
}

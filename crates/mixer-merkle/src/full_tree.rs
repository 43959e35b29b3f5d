//! Off-chain merkle tree keeping every node.
//!
//! The on-ledger [`MerkleTree`](crate::MerkleTree) only stores its frontier,
//! which is enough to append but not to prove membership of older leaves.
//! Provers replay the leaf stream (deposit events in index order) into a
//! `FullMerkleTree` and take paths from it. For the same leaf sequence both
//! trees produce identical roots.

use crate::errors::MerkleTreeError;
use crate::field::require_field_element;
use crate::hasher::{hash_left_right, zero_hash};
use crate::merkle_tree::{MAX_DEPTH, ZERO_LEAF};
use crate::proof::MerkleProof;
use alloc::vec;
use alloc::vec::Vec;

/// Fully materialized append-only tree.
///
/// `layers[0]` holds the leaves, `layers[depth]` at most the root. A missing
/// node is the zero hash of its level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullMerkleTree {
    depth: u8,
    layers: Vec<Vec<[u8; 32]>>,
    zeros: Vec<[u8; 32]>,
}

impl FullMerkleTree {
    /// Create an empty tree of the given depth.
    pub fn new(depth: u8) -> Result<Self, MerkleTreeError> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(MerkleTreeError::InvalidDepth);
        }
        let zeros = (0..=depth as usize)
            .map(zero_hash)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            depth,
            layers: vec![Vec::new(); depth as usize + 1],
            zeros,
        })
    }

    /// Build a tree from leaves given in insertion order.
    pub fn from_leaves<I>(depth: u8, leaves: I) -> Result<Self, MerkleTreeError>
    where
        I: IntoIterator<Item = [u8; 32]>,
    {
        let mut tree = Self::new(depth)?;
        for leaf in leaves {
            tree.insert(leaf)?;
        }
        Ok(tree)
    }

    /// Append `leaf`, returning its index.
    pub fn insert(&mut self, leaf: [u8; 32]) -> Result<u64, MerkleTreeError> {
        if leaf == ZERO_LEAF {
            return Err(MerkleTreeError::InvalidLeaf);
        }
        require_field_element(&leaf)?;

        let leaf_index = self.len();
        if leaf_index >= 1u64 << self.depth {
            return Err(MerkleTreeError::TreeFull);
        }

        // Compute the new path before touching any layer
        let mut path = Vec::with_capacity(self.depth as usize);
        let mut index = leaf_index as usize;
        let mut current = leaf;
        for level in 0..self.depth as usize {
            current = if index.is_multiple_of(2) {
                hash_left_right(&current, &self.zeros[level])?
            } else {
                hash_left_right(&self.layers[level][index - 1], &current)?
            };
            index /= 2;
            path.push(current);
        }

        self.layers[0].push(leaf);
        let mut index = leaf_index as usize;
        for (level, node) in path.into_iter().enumerate() {
            index /= 2;
            let layer = &mut self.layers[level + 1];
            if index < layer.len() {
                layer[index] = node;
            } else {
                layer.push(node);
            }
        }

        Ok(leaf_index)
    }

    /// Tree depth.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Number of leaves.
    pub fn len(&self) -> u64 {
        self.layers[0].len() as u64
    }

    /// True if no leaf has been inserted.
    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// Leaves in insertion order.
    pub fn leaves(&self) -> &[[u8; 32]] {
        &self.layers[0]
    }

    /// Position of `leaf`, if present.
    pub fn index_of(&self, leaf: &[u8; 32]) -> Option<u64> {
        self.layers[0]
            .iter()
            .position(|l| l == leaf)
            .map(|i| i as u64)
    }

    /// Current root.
    pub fn root(&self) -> [u8; 32] {
        self.layers[self.depth as usize]
            .first()
            .copied()
            .unwrap_or(self.zeros[self.depth as usize])
    }

    /// Membership path for the leaf at `leaf_index`, valid against [`Self::root`].
    pub fn proof(&self, leaf_index: u64) -> Option<MerkleProof> {
        if leaf_index >= self.len() {
            return None;
        }
        let mut index = leaf_index as usize;
        let siblings = (0..self.depth as usize)
            .map(|level| {
                let sibling = self.layers[level]
                    .get(index ^ 1)
                    .copied()
                    .unwrap_or(self.zeros[level]);
                index /= 2;
                sibling
            })
            .collect();
        Some(MerkleProof {
            leaf_index,
            siblings,
        })
    }
}

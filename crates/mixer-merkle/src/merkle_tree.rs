use crate::errors::MerkleTreeError;
use crate::events::LeafInsertedEvent;
use crate::field::{is_less_than_bn254_field_size_be, require_field_element};
use crate::hasher::{hash_left_right, zero_hash};
use crate::proof::MerkleProof;
use alloc::vec::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use pinocchio_log::log;

/// Largest supported depth (2^32 leaves), keeps every index inside a `u64`.
pub const MAX_DEPTH: u8 = 32;

/// Size of the root history circular buffer.
/// A withdrawal proof stays valid until 30 further deposits have landed.
pub const ROOT_HISTORY_SIZE: usize = 30;

/// Reserved value of an empty leaf slot. Never accepted as a leaf.
pub const ZERO_LEAF: [u8; 32] = [0u8; 32];

/// Incremental append-only merkle tree with root history.
///
/// Only the left frontier is stored: `filled_subtrees[i]` is the most recent
/// left-hand node computed at level `i`. Empty right-hand siblings come from
/// the zero-hash table, so an insert costs `depth` hashes.
///
/// # Index Semantics
///
/// - `next_index = 0` after construction (empty tree)
/// - First leaf goes to index 0
/// - Capacity is `2^depth`
///
/// # Root History
///
/// `root_history[root_index]` is always the current root. The empty-tree root
/// is written to slot 0 at construction; every insert advances `root_index`
/// by one (mod [`ROOT_HISTORY_SIZE`]) and overwrites the oldest entry.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MerkleTree {
    /// Tree depth (constant after construction)
    depth: u8,
    /// Next index for insertion, equal to the number of leaves
    next_index: u64,
    /// Index into root_history (circular buffer cursor)
    root_index: u64,
    /// Current root of the tree
    root: [u8; 32],
    /// Subtree hashes for incremental insertion, one per level
    filled_subtrees: Vec<[u8; 32]>,
    /// History of past roots for proof verification
    root_history: [[u8; 32]; ROOT_HISTORY_SIZE],
}

/// Result of a successful [`MerkleTree::insert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Insertion {
    /// Index the leaf was written to
    pub leaf_index: u64,
    /// The inserted leaf
    pub leaf: [u8; 32],
    /// Root after the insertion
    pub root: [u8; 32],
    /// Path of the new leaf, valid against `root`
    pub proof: MerkleProof,
}

impl Insertion {
    /// Append event for indexers.
    pub fn event(&self) -> LeafInsertedEvent {
        LeafInsertedEvent {
            leaf_index: self.leaf_index,
            leaf: self.leaf,
            root: self.root,
        }
    }
}

impl MerkleTree {
    /// Create an empty tree of the given depth.
    ///
    /// After construction:
    /// - `next_index = 0`
    /// - `filled_subtrees[i]` = zero hash at level `i`
    /// - `root` = zero hash at `depth`, stored in `root_history[0]`
    pub fn new(depth: u8) -> Result<Self, MerkleTreeError> {
        if depth == 0 || depth > MAX_DEPTH {
            log!("merkle tree: invalid depth {}", depth as u64);
            return Err(MerkleTreeError::InvalidDepth);
        }

        let filled_subtrees = (0..depth as usize)
            .map(zero_hash)
            .collect::<Result<Vec<_>, _>>()?;
        let initial_root = zero_hash(depth as usize)?;

        let mut root_history = [[0u8; 32]; ROOT_HISTORY_SIZE];
        root_history[0] = initial_root;

        Ok(Self {
            depth,
            next_index: 0,
            root_index: 0,
            root: initial_root,
            filled_subtrees,
            root_history,
        })
    }

    /// Append `leaf` and return the new root together with its path.
    ///
    /// All-or-nothing: on any error the tree is left untouched.
    pub fn insert(&mut self, leaf: [u8; 32]) -> Result<Insertion, MerkleTreeError> {
        if leaf == ZERO_LEAF {
            log!("merkle tree: zero leaf rejected");
            return Err(MerkleTreeError::InvalidLeaf);
        }
        require_field_element(&leaf)?;

        if self.next_index >= self.capacity() {
            log!("merkle tree: full at {} leaves", self.next_index);
            return Err(MerkleTreeError::TreeFull);
        }

        let depth = self.depth as usize;
        let leaf_index = self.next_index;
        let mut current_index = leaf_index;
        let mut current_level_hash = leaf;
        let mut subtrees = self.filled_subtrees.clone();
        let mut siblings = Vec::with_capacity(depth);

        for (level, subtree) in subtrees.iter_mut().enumerate() {
            let (left, right) = if current_index.is_multiple_of(2) {
                let right = zero_hash(level)?;
                *subtree = current_level_hash;
                siblings.push(right);
                (current_level_hash, right)
            } else {
                siblings.push(*subtree);
                (*subtree, current_level_hash)
            };
            current_level_hash = hash_left_right(&left, &right)?;
            current_index /= 2;
        }

        let next_index = self
            .next_index
            .checked_add(1)
            .ok_or(MerkleTreeError::ArithmeticOverflow)?;
        let new_root_index = (self.root_index as usize)
            .checked_add(1)
            .ok_or(MerkleTreeError::ArithmeticOverflow)?
            % ROOT_HISTORY_SIZE;

        self.filled_subtrees = subtrees;
        self.root = current_level_hash;
        self.next_index = next_index;
        self.root_index = new_root_index as u64;
        self.root_history[new_root_index] = current_level_hash;

        Ok(Insertion {
            leaf_index,
            leaf,
            root: current_level_hash,
            proof: MerkleProof {
                leaf_index,
                siblings,
            },
        })
    }

    /// True if `root` is non-zero and still inside the history window.
    pub fn is_known_root(&self, root: &[u8; 32]) -> bool {
        if *root == [0u8; 32] {
            return false;
        }

        let current_root_index = self.root_index as usize;

        // Search backwards through the circular root history buffer
        for offset in 0..ROOT_HISTORY_SIZE {
            let i = (current_root_index + ROOT_HISTORY_SIZE - offset) % ROOT_HISTORY_SIZE;
            if *root == self.root_history[i] {
                return true;
            }
        }

        false
    }

    /// Tree depth.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Maximum number of leaves, `2^depth`.
    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// Number of leaves inserted so far; also the index of the next leaf.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// True once `next_index == capacity`.
    pub fn is_full(&self) -> bool {
        self.next_index >= self.capacity()
    }

    /// Current root.
    pub fn root(&self) -> [u8; 32] {
        self.root
    }

    /// Slot of `root_history` holding the current root.
    pub fn root_index(&self) -> u64 {
        self.root_index
    }

    /// Raw root history ring buffer.
    pub fn root_history(&self) -> &[[u8; 32]; ROOT_HISTORY_SIZE] {
        &self.root_history
    }

    /// Left frontier, one node per level.
    pub fn filled_subtrees(&self) -> &[[u8; 32]] {
        &self.filled_subtrees
    }

    /// Serialize the persisted layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MerkleTreeError> {
        let mut data = Vec::new();
        self.write_to(&mut data)?;
        Ok(data)
    }

    /// Serialize the persisted layout into `writer`, e.g. a fixed-size
    /// account buffer.
    pub fn write_to<W: borsh::io::Write>(&self, writer: &mut W) -> Result<(), MerkleTreeError> {
        self.serialize(writer).map_err(|_| {
            log!("merkle tree: serialization failed");
            MerkleTreeError::InvalidState
        })
    }

    /// Restore a tree from [`MerkleTree::to_bytes`] output, checking consistency.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MerkleTreeError> {
        let tree = Self::try_from_slice(bytes).map_err(|_| MerkleTreeError::InvalidState)?;
        tree.validate()?;
        Ok(tree)
    }

    /// Check the invariants a persisted tree must satisfy.
    pub fn validate(&self) -> Result<(), MerkleTreeError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(MerkleTreeError::InvalidDepth);
        }
        if self.filled_subtrees.len() != self.depth as usize
            || self.next_index > self.capacity()
            || self.root_index as usize >= ROOT_HISTORY_SIZE
            || self.root_history[self.root_index as usize] != self.root
        {
            return Err(MerkleTreeError::InvalidState);
        }
        let all_in_field = core::iter::once(&self.root)
            .chain(self.filled_subtrees.iter())
            .chain(self.root_history.iter())
            .all(is_less_than_bn254_field_size_be);
        if !all_in_field {
            return Err(MerkleTreeError::ValueOutOfRange);
        }
        Ok(())
    }
}

//! Incremental merkle accumulator for the fixed-denomination mixer.
//!
//! The accumulator is an append-only binary Poseidon tree of fixed depth that
//! keeps only its left frontier (`filled_subtrees`) and a ring buffer of the
//! most recent roots. Withdrawal proofs are checked against any root still in
//! that window, so a proof generated a few deposits ago remains usable.
//!
//! # Modules
//!
//! - [`merkle_tree`] - the on-ledger incremental tree (`insert`, `is_known_root`)
//! - [`full_tree`] - off-chain tree that keeps every node, used by provers
//! - [`proof`] - membership paths produced by both trees
//! - [`hasher`] - two-to-one Poseidon and the precomputed zero-hash table
//! - [`field`] - BN254 scalar field range checks
//! - [`events`] - leaf-inserted event payload for indexers

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod errors;
pub mod events;
pub mod field;
pub mod full_tree;
pub mod hasher;
pub mod merkle_tree;
pub mod proof;

pub use errors::MerkleTreeError;
pub use events::LeafInsertedEvent;
pub use field::{BN254_SCALAR_MODULUS, FIELD_ELEMENT_SIZE, is_less_than_bn254_field_size_be};
pub use full_tree::FullMerkleTree;
pub use hasher::{hash_left_right, zero_hash};
pub use merkle_tree::{Insertion, MAX_DEPTH, MerkleTree, ROOT_HISTORY_SIZE, ZERO_LEAF};
pub use proof::MerkleProof;

//! Accumulator properties: append-only growth, determinism and the root window.

mod common;

use common::leaf;
use mixer_merkle::{FullMerkleTree, MerkleTree, MerkleTreeError, ROOT_HISTORY_SIZE};
use proptest::prelude::*;

fn non_zero_leaves() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..u64::MAX, 1..48)
}

proptest! {
    #[test]
    fn prop_leaf_count_grows_by_one(values in non_zero_leaves()) {
        let mut tree = MerkleTree::new(8).unwrap();
        for (i, v) in values.iter().enumerate() {
            let insertion = tree.insert(leaf(*v)).unwrap();
            prop_assert_eq!(insertion.leaf_index, i as u64);
            prop_assert_eq!(tree.next_index(), i as u64 + 1);
        }
    }

    #[test]
    fn prop_root_sequence_is_deterministic(values in non_zero_leaves()) {
        let mut a = MerkleTree::new(10).unwrap();
        let mut b = MerkleTree::new(10).unwrap();
        for v in &values {
            prop_assert_eq!(a.insert(leaf(*v)).unwrap().root, b.insert(leaf(*v)).unwrap().root);
        }
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_full_tree_reconstructs_root(values in non_zero_leaves()) {
        let mut tree = MerkleTree::new(6).unwrap();
        for v in &values {
            tree.insert(leaf(*v)).unwrap();
        }
        let full = FullMerkleTree::from_leaves(6, values.iter().map(|v| leaf(*v))).unwrap();
        prop_assert_eq!(full.root(), tree.root());
    }

    #[test]
    fn prop_only_recent_roots_are_known(extra in 1usize..20) {
        let mut tree = MerkleTree::new(8).unwrap();
        let total = ROOT_HISTORY_SIZE + extra;
        let roots: Vec<_> = (1..=total as u64).map(|i| tree.insert(leaf(i)).unwrap().root).collect();
        let (aged_out, recent) = roots.split_at(total - ROOT_HISTORY_SIZE);
        for root in aged_out {
            prop_assert!(!tree.is_known_root(root));
        }
        for root in recent {
            prop_assert!(tree.is_known_root(root));
        }
    }
}

#[test]
fn test_zero_leaf_never_changes_count() {
    let mut tree = MerkleTree::new(3).unwrap();
    tree.insert(leaf(1)).unwrap();
    for _ in 0..3 {
        assert_eq!(tree.insert([0u8; 32]), Err(MerkleTreeError::InvalidLeaf));
        assert_eq!(tree.next_index(), 1);
    }
}

#[test]
fn test_empty_root_ages_out_after_window() {
    let mut tree = MerkleTree::new(8).unwrap();
    let empty_root = tree.root();
    for i in 1..ROOT_HISTORY_SIZE as u64 {
        tree.insert(leaf(i)).unwrap();
    }
    assert!(tree.is_known_root(&empty_root));

    tree.insert(leaf(ROOT_HISTORY_SIZE as u64)).unwrap();
    assert!(!tree.is_known_root(&empty_root));
}

#[test]
fn test_never_produced_root_is_unknown() {
    let mut tree = MerkleTree::new(8).unwrap();
    tree.insert(leaf(1)).unwrap();
    assert!(!tree.is_known_root(&leaf(12345)));
}

#[test]
fn test_duplicate_leaves_are_accepted_by_the_tree() {
    // Duplicate rejection is the ledger's job; the accumulator is value-agnostic
    let mut tree = MerkleTree::new(3).unwrap();
    let first = tree.insert(leaf(5)).unwrap();
    let second = tree.insert(leaf(5)).unwrap();
    assert_ne!(first.root, second.root);
    assert_eq!(tree.next_index(), 2);
}

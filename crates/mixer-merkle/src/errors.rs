//! Error types for the merkle accumulator.

use core::fmt;

/// Errors returned by [`MerkleTree`](crate::MerkleTree) and
/// [`FullMerkleTree`](crate::FullMerkleTree).
///
/// All of them are caller faults: an operation that fails leaves the tree
/// exactly as it was before the call.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MerkleTreeError {
    /// Leaf is the reserved empty-slot value (zero)
    InvalidLeaf,
    /// All `2^depth` leaf slots are used
    TreeFull,
    /// An operand is not smaller than the BN254 scalar modulus
    ValueOutOfRange,
    /// Depth outside `1..=MAX_DEPTH`
    InvalidDepth,
    /// Restored state is internally inconsistent
    InvalidState,
    /// Index arithmetic overflowed
    ArithmeticOverflow,
}

impl fmt::Display for MerkleTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidLeaf => "leaf must be a non-zero field element",
            Self::TreeFull => "merkle tree is full",
            Self::ValueOutOfRange => "value is not a BN254 scalar field element",
            Self::InvalidDepth => "tree depth must be within 1..=32",
            Self::InvalidState => "merkle tree state is inconsistent",
            Self::ArithmeticOverflow => "arithmetic overflow",
        };
        f.write_str(msg)
    }
}

//! Leaf inserted event definition.

use bytemuck::{Pod, Zeroable};

/// Event emitted when a leaf is appended to the accumulator.
///
/// Indexers replay these in `leaf_index` order to rebuild the full tree
/// off-chain (see [`FullMerkleTree`](crate::FullMerkleTree)).
///
/// # Wire Format
/// ```text
/// [leaf_index: u64][leaf: 32 bytes][root: 32 bytes]   (72 bytes, little-endian index)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct LeafInsertedEvent {
    /// Index the leaf was written to
    pub leaf_index: u64,
    /// The leaf value (32 bytes, big-endian)
    pub leaf: [u8; 32],
    /// Root after the insertion (32 bytes, big-endian)
    pub root: [u8; 32],
}

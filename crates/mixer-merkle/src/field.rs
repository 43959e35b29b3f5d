//! BN254 scalar field helpers.
//!
//! Leaves, roots, nullifiers and every other public input are big-endian
//! 32-byte encodings of elements of the BN254 scalar field `Fr`.

use crate::errors::MerkleTreeError;
use ark_ff::PrimeField;
use num_bigint::BigUint;

/// Size in bytes of an encoded field element.
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// BN254 scalar field modulus (r), big-endian.
/// r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
pub const BN254_SCALAR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// Returns true if `bytes` (big-endian) is strictly below the `Fr` modulus.
pub fn is_less_than_bn254_field_size_be(bytes: &[u8; 32]) -> bool {
    let bigint = BigUint::from_bytes_be(bytes);
    bigint < ark_bn254::Fr::MODULUS.into()
}

/// Fails with [`MerkleTreeError::ValueOutOfRange`] unless `bytes` is a field element.
#[inline]
pub fn require_field_element(bytes: &[u8; 32]) -> Result<(), MerkleTreeError> {
    if !is_less_than_bn254_field_size_be(bytes) {
        return Err(MerkleTreeError::ValueOutOfRange);
    }
    Ok(())
}

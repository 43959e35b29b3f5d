//! Field elements, notes and pools.

use ark_ff::PrimeField;
use mixer_pool::{MixerPool, Note, PoolConfig, ProofVerifier};
use num_bigint::BigUint;

pub const DENOMINATION: u64 = 1_000_000_000;

/// Encode `n` as a big-endian field element.
pub fn scalar(n: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    bytes
}

/// The BN254 scalar field modulus, the smallest out-of-field value.
pub fn modulus() -> [u8; 32] {
    let modulus: BigUint = ark_bn254::Fr::MODULUS.into();
    let bytes = modulus.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Deterministic note number `n`.
pub fn note(n: u64) -> Note {
    Note::new(scalar(n * 2 + 1), scalar(n * 2 + 2)).expect("small values are field elements")
}

pub fn recipient(n: u64) -> [u8; 32] {
    let mut bytes = scalar(n);
    bytes[0] = 0x0a;
    bytes
}

pub fn pool<V: ProofVerifier>(depth: u8, verifier: V) -> MixerPool<V> {
    MixerPool::new(
        PoolConfig {
            depth,
            denomination: DENOMINATION,
        },
        verifier,
    )
    .expect("valid config")
}

pub fn from_hex(s: &str) -> [u8; 32] {
    let bytes = hex::decode(s.trim_start_matches("0x")).expect("valid hex fixture");
    bytes.try_into().expect("32-byte fixture")
}

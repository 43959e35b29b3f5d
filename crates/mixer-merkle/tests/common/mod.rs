//! Shared test helpers for the accumulator tests.

#![allow(dead_code)]

/// Encode `n` as a big-endian field element.
pub fn leaf(n: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    bytes
}

/// Decode a 32-byte big-endian hex fixture.
pub fn from_hex(s: &str) -> [u8; 32] {
    let bytes = hex::decode(s.trim_start_matches("0x")).expect("valid hex fixture");
    bytes.try_into().expect("32-byte fixture")
}

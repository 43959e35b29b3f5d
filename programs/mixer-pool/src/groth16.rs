//! Groth16 proof verification over BN254.
//!
//! Proofs arrive compressed (`A: 32 | B: 64 | C: 32` bytes, big-endian) and
//! are checked with the `alt_bn128` pairing precompiles.

use crate::errors::Groth16Error;
use borsh::{BorshDeserialize, BorshSerialize};
use mixer_merkle::is_less_than_bn254_field_size_be;
use num_bigint::BigUint;
use solana_bn254::compression::prelude::{alt_bn128_g1_decompress, alt_bn128_g2_decompress};
use solana_bn254::prelude::{
    alt_bn128_g1_addition_be, alt_bn128_g1_multiplication_be, alt_bn128_pairing_be,
};

/// Size of a compressed proof: G1 (32) + G2 (64) + G1 (32).
pub const COMPRESSED_PROOF_SIZE: usize = 128;

/// BN254 base field modulus (p) for G1 point negation.
/// p = 21888242871839275222246405745257275088696311157297823662689037894645226208583
const BN254_FIELD_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d, 0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
];

/// Borrowed view of a compressed Groth16 proof.
#[derive(Debug, Clone, Copy)]
pub struct CompressedGroth16Proof<'a> {
    /// G1 point, compressed (32 bytes, big-endian)
    pub proof_a: &'a [u8; 32],
    /// G2 point, compressed (64 bytes, big-endian)
    pub proof_b: &'a [u8; 64],
    /// G1 point, compressed (32 bytes, big-endian)
    pub proof_c: &'a [u8; 32],
}

impl<'a> CompressedGroth16Proof<'a> {
    /// Split a 128-byte proof into its points.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, Groth16Error> {
        let bytes: &[u8; COMPRESSED_PROOF_SIZE] =
            bytes.try_into().map_err(|_| Groth16Error::InvalidG1Length)?;
        let (proof_a, rest) = bytes.split_first_chunk::<32>().ok_or(Groth16Error::InvalidG1Length)?;
        let (proof_b, proof_c) = rest.split_first_chunk::<64>().ok_or(Groth16Error::InvalidG2Length)?;
        let proof_c: &[u8; 32] = proof_c.try_into().map_err(|_| Groth16Error::InvalidG1Length)?;
        Ok(Self {
            proof_a,
            proof_b,
            proof_c,
        })
    }
}

/// Uncompressed verifying key of a circuit.
///
/// `ic` holds one G1 point per public input plus the constant term.
#[derive(Clone, PartialEq, Eq, Debug, BorshSerialize, BorshDeserialize)]
pub struct Groth16VerifyingKey {
    /// alpha (G1, uncompressed)
    pub alpha_g1: [u8; 64],
    /// beta (G2, uncompressed)
    pub beta_g2: [u8; 128],
    /// gamma (G2, uncompressed)
    pub gamma_g2: [u8; 128],
    /// delta (G2, uncompressed)
    pub delta_g2: [u8; 128],
    /// Input commitment points, `ic[0]` is the constant term
    pub ic: Vec<[u8; 64]>,
}

impl Groth16VerifyingKey {
    /// Number of public inputs the circuit takes.
    pub fn nr_pubinputs(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }
}

/// Pairing check of one decompressed proof against a verifying key.
#[derive(PartialEq, Eq, Debug)]
pub struct Groth16Verifier<'a> {
    proof_a: &'a [u8; 64],
    proof_b: &'a [u8; 128],
    proof_c: &'a [u8; 64],
    public_inputs: &'a [[u8; 32]],
    prepared_public_inputs: [u8; 64],
    verifyingkey: &'a Groth16VerifyingKey,
}

impl<'a> Groth16Verifier<'a> {
    /// `proof_a` must already be negated, see [`decompress_and_negate_proof`].
    pub fn new(
        proof_a: &'a [u8; 64],
        proof_b: &'a [u8; 128],
        proof_c: &'a [u8; 64],
        public_inputs: &'a [[u8; 32]],
        verifyingkey: &'a Groth16VerifyingKey,
    ) -> Result<Self, Groth16Error> {
        if public_inputs.len() + 1 != verifyingkey.ic.len() {
            return Err(Groth16Error::InvalidPublicInputsLength);
        }

        Ok(Groth16Verifier {
            proof_a,
            proof_b,
            proof_c,
            public_inputs,
            prepared_public_inputs: [0u8; 64],
            verifyingkey,
        })
    }

    /// Fold the public inputs into `ic[0] + sum(ic[i + 1] * input[i])`.
    pub fn prepare_inputs(&mut self) -> Result<(), Groth16Error> {
        let mut prepared_public_inputs = self.verifyingkey.ic[0];

        for (i, input) in self.public_inputs.iter().enumerate() {
            if !is_less_than_bn254_field_size_be(input) {
                return Err(Groth16Error::PublicInputGreaterThanFieldSize);
            }
            let mul_res = alt_bn128_g1_multiplication_be(
                &[&self.verifyingkey.ic[i + 1][..], &input[..]].concat(),
            )
            .map_err(|_| Groth16Error::PreparingInputsG1MulFailed)?;
            prepared_public_inputs =
                alt_bn128_g1_addition_be(&[&mul_res[..], &prepared_public_inputs[..]].concat())
                    .map_err(|_| Groth16Error::PreparingInputsG1AdditionFailed)?[..]
                    .try_into()
                    .map_err(|_| Groth16Error::PreparingInputsG1AdditionFailed)?;
        }

        self.prepared_public_inputs = prepared_public_inputs;

        Ok(())
    }

    /// Run the pairing check. Never returns `Ok(false)`.
    pub fn verify(&mut self) -> Result<bool, Groth16Error> {
        self.prepare_inputs()?;

        let pairing_input = [
            self.proof_a.as_slice(),
            self.proof_b.as_slice(),
            self.prepared_public_inputs.as_slice(),
            self.verifyingkey.gamma_g2.as_slice(),
            self.proof_c.as_slice(),
            self.verifyingkey.delta_g2.as_slice(),
            self.verifyingkey.alpha_g1.as_slice(),
            self.verifyingkey.beta_g2.as_slice(),
        ]
        .concat();

        let pairing_res = alt_bn128_pairing_be(pairing_input.as_slice())
            .map_err(|_| Groth16Error::ProofVerificationFailed)?;

        if pairing_res[31] != 1 {
            return Err(Groth16Error::ProofVerificationFailed);
        }
        Ok(true)
    }
}

/// Negate the y-coordinate of a G1 point: -y = p - y (mod p)
/// Input/output are big-endian 32-byte field elements.
fn negate_y(y: &[u8; 32]) -> [u8; 32] {
    let p = BigUint::from_bytes_be(&BN254_FIELD_MODULUS);
    let y_val = BigUint::from_bytes_be(y);
    let neg_y = if y_val == BigUint::from(0u32) { y_val } else { &p - &y_val };

    let bytes = neg_y.to_bytes_be();
    let mut result = [0u8; 32];
    result[32 - bytes.len()..].copy_from_slice(&bytes);
    result
}

/// Decompresses a Groth16 proof and negates proof_a for the pairing check.
///
/// Returns `(-A, B, C)` as uncompressed points.
#[inline(never)]
pub fn decompress_and_negate_proof(
    compressed: &CompressedGroth16Proof,
) -> Result<([u8; 64], [u8; 128], [u8; 64]), Groth16Error> {
    let proof_a_decompressed =
        alt_bn128_g1_decompress(compressed.proof_a).map_err(|_| Groth16Error::InvalidG1)?;

    // x || y, big-endian
    let mut proof_a_neg = [0u8; 64];
    proof_a_neg[..32].copy_from_slice(&proof_a_decompressed[..32]);
    let y: [u8; 32] = proof_a_decompressed[32..64]
        .try_into()
        .map_err(|_| Groth16Error::InvalidG1)?;
    proof_a_neg[32..64].copy_from_slice(&negate_y(&y));

    let proof_b =
        alt_bn128_g2_decompress(compressed.proof_b).map_err(|_| Groth16Error::InvalidG2)?;

    let proof_c =
        alt_bn128_g1_decompress(compressed.proof_c).map_err(|_| Groth16Error::InvalidG1)?;

    Ok((proof_a_neg, proof_b, proof_c))
}

/// Verifies a compressed Groth16 proof.
///
/// Public inputs must already be in circuit order (big-endian).
///
/// # Errors
/// Any [`Groth16Error`]; a well-formed proof that fails the pairing check
/// yields [`Groth16Error::ProofVerificationFailed`].
#[inline(never)]
pub fn verify_groth16(
    compressed: &CompressedGroth16Proof,
    public_inputs: &[[u8; 32]],
    vk: &Groth16VerifyingKey,
) -> Result<bool, Groth16Error> {
    if public_inputs.len() != vk.nr_pubinputs() || vk.ic.is_empty() {
        return Err(Groth16Error::InvalidPublicInputsLength);
    }

    let (proof_a, proof_b, proof_c) = decompress_and_negate_proof(compressed)?;

    let mut verifier = Groth16Verifier::new(&proof_a, &proof_b, &proof_c, public_inputs, vk)?;

    verifier.verify()
}

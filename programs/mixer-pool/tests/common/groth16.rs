//! Real Groth16 proofs for a small withdrawal-shaped circuit.
//!
//! The circuit takes `[root, nullifier, recipient]` as public inputs and
//! enforces `quotient * nullifier = root` and `recipient * recipient = square`
//! over private `quotient` and `square`. Any non-zero nullifier has a
//! witness, so proofs can be made for whatever root the pool currently has.

use ark_bn254::{Bn254, Fq, Fr, G1Affine, G2Affine};
use ark_ff::{BigInteger, Field, PrimeField};
use ark_groth16::{Groth16, ProvingKey, VerifyingKey};
use ark_relations::lc;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use ark_std::rand::{SeedableRng, rngs::StdRng};
use mixer_pool::groth16::Groth16VerifyingKey;
use solana_bn254::compression::prelude::{alt_bn128_g1_compress, alt_bn128_g2_compress};
use std::sync::OnceLock;

#[derive(Clone, Default)]
pub struct WithdrawCircuit {
    pub root: Option<Fr>,
    pub nullifier: Option<Fr>,
    pub recipient: Option<Fr>,
}

impl WithdrawCircuit {
    pub fn new(public_inputs: &[[u8; 32]; 3]) -> Self {
        let [root, nullifier, recipient] = public_inputs.map(|x| Fr::from_be_bytes_mod_order(&x));
        Self {
            root: Some(root),
            nullifier: Some(nullifier),
            recipient: Some(recipient),
        }
    }
}

impl ConstraintSynthesizer<Fr> for WithdrawCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let root = cs.new_input_variable(|| self.root.ok_or(SynthesisError::AssignmentMissing))?;
        let nullifier =
            cs.new_input_variable(|| self.nullifier.ok_or(SynthesisError::AssignmentMissing))?;
        let recipient =
            cs.new_input_variable(|| self.recipient.ok_or(SynthesisError::AssignmentMissing))?;

        let quotient = cs.new_witness_variable(|| {
            let root = self.root.ok_or(SynthesisError::AssignmentMissing)?;
            let inverse = self
                .nullifier
                .and_then(|n| n.inverse())
                .ok_or(SynthesisError::AssignmentMissing)?;
            Ok(root * inverse)
        })?;
        let square = cs.new_witness_variable(|| {
            self.recipient
                .map(|r| r.square())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;

        cs.enforce_constraint(lc!() + quotient, lc!() + nullifier, lc!() + root)?;
        cs.enforce_constraint(lc!() + recipient, lc!() + recipient, lc!() + square)?;
        Ok(())
    }
}

/// Same deterministic generator as `ark_std::test_rng()` (fixed seed), but as
/// the concrete `StdRng` so it satisfies the `CryptoRng` bound.
fn test_rng() -> StdRng {
    StdRng::from_seed([
        1, 0, 0, 0, 23, 0, 0, 0, 200, 1, 0, 0, 210, 30, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ])
}

/// Proving key plus the verifying key in the pool's big-endian layout.
pub struct Groth16Fixture {
    pub pk: ProvingKey<Bn254>,
    pub ark_vk: VerifyingKey<Bn254>,
    pub vk: Groth16VerifyingKey,
}

impl Groth16Fixture {
    /// Shared deterministic setup.
    pub fn get() -> &'static Self {
        static FIXTURE: OnceLock<Groth16Fixture> = OnceLock::new();
        FIXTURE.get_or_init(|| {
            let mut rng = test_rng();
            let (pk, ark_vk) =
                Groth16::<Bn254>::circuit_specific_setup(WithdrawCircuit::default(), &mut rng)
                    .expect("setup");
            let vk = Groth16VerifyingKey {
                alpha_g1: g1_be(&ark_vk.alpha_g1),
                beta_g2: g2_be(&ark_vk.beta_g2),
                gamma_g2: g2_be(&ark_vk.gamma_g2),
                delta_g2: g2_be(&ark_vk.delta_g2),
                ic: ark_vk.gamma_abc_g1.iter().map(g1_be).collect(),
            };
            Self { pk, ark_vk, vk }
        })
    }

    /// 128-byte compressed proof (`A | B | C`) for `[root, nullifier, recipient]`.
    pub fn prove(&self, public_inputs: &[[u8; 32]; 3]) -> Vec<u8> {
        let mut rng = test_rng();
        let circuit = WithdrawCircuit::new(public_inputs);
        let proof = Groth16::<Bn254>::prove(&self.pk, circuit, &mut rng).expect("prove");

        let inputs: Vec<Fr> = public_inputs
            .iter()
            .map(|x| Fr::from_be_bytes_mod_order(x))
            .collect();
        assert!(
            Groth16::<Bn254>::verify(&self.ark_vk, &inputs, &proof).expect("native verify"),
            "arkworks rejected its own proof"
        );

        let a = alt_bn128_g1_compress(&g1_be(&proof.a)).expect("compress A");
        let b = alt_bn128_g2_compress(&g2_be(&proof.b)).expect("compress B");
        let c = alt_bn128_g1_compress(&g1_be(&proof.c)).expect("compress C");
        [a.as_slice(), b.as_slice(), c.as_slice()].concat()
    }
}

/// Big-endian scalar as the pool passes it to the verifier.
pub fn fr_be(value: Fr) -> [u8; 32] {
    value
        .into_bigint()
        .to_bytes_be()
        .try_into()
        .expect("32-byte scalar")
}

fn fq_be(value: Fq) -> [u8; 32] {
    value
        .into_bigint()
        .to_bytes_be()
        .try_into()
        .expect("32-byte coordinate")
}

/// `x | y`, big-endian.
fn g1_be(point: &G1Affine) -> [u8; 64] {
    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&fq_be(point.x));
    out[32..].copy_from_slice(&fq_be(point.y));
    out
}

/// `x.c1 | x.c0 | y.c1 | y.c0`, big-endian.
fn g2_be(point: &G2Affine) -> [u8; 128] {
    let mut out = [0u8; 128];
    for (slot, coordinate) in [point.x.c1, point.x.c0, point.y.c1, point.y.c0]
        .into_iter()
        .enumerate()
    {
        out[slot * 32..(slot + 1) * 32].copy_from_slice(&fq_be(coordinate));
    }
    out
}

//! Withdrawal proof verification seam.

use crate::errors::Groth16Error;
use crate::groth16::{CompressedGroth16Proof, Groth16VerifyingKey, verify_groth16};
use pinocchio_log::log;

/// Public inputs of the withdrawal circuit: `[root, nullifier, recipient]`.
pub const WITHDRAW_PUBLIC_INPUTS: usize = 3;

/// Checks a withdrawal proof against its public inputs.
///
/// Implementations must be pure. The pool calls `verify` at most once per
/// withdrawal and never retries a rejection.
pub trait ProofVerifier {
    /// `public_inputs` is `[root, nullifier, recipient]`, each a big-endian
    /// BN254 scalar field element.
    fn verify(&self, proof: &[u8], public_inputs: &[[u8; 32]]) -> bool;
}

impl<V: ProofVerifier + ?Sized> ProofVerifier for &V {
    fn verify(&self, proof: &[u8], public_inputs: &[[u8; 32]]) -> bool {
        (**self).verify(proof, public_inputs)
    }
}

/// Production verifier for compressed Groth16 proofs over BN254.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Groth16ProofVerifier {
    vk: Groth16VerifyingKey,
}

impl Groth16ProofVerifier {
    /// Wrap the withdrawal circuit's verifying key.
    ///
    /// # Errors
    /// [`Groth16Error::InvalidPublicInputsLength`] unless the key takes exactly
    /// [`WITHDRAW_PUBLIC_INPUTS`] inputs.
    pub fn new(vk: Groth16VerifyingKey) -> Result<Self, Groth16Error> {
        if vk.ic.len() != WITHDRAW_PUBLIC_INPUTS + 1 {
            log!("groth16: verifying key has {} ic points", vk.ic.len() as u64);
            return Err(Groth16Error::InvalidPublicInputsLength);
        }
        Ok(Self { vk })
    }

    /// The wrapped verifying key.
    pub fn verifying_key(&self) -> &Groth16VerifyingKey {
        &self.vk
    }
}

impl ProofVerifier for Groth16ProofVerifier {
    fn verify(&self, proof: &[u8], public_inputs: &[[u8; 32]]) -> bool {
        let result = CompressedGroth16Proof::from_bytes(proof)
            .and_then(|compressed| verify_groth16(&compressed, public_inputs, &self.vk));
        match result {
            Ok(valid) => valid,
            Err(error) => {
                log!("groth16: proof rejected ({})", error as u32 as u64);
                false
            }
        }
    }
}

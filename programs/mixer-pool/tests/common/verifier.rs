//! Proof verifiers for tests.
//!
//! [`WitnessVerifier`] checks in the clear what the withdrawal circuit proves
//! in zero knowledge: the "proof" is the borsh-encoded private witness.

use borsh::{BorshDeserialize, BorshSerialize};
use mixer_pool::mixer_merkle::MerkleProof;
use mixer_pool::{Note, ProofVerifier};
use std::cell::Cell;

/// Private inputs of the withdrawal circuit.
#[derive(Clone, Debug, BorshSerialize, BorshDeserialize)]
pub struct Witness {
    pub nullifier: [u8; 32],
    pub secret: [u8; 32],
    pub path: MerkleProof,
    pub recipient: [u8; 32],
}

impl Witness {
    pub fn new(note: &Note, path: MerkleProof, recipient: [u8; 32]) -> Self {
        Self {
            nullifier: note.nullifier,
            secret: note.secret,
            path,
            recipient,
        }
    }

    pub fn to_proof(&self) -> Vec<u8> {
        borsh::to_vec(self).expect("witness encodes")
    }
}

/// Accepts exactly when the witness opens `[root, nullifier_hash, recipient]`.
#[derive(Debug, Default)]
pub struct WitnessVerifier {
    pub calls: Cell<usize>,
}

impl ProofVerifier for WitnessVerifier {
    fn verify(&self, proof: &[u8], public_inputs: &[[u8; 32]]) -> bool {
        self.calls.set(self.calls.get() + 1);
        let [root, nullifier_hash, recipient] = public_inputs else {
            return false;
        };
        let Ok(witness) = Witness::try_from_slice(proof) else {
            return false;
        };
        let Ok(note) = Note::new(witness.nullifier, witness.secret) else {
            return false;
        };
        let (Ok(commitment), Ok(expected_nullifier)) = (note.commitment(), note.nullifier_hash())
        else {
            return false;
        };
        witness.path.verify(&commitment, root)
            && expected_nullifier == *nullifier_hash
            && witness.recipient == *recipient
    }
}

/// Counts calls and answers a fixed verdict.
#[derive(Debug)]
pub struct FixedVerifier {
    pub verdict: bool,
    pub calls: Cell<usize>,
    pub last_inputs: Cell<Option<[[u8; 32]; 3]>>,
}

impl FixedVerifier {
    pub fn accepting() -> Self {
        Self {
            verdict: true,
            calls: Cell::new(0),
            last_inputs: Cell::new(None),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            verdict: false,
            ..Self::accepting()
        }
    }
}

impl ProofVerifier for FixedVerifier {
    fn verify(&self, _proof: &[u8], public_inputs: &[[u8; 32]]) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.last_inputs.set(public_inputs.try_into().ok());
        self.verdict
    }
}

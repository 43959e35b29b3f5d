//! Error types for the mixer pool.
//!
//! # Error Code Reference
//!
//! ## Caller Input (0-5)
//! - 0: InvalidLeaf
//! - 1: WrongAmount
//! - 2: DuplicateCommitment
//! - 3: NullifierSpent
//! - 4: UnknownRoot
//! - 5: InvalidProof
//!
//! ## Capacity / Value Domain (6-7)
//! - 6: TreeFull
//! - 7: ValueOutOfRange
//!
//! ## Payout (8)
//! - 8: PayoutFailed
//!
//! ## Configuration / State (9-12)
//! - 9: InvalidDepth
//! - 10: InvalidDenomination
//! - 11: InvalidState
//! - 12: ArithmeticOverflow
//!
//! ## Groth16 ZK Proof Errors (100-108)
//! - 100: InvalidG1Length
//! - 101: InvalidG2Length
//! - 102: InvalidPublicInputsLength
//! - 103: PublicInputGreaterThanFieldSize
//! - 104: PreparingInputsG1MulFailed
//! - 105: PreparingInputsG1AdditionFailed
//! - 106: ProofVerificationFailed
//! - 107: InvalidG1
//! - 108: InvalidG2

use core::fmt;
use mixer_merkle::MerkleTreeError;
use pinocchio::program_error::ProgramError;

/// Groth16 ZK proof verification errors.
///
/// The ledger only sees a boolean from the verifier; these are logged and
/// useful when debugging proof generation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Groth16Error {
    /// Proof bytes are not the 128-byte compressed layout
    InvalidG1Length,
    /// G2 point has the wrong length
    InvalidG2Length,
    /// Public input count does not match the verifying key
    InvalidPublicInputsLength,
    /// A public input is not a scalar field element
    PublicInputGreaterThanFieldSize,
    /// `ic[i] * input` precompile failed
    PreparingInputsG1MulFailed,
    /// Accumulating prepared inputs failed
    PreparingInputsG1AdditionFailed,
    /// Pairing check failed or did not equal one
    ProofVerificationFailed,
    /// G1 point decompression or deserialization failed
    InvalidG1,
    /// G2 point decompression failed
    InvalidG2,
}

/// Every way a pool operation can be rejected.
///
/// A rejected operation leaves the pool byte-for-byte unchanged.
#[repr(u32)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MixerError {
    /// Commitment is zero or not a field element
    InvalidLeaf = 0,
    /// Paid value differs from the pool denomination
    WrongAmount = 1,
    /// Commitment was already deposited
    DuplicateCommitment = 2,
    /// Nullifier was already used by a withdrawal
    NullifierSpent = 3,
    /// Root is not in the recent root history
    UnknownRoot = 4,
    /// Proof verifier rejected the proof
    InvalidProof = 5,
    /// Accumulator has no free leaf slot
    TreeFull = 6,
    /// A value that must be a field element is not
    ValueOutOfRange = 7,
    /// Value release to the recipient failed; the withdrawal was rolled back
    PayoutFailed = 8,
    /// Depth outside `1..=32`
    InvalidDepth = 9,
    /// Denomination is zero
    InvalidDenomination = 10,
    /// Restored pool state is inconsistent
    InvalidState = 11,
    /// Counter or balance overflow
    ArithmeticOverflow = 12,
}

impl MixerError {
    /// Convert to error code
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Create from error code
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::InvalidLeaf),
            1 => Some(Self::WrongAmount),
            2 => Some(Self::DuplicateCommitment),
            3 => Some(Self::NullifierSpent),
            4 => Some(Self::UnknownRoot),
            5 => Some(Self::InvalidProof),
            6 => Some(Self::TreeFull),
            7 => Some(Self::ValueOutOfRange),
            8 => Some(Self::PayoutFailed),
            9 => Some(Self::InvalidDepth),
            10 => Some(Self::InvalidDenomination),
            11 => Some(Self::InvalidState),
            12 => Some(Self::ArithmeticOverflow),
            _ => None,
        }
    }
}

impl fmt::Display for MixerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidLeaf => "commitment must be a non-zero field element",
            Self::WrongAmount => "paid value must equal the pool denomination",
            Self::DuplicateCommitment => "commitment already deposited",
            Self::NullifierSpent => "nullifier already spent",
            Self::UnknownRoot => "root is not in the recent root history",
            Self::InvalidProof => "withdrawal proof rejected",
            Self::TreeFull => "merkle tree is full",
            Self::ValueOutOfRange => "value is not a BN254 scalar field element",
            Self::PayoutFailed => "payout to recipient failed",
            Self::InvalidDepth => "tree depth must be within 1..=32",
            Self::InvalidDenomination => "denomination must be positive",
            Self::InvalidState => "pool state is inconsistent",
            Self::ArithmeticOverflow => "arithmetic overflow",
        };
        f.write_str(msg)
    }
}

impl From<MerkleTreeError> for MixerError {
    fn from(error: MerkleTreeError) -> Self {
        match error {
            MerkleTreeError::InvalidLeaf => Self::InvalidLeaf,
            MerkleTreeError::TreeFull => Self::TreeFull,
            MerkleTreeError::ValueOutOfRange => Self::ValueOutOfRange,
            MerkleTreeError::InvalidDepth => Self::InvalidDepth,
            MerkleTreeError::InvalidState => Self::InvalidState,
            MerkleTreeError::ArithmeticOverflow => Self::ArithmeticOverflow,
        }
    }
}

impl From<Groth16Error> for ProgramError {
    fn from(error: Groth16Error) -> Self {
        // Groth16 errors use codes 100-108 for debugging ZK proof failures
        match error {
            Groth16Error::InvalidG1Length => ProgramError::Custom(100),
            Groth16Error::InvalidG2Length => ProgramError::Custom(101),
            Groth16Error::InvalidPublicInputsLength => ProgramError::Custom(102),
            Groth16Error::PublicInputGreaterThanFieldSize => ProgramError::Custom(103),
            Groth16Error::PreparingInputsG1MulFailed => ProgramError::Custom(104),
            Groth16Error::PreparingInputsG1AdditionFailed => ProgramError::Custom(105),
            Groth16Error::ProofVerificationFailed => ProgramError::Custom(106),
            Groth16Error::InvalidG1 => ProgramError::Custom(107),
            Groth16Error::InvalidG2 => ProgramError::Custom(108),
        }
    }
}

impl From<MixerError> for ProgramError {
    fn from(error: MixerError) -> Self {
        match error {
            MixerError::ArithmeticOverflow => ProgramError::ArithmeticOverflow,
            MixerError::InvalidState => ProgramError::InvalidAccountData,
            other => ProgramError::Custom(other.to_u32()),
        }
    }
}

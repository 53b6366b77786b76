//! Error type for proof decoding and verification.

/// Errors returned by the CometBLS Groth16 verifier.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Groth16Error {
    #[error("proof is {found} bytes, expected {expected}")]
    InvalidProofLength { expected: usize, found: usize },

    #[error("point coordinate is not a canonical base-field element")]
    NonCanonicalFieldElement,

    #[error("point is not on the curve")]
    PointNotOnCurve,

    #[error("point is not in the prime-order subgroup")]
    PointNotInSubgroup,

    #[error("chain id `{0}` exceeds 31 bytes")]
    ChainIdTooLong(String),

    #[error("verifying key carries {0} public-input points, expected at least 3")]
    MalformedVerifyingKey(usize),

    #[error("proof verification failed")]
    InvalidProof,
}

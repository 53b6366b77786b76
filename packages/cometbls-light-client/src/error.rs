use cometbls_groth16_verifier::Groth16Error;

use crate::types::Height;

/// Errors surfaced to the host caller. Every failure aborts the current
/// call; nothing is retried internally.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CometblsIBCError {
    #[error("consensus state not found at height {height}")]
    ConsensusStateNotFound { height: Height },

    #[error(
        "invalid header height: header revision ({header_revision}) does not \
        match trusted revision ({trusted_revision})"
    )]
    InvalidHeaderHeight {
        header_revision: u64,
        trusted_revision: u64,
    },

    #[error(
        "invalid header timestamp: trusted consensus state ({trusted_timestamp}) \
        is newer than the header time ({header_timestamp})"
    )]
    InvalidHeaderTimestamp {
        header_timestamp: u64,
        trusted_timestamp: u64,
    },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid misbehaviour: {0}")]
    InvalidMisbehaviour(String),

    #[error("misbehaviour header {index} failed verification")]
    MisbehaviourHeaderVerification {
        index: usize,
        #[source]
        source: Box<CometblsIBCError>,
    },

    #[error("unable to decode zero-knowledge proof: {0}")]
    ProofDecode(#[source] Groth16Error),

    #[error("zero-knowledge proof verification failed")]
    ProofVerificationFailed,

    #[error("invalid client state: {0}")]
    InvalidClientState(String),

    #[error("invalid verifying key: {0}")]
    InvalidVerifyingKey(String),
}

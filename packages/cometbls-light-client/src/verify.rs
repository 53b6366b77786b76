//! Header verification against the trusted consensus state.

use cometbls_groth16_verifier::{verify_zkp, Groth16Error, VerifyingKey};

use crate::client_state::ClientState;
use crate::ensure;
use crate::error::CometblsIBCError;
use crate::header::Header;
use crate::store::ConsensusStateReader;
use crate::types::Timestamp;

/// Validates a candidate header against the consensus state at its trusted
/// height and checks the accompanying zero-knowledge proof.
///
/// Performs no mutation; on success the caller derives the new consensus
/// state from the header (`ConsensusState::from`). Freeze status is the
/// host's concern and is not re-checked here.
///
/// # Errors
/// Each precondition failure aborts with the corresponding error kind; see
/// [`CometblsIBCError`].
pub fn verify_header<S: ConsensusStateReader>(
    client_state: &ClientState,
    store: &S,
    verifying_key: &VerifyingKey,
    current_time: Timestamp,
    header: &Header,
) -> Result<(), CometblsIBCError> {
    let trusted_consensus_state = store.consensus_state(header.trusted_height).ok_or(
        CometblsIBCError::ConsensusStateNotFound {
            height: header.trusted_height,
        },
    )?;

    let header_height = header.height();
    ensure!(
        header_height.revision_number == header.trusted_height.revision_number,
        CometblsIBCError::InvalidHeaderHeight {
            header_revision: header_height.revision_number,
            trusted_revision: header.trusted_height.revision_number,
        }
    );

    let header_time = header.signed_header.time.checked_unix_nanos().ok_or_else(|| {
        CometblsIBCError::InvalidHeader(format!(
            "header time ({}s) does not fit a u64 nanosecond timestamp",
            header.signed_header.time.seconds
        ))
    })?;
    ensure!(
        trusted_consensus_state.timestamp <= header_time,
        CometblsIBCError::InvalidHeaderTimestamp {
            header_timestamp: header_time,
            trusted_timestamp: trusted_consensus_state.timestamp,
        }
    );

    ensure!(
        header_height > header.trusted_height,
        CometblsIBCError::InvalidHeader(format!(
            "header height ({header_height}) must be greater than the trusted \
            height ({})",
            header.trusted_height
        ))
    );

    ensure!(
        header_time
            < current_time
                .as_unix_nanos()
                .saturating_add(client_state.max_clock_drift),
        CometblsIBCError::InvalidHeader(format!(
            "header time ({header_time}) is beyond the maximum clock drift \
            from the current block time ({})",
            current_time.as_unix_nanos()
        ))
    );

    // Adjacent updates extend the trusted state directly, so the signing
    // validator set must be exactly the one the trusted state announced.
    if header_height.revision_height == header.trusted_height.revision_height + 1 {
        ensure!(
            header.signed_header.validators_hash == trusted_consensus_state.next_validators_hash,
            CometblsIBCError::InvalidHeader(format!(
                "adjacent update validators hash ({}) does not match the \
                trusted next validators hash ({})",
                header.signed_header.validators_hash,
                trusted_consensus_state.next_validators_hash
            ))
        );
    }

    verify_zkp(
        verifying_key,
        trusted_consensus_state.next_validators_hash,
        &header.signed_header,
        &header.zero_knowledge_proof,
    )
    .map_err(map_proof_error)
}

fn map_proof_error(err: Groth16Error) -> CometblsIBCError {
    match err {
        Groth16Error::InvalidProof => CometblsIBCError::ProofVerificationFailed,
        Groth16Error::ChainIdTooLong(id) => {
            CometblsIBCError::InvalidHeader(format!("chain id `{id}` exceeds 31 bytes"))
        }
        Groth16Error::MalformedVerifyingKey(n) => CometblsIBCError::InvalidVerifyingKey(format!(
            "carries {n} public-input points, expected at least 3"
        )),
        decode => CometblsIBCError::ProofDecode(decode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use cometbls_groth16_verifier::test_utils::{
        permissive_verifying_key, rejecting_verifying_key,
    };

    use crate::test_utils::{
        host_time, seeded_store, test_client_state, test_header, TRUSTED_HEIGHT,
    };
    use crate::types::Height;

    #[test]
    fn accepts_a_valid_header() {
        let store = seeded_store();
        let header = test_header(TRUSTED_HEIGHT, 11, 2_000);
        verify_header(
            &test_client_state(),
            &store,
            &permissive_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap();
    }

    #[test]
    fn fails_when_trusted_height_is_missing() {
        let store = seeded_store();
        let mut header = test_header(TRUSTED_HEIGHT, 11, 2_000);
        header.trusted_height = Height::new(1, 999);
        let err = verify_header(
            &test_client_state(),
            &store,
            &permissive_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CometblsIBCError::ConsensusStateNotFound {
                height: Height::new(1, 999)
            }
        );
    }

    #[test]
    fn fails_on_revision_mismatch() {
        let store = seeded_store();
        let mut header = test_header(TRUSTED_HEIGHT, 11, 2_000);
        // A different chain id suffix moves the header to another revision.
        header.signed_header.chain_id = "cometbls-testnet-2".into();
        let err = verify_header(
            &test_client_state(),
            &store,
            &permissive_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CometblsIBCError::InvalidHeaderHeight {
                header_revision: 2,
                trusted_revision: 1,
            }
        );
    }

    #[test]
    fn fails_when_trusted_state_is_newer_than_header() {
        let store = seeded_store();
        // The seeded trusted state is at 1_000s; claim an earlier time.
        let header = test_header(TRUSTED_HEIGHT, 11, 999);
        let err = verify_header(
            &test_client_state(),
            &store,
            &permissive_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CometblsIBCError::InvalidHeaderTimestamp { .. }
        ));
    }

    #[test]
    fn rejects_header_time_beyond_nanosecond_range() {
        let store = seeded_store();
        let mut header = test_header(TRUSTED_HEIGHT, 11, 2_000);
        header.signed_header.time.seconds = u64::MAX;
        let err = verify_header(
            &test_client_state(),
            &store,
            &permissive_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap_err();
        assert!(matches!(err, CometblsIBCError::InvalidHeader(_)));
    }

    #[test]
    fn fails_on_non_increasing_height() {
        let store = seeded_store();
        let header = test_header(TRUSTED_HEIGHT, TRUSTED_HEIGHT.revision_height, 2_000);
        let err = verify_header(
            &test_client_state(),
            &store,
            &permissive_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap_err();
        assert!(matches!(err, CometblsIBCError::InvalidHeader(_)));
    }

    #[test]
    fn fails_when_header_time_exceeds_clock_drift() {
        let store = seeded_store();
        let mut client_state = test_client_state();
        client_state.max_clock_drift = 1; // one nanosecond
        let header = test_header(TRUSTED_HEIGHT, 11, 2_000);
        let err = verify_header(
            &client_state,
            &store,
            &permissive_verifying_key(),
            host_time(1_500),
            &header,
        )
        .unwrap_err();
        assert!(matches!(err, CometblsIBCError::InvalidHeader(_)));
    }

    #[test]
    fn adjacent_update_requires_matching_validators_hash() {
        let store = seeded_store();
        let mut header = test_header(TRUSTED_HEIGHT, TRUSTED_HEIGHT.revision_height + 1, 2_000);
        header.signed_header.validators_hash = B256::repeat_byte(0xaa);
        let err = verify_header(
            &test_client_state(),
            &store,
            &permissive_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap_err();
        assert!(matches!(err, CometblsIBCError::InvalidHeader(_)));
    }

    #[test]
    fn propagates_proof_verification_failure() {
        let store = seeded_store();
        let header = test_header(TRUSTED_HEIGHT, 11, 2_000);
        let err = verify_header(
            &test_client_state(),
            &store,
            &rejecting_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap_err();
        assert_eq!(err, CometblsIBCError::ProofVerificationFailed);
    }

    #[test]
    fn propagates_proof_decode_failure() {
        let store = seeded_store();
        let mut header = test_header(TRUSTED_HEIGHT, 11, 2_000);
        header.zero_knowledge_proof = vec![0_u8; 10].into();
        let err = verify_header(
            &test_client_state(),
            &store,
            &permissive_verifying_key(),
            host_time(2_100),
            &header,
        )
        .unwrap_err();
        assert!(matches!(err, CometblsIBCError::ProofDecode(_)));
    }
}

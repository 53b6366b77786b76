//! This module defines [`Misbehaviour`] and its verification.

use cometbls_groth16_verifier::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::client_state::ClientState;
use crate::ensure;
use crate::error::CometblsIBCError;
use crate::header::Header;
use crate::store::ConsensusStateReader;
use crate::types::Timestamp;
use crate::verify::verify_header;

/// Evidence that the counterparty chain produced conflicting or
/// time-inconsistent histories: two independently provable headers that
/// cannot both belong to one honest chain.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Misbehaviour {
    /// The client the evidence is submitted against.
    #[serde(default)]
    pub client_id: String,
    /// The later (or conflicting) header.
    pub header_1: Header,
    /// The earlier header it contradicts.
    pub header_2: Header,
}

impl Misbehaviour {
    /// Structural well-formedness: both headers must belong to the same
    /// chain and respect the `header_1`-is-later convention.
    ///
    /// # Errors
    /// Returns [`CometblsIBCError::InvalidMisbehaviour`] naming the
    /// violated constraint.
    pub fn validate_basic(&self) -> Result<(), CometblsIBCError> {
        ensure!(
            self.header_1.signed_header.chain_id == self.header_2.signed_header.chain_id,
            CometblsIBCError::InvalidMisbehaviour(format!(
                "headers carry different chain ids (`{}` and `{}`)",
                self.header_1.signed_header.chain_id, self.header_2.signed_header.chain_id
            ))
        );
        ensure!(
            self.header_1.height() >= self.header_2.height(),
            CometblsIBCError::InvalidMisbehaviour(format!(
                "header 1 height ({}) is less than header 2 height ({})",
                self.header_1.height(),
                self.header_2.height()
            ))
        );
        Ok(())
    }
}

/// Verifies misbehaviour evidence.
///
/// Both headers must independently pass full header verification against
/// their own trusted heights. Headers building on the same trusted height
/// must then differ in content (a fork); headers building on different
/// trusted heights must break time monotonicity, i.e. the later
/// `header_1` must not carry a later timestamp than `header_2`.
///
/// On success the caller freezes the client via
/// [`crate::update::update_state_on_misbehaviour`].
pub fn verify_misbehaviour<S: ConsensusStateReader>(
    client_state: &ClientState,
    store: &S,
    verifying_key: &VerifyingKey,
    current_time: Timestamp,
    misbehaviour: &Misbehaviour,
) -> Result<(), CometblsIBCError> {
    misbehaviour.validate_basic()?;

    verify_header(
        client_state,
        store,
        verifying_key,
        current_time,
        &misbehaviour.header_1,
    )
    .map_err(|source| CometblsIBCError::MisbehaviourHeaderVerification {
        index: 1,
        source: Box::new(source),
    })?;

    verify_header(
        client_state,
        store,
        verifying_key,
        current_time,
        &misbehaviour.header_2,
    )
    .map_err(|source| CometblsIBCError::MisbehaviourHeaderVerification {
        index: 2,
        source: Box::new(source),
    })?;

    if misbehaviour.header_1.trusted_height == misbehaviour.header_2.trusted_height {
        ensure!(
            misbehaviour.header_1.signed_header != misbehaviour.header_2.signed_header,
            CometblsIBCError::InvalidMisbehaviour("headers are the same".into())
        );
    } else {
        ensure!(
            misbehaviour.header_1.signed_header.time <= misbehaviour.header_2.signed_header.time,
            CometblsIBCError::InvalidMisbehaviour("headers are in the correct order".into())
        );
    }

    Ok(())
}

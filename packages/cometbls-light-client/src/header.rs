//! This module defines the [`Header`] client message.

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

pub use cometbls_groth16_verifier::types::{LightHeader, Timestamp};

use crate::types::Height;

/// A candidate header update: the signed header fields, a pointer at the
/// consensus state it extends and the proof that the trusted validator set
/// produced it.
///
/// Transient input; only the derived [`crate::consensus_state::ConsensusState`]
/// is ever stored.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct Header {
    /// The signed block header fields.
    pub signed_header: LightHeader,
    /// The height of an existing consensus state this update builds on.
    pub trusted_height: Height,
    /// The 384-byte proof blob.
    pub zero_knowledge_proof: Bytes,
}

impl Header {
    /// The height this header claims, with the revision number taken from
    /// the chain id suffix.
    #[must_use]
    pub fn height(&self) -> Height {
        Height::new(
            parse_revision_number(&self.signed_header.chain_id),
            self.signed_header.height,
        )
    }
}

/// Extracts the revision number from a chain id of the form
/// `{name}-{revision}`; ids without a numeric suffix are revision 0.
#[must_use]
pub fn parse_revision_number(chain_id: &str) -> u64 {
    chain_id
        .rsplit_once('-')
        .and_then(|(_, suffix)| suffix.parse().ok())
        .unwrap_or(0)
}

//! This module defines [`ConsensusState`].

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::header::Header;

/// A verified checkpoint of the counterparty chain, one per accepted
/// height. Created by `update_state`, deleted only by pruning.
///
/// Equality is field-by-field and is what duplicate/idempotent submission
/// detection relies on.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ConsensusState {
    /// Header time in nanoseconds since the unix epoch.
    pub timestamp: u64,
    /// Commitment to the application state, derived from the header's app
    /// hash.
    pub root: B256,
    /// Hash of the validator set for the next block.
    pub next_validators_hash: B256,
}

impl ConsensusState {
    /// Whether this state has outlived the trusting period at
    /// `current_time` (nanoseconds).
    #[must_use]
    pub const fn is_expired(&self, trusting_period: u64, current_time: u64) -> bool {
        self.timestamp.saturating_add(trusting_period) <= current_time
    }
}

impl From<&Header> for ConsensusState {
    fn from(header: &Header) -> Self {
        Self {
            timestamp: header.signed_header.time.as_unix_nanos(),
            root: header.signed_header.app_hash,
            next_validators_hash: header.signed_header.next_validators_hash,
        }
    }
}

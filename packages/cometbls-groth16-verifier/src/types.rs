//! Header fields bound into the proof's public input.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// A point in time, split the way the signed header carries it.
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default)]
pub struct Timestamp {
    /// Seconds since the unix epoch.
    pub seconds: u64,
    /// Sub-second fraction in nanoseconds.
    pub nanos: u32,
}

impl Timestamp {
    /// Total nanoseconds since the unix epoch, saturating at `u64::MAX`.
    #[must_use]
    pub const fn as_unix_nanos(&self) -> u64 {
        self.seconds
            .saturating_mul(1_000_000_000)
            .saturating_add(self.nanos as u64)
    }

    /// Total nanoseconds since the unix epoch, or `None` when the time does
    /// not fit a `u64` nanosecond count. Header times come from untrusted
    /// input and must go through this before any arithmetic on them.
    #[must_use]
    pub const fn checked_unix_nanos(&self) -> Option<u64> {
        match self.seconds.checked_mul(1_000_000_000) {
            Some(nanos) => nanos.checked_add(self.nanos as u64),
            None => None,
        }
    }
}

/// The signed block header fields the proof commits to.
///
/// This is the transient input to verification; the light client derives a
/// consensus state from it but never stores the header itself.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct LightHeader {
    /// The chain id, at most 31 bytes so it fits a single field element slot.
    pub chain_id: String,
    /// The block number.
    pub height: u64,
    /// The block time.
    pub time: Timestamp,
    /// Hash of the validator set that signed this header.
    pub validators_hash: B256,
    /// Hash of the validator set for the next block.
    pub next_validators_hash: B256,
    /// Commitment to the application state.
    pub app_hash: B256,
}

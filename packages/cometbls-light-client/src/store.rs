//! The consensus-state store contract consumed by the core.
//!
//! The host provides an ordered, height-keyed persistent map plus
//! per-height processing metadata. The core treats it as synchronous and
//! always available; it performs read-then-write sequences that rely on
//! the host providing exclusive access for the duration of a call.

use serde::{Deserialize, Serialize};

use crate::consensus_state::ConsensusState;
use crate::types::Height;

/// When a consensus state was accepted, in host time and host height.
/// Consumed only by external collaborators (e.g. delay-period checks).
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ProcessedMetadata {
    /// Host wall-clock time at processing, nanoseconds since the epoch.
    pub processed_time: u64,
    /// Host block height at processing.
    pub processed_height: u64,
}

/// Read access to the height-ordered consensus-state map.
pub trait ConsensusStateReader {
    /// The consensus state at `height`, if that height was accepted and
    /// not yet pruned.
    fn consensus_state(&self, height: Height) -> Option<ConsensusState>;

    /// The processing metadata recorded at `height`.
    fn processed_metadata(&self, height: Height) -> Option<ProcessedMetadata>;

    /// The lowest stored height (the head of ascending iteration).
    fn first_height(&self) -> Option<Height>;

    /// The greatest stored height strictly below `height`.
    fn prev_height(&self, height: Height) -> Option<Height>;

    /// The least stored height strictly above `height`.
    fn next_height(&self, height: Height) -> Option<Height>;
}

/// Write access on top of [`ConsensusStateReader`].
pub trait ConsensusStateStore: ConsensusStateReader {
    fn set_consensus_state(&mut self, height: Height, consensus_state: &ConsensusState);
    fn delete_consensus_state(&mut self, height: Height);
    fn set_processed_metadata(&mut self, height: Height, metadata: &ProcessedMetadata);
    fn delete_processed_metadata(&mut self, height: Height);
}

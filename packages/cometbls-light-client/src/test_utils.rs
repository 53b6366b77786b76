//! Test fixtures: an in-memory store and canned client/header values.

use std::collections::BTreeMap;
use std::ops::Bound;

use alloy_primitives::B256;
use cometbls_groth16_verifier::test_utils::zero_proof_bytes;
use cometbls_groth16_verifier::types::LightHeader;

use crate::client_state::ClientState;
use crate::consensus_state::ConsensusState;
use crate::header::Header;
use crate::store::{ConsensusStateReader, ConsensusStateStore, ProcessedMetadata};
use crate::types::{Height, Timestamp};

pub const TEST_CHAIN_ID: &str = "cometbls-testnet-1";

/// The height the seeded store holds a consensus state at.
pub const TRUSTED_HEIGHT: Height = Height::new(1, 10);

const VALIDATORS_HASH: B256 = B256::repeat_byte(0x01);
const APP_HASH: B256 = B256::repeat_byte(0x02);

/// A [`ConsensusStateStore`] over two ordered maps, mirroring the shape of
/// a host key-value store.
#[derive(Default, Clone, Debug)]
pub struct MemoryStore {
    consensus_states: BTreeMap<Height, ConsensusState>,
    metadata: BTreeMap<Height, ProcessedMetadata>,
}

impl ConsensusStateReader for MemoryStore {
    fn consensus_state(&self, height: Height) -> Option<ConsensusState> {
        self.consensus_states.get(&height).copied()
    }

    fn processed_metadata(&self, height: Height) -> Option<ProcessedMetadata> {
        self.metadata.get(&height).copied()
    }

    fn first_height(&self) -> Option<Height> {
        self.consensus_states.keys().next().copied()
    }

    fn prev_height(&self, height: Height) -> Option<Height> {
        self.consensus_states
            .range(..height)
            .next_back()
            .map(|(height, _)| *height)
    }

    fn next_height(&self, height: Height) -> Option<Height> {
        self.consensus_states
            .range((Bound::Excluded(height), Bound::Unbounded))
            .next()
            .map(|(height, _)| *height)
    }
}

impl ConsensusStateStore for MemoryStore {
    fn set_consensus_state(&mut self, height: Height, consensus_state: &ConsensusState) {
        self.consensus_states.insert(height, *consensus_state);
    }

    fn delete_consensus_state(&mut self, height: Height) {
        self.consensus_states.remove(&height);
    }

    fn set_processed_metadata(&mut self, height: Height, metadata: &ProcessedMetadata) {
        self.metadata.insert(height, *metadata);
    }

    fn delete_processed_metadata(&mut self, height: Height) {
        self.metadata.remove(&height);
    }
}

/// A whole-second [`Timestamp`].
#[must_use]
pub const fn host_time(seconds: u64) -> Timestamp {
    Timestamp { seconds, nanos: 0 }
}

/// A client state with a 2000 s trusting period and a 600 s clock drift
/// allowance, latest at [`TRUSTED_HEIGHT`].
#[must_use]
pub fn test_client_state() -> ClientState {
    ClientState {
        chain_id: TEST_CHAIN_ID.into(),
        trusting_period: 2_000 * 1_000_000_000,
        max_clock_drift: 600 * 1_000_000_000,
        latest_height: TRUSTED_HEIGHT,
        frozen_height: None,
    }
}

/// A consensus state stamped at `seconds`, with the fixture hashes.
#[must_use]
pub fn test_consensus_state(seconds: u64) -> ConsensusState {
    ConsensusState {
        timestamp: host_time(seconds).as_unix_nanos(),
        root: APP_HASH,
        next_validators_hash: VALIDATORS_HASH,
    }
}

/// A header at `height` stamped at `seconds`, trusting `trusted_height`,
/// carrying an all-zero (identity-point) proof blob.
#[must_use]
pub fn test_header(trusted_height: Height, height: u64, seconds: u64) -> Header {
    Header {
        signed_header: LightHeader {
            chain_id: TEST_CHAIN_ID.into(),
            height,
            time: host_time(seconds),
            validators_hash: VALIDATORS_HASH,
            next_validators_hash: VALIDATORS_HASH,
            app_hash: APP_HASH,
        },
        trusted_height,
        zero_knowledge_proof: zero_proof_bytes().into(),
    }
}

/// A store holding a single consensus state at [`TRUSTED_HEIGHT`], stamped
/// at 1000 s.
#[must_use]
pub fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::default();
    store.set_consensus_state(TRUSTED_HEIGHT, &test_consensus_state(1_000));
    store.set_processed_metadata(
        TRUSTED_HEIGHT,
        &ProcessedMetadata {
            processed_time: host_time(1_000).as_unix_nanos(),
            processed_height: 100,
        },
    );
    store
}

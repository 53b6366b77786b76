//! Storage layout and accessors for the CometBLS light-client contract.
//!
//! Client and consensus states are persisted the way `ibc-go` expects
//! them: wrapped in `wasm.v1` protobuf `Any` envelopes, with the inner
//! payload JSON-encoded. Consensus states and processing metadata are
//! keyed by fixed-width hexadecimal heights so that the byte order of the
//! keys is the numeric order of the heights, which makes neighbour and
//! oldest-entry lookups single range reads.

use ark_serialize::CanonicalDeserialize;
use cometbls_groth16_verifier::VerifyingKey;
use cometbls_light_client::client_state::ClientState;
use cometbls_light_client::consensus_state::ConsensusState;
use cometbls_light_client::store::{ConsensusStateReader, ConsensusStateStore, ProcessedMetadata};
use cometbls_light_client::types::Height;
use cosmwasm_std::{Order, Storage};
use ibc_proto::google::protobuf::Any;
use ibc_proto::ibc::core::client::v1::Height as IbcProtoHeight;
use ibc_proto::ibc::lightclients::wasm::v1::{
    ClientState as WasmClientState, ConsensusState as WasmConsensusState,
};
use prost::{Message, Name};

use crate::error::ContractError;

/// The store key used by `ibc-go` to store the client state.
pub const HOST_CLIENT_STATE_KEY: &str = "clientState";
/// The store key prefix used by `ibc-go` for consensus states.
pub const HOST_CONSENSUS_STATES_KEY: &str = "consensusStates";
/// The store key prefix for per-height processing metadata.
pub const PROCESSED_METADATA_KEY: &str = "processedMetadata";
/// The store key holding the canonically-serialized Groth16 verifying key.
pub const VERIFYING_KEY_KEY: &str = "verifyingKey";
/// The store key holding the governance authority address.
pub const AUTHORITY_KEY: &str = "authority";

/// The key for the consensus state at `height`.
#[must_use]
pub fn consensus_db_key(height: Height) -> String {
    height_db_key(HOST_CONSENSUS_STATES_KEY, height)
}

/// The key for the processing metadata at `height`.
#[must_use]
pub fn metadata_db_key(height: Height) -> String {
    height_db_key(PROCESSED_METADATA_KEY, height)
}

fn height_db_key(namespace: &str, height: Height) -> String {
    format!(
        "{namespace}/{:016x}-{:016x}",
        height.revision_number, height.revision_height
    )
}

/// The byte-range bounds covering every key under `namespace`.
fn namespace_bounds(namespace: &str) -> (Vec<u8>, Vec<u8>) {
    let start = format!("{namespace}/").into_bytes();
    let mut end = namespace.as_bytes().to_vec();
    end.push(b'/' + 1);
    (start, end)
}

/// Recovers the height from a key produced by [`consensus_db_key`] or
/// [`metadata_db_key`].
fn parse_height_db_key(key: &[u8]) -> Option<Height> {
    let suffix = key.split(|byte| *byte == b'/').next_back()?;
    let suffix = std::str::from_utf8(suffix).ok()?;
    let (revision_number, revision_height) = suffix.split_once('-')?;
    Some(Height::new(
        u64::from_str_radix(revision_number, 16).ok()?,
        u64::from_str_radix(revision_height, 16).ok()?,
    ))
}

/// Reads the wasm-wrapped client state envelope.
///
/// # Errors
/// Fails if the client state was never stored or does not decode.
pub fn get_wasm_client_state(storage: &dyn Storage) -> Result<WasmClientState, ContractError> {
    let any_bz = storage
        .get(HOST_CLIENT_STATE_KEY.as_bytes())
        .ok_or(ContractError::ClientStateNotFound)?;
    let any = Any::decode(any_bz.as_slice())?;
    Ok(WasmClientState::decode(any.value.as_slice())?)
}

/// Reads the light-client state out of its envelope.
///
/// # Errors
/// Fails if the client state was never stored or does not decode.
pub fn get_client_state(storage: &dyn Storage) -> Result<ClientState, ContractError> {
    let wasm_client_state = get_wasm_client_state(storage)?;
    serde_json::from_slice(&wasm_client_state.data)
        .map_err(ContractError::DeserializeClientStateFailed)
}

/// Writes the wasm-wrapped client state envelope.
pub fn set_wasm_client_state(storage: &mut dyn Storage, wasm_client_state: &WasmClientState) {
    storage.set(
        HOST_CLIENT_STATE_KEY.as_bytes(),
        wrap_any(wasm_client_state).encode_to_vec().as_slice(),
    );
}

/// Writes `client_state`, wrapped in the wasm envelope, carrying
/// `checksum` as recorded at instantiation.
///
/// # Errors
/// Fails if the client state does not serialize.
pub fn set_client_state(
    storage: &mut dyn Storage,
    checksum: Vec<u8>,
    client_state: &ClientState,
) -> Result<(), ContractError> {
    let wasm_client_state = WasmClientState {
        checksum,
        data: serde_json::to_vec(client_state)
            .map_err(ContractError::SerializeClientStateFailed)?,
        latest_height: Some(IbcProtoHeight {
            revision_number: client_state.latest_height.revision_number,
            revision_height: client_state.latest_height.revision_height,
        }),
    };
    set_wasm_client_state(storage, &wasm_client_state);
    Ok(())
}

/// Reads and canonically deserializes the Groth16 verifying key.
///
/// # Errors
/// Fails with [`ContractError::VerifyingKeyNotSet`] before governance has
/// stored a key, or with [`ContractError::InvalidVerifyingKey`] if the
/// stored bytes do not deserialize.
pub fn get_verifying_key(storage: &dyn Storage) -> Result<VerifyingKey, ContractError> {
    let bz = storage
        .get(VERIFYING_KEY_KEY.as_bytes())
        .ok_or(ContractError::VerifyingKeyNotSet)?;
    VerifyingKey::deserialize_compressed(bz.as_slice())
        .map_err(|err| ContractError::InvalidVerifyingKey(err.to_string()))
}

/// All stored processing metadata, ascending by height.
#[must_use]
pub fn all_processed_metadata(storage: &dyn Storage) -> Vec<(Height, Vec<u8>)> {
    let (start, end) = namespace_bounds(PROCESSED_METADATA_KEY);
    storage
        .range(Some(&start), Some(&end), Order::Ascending)
        .filter_map(|(key, value)| Some((parse_height_db_key(&key)?, value)))
        .collect()
}

/// Wraps a protobuf message in a `google.protobuf.Any` envelope.
fn wrap_any<M: Message + Name>(message: &M) -> Any {
    Any {
        type_url: M::type_url(),
        value: message.encode_to_vec(),
    }
}

fn read_consensus_state(storage: &dyn Storage, height: Height) -> Option<ConsensusState> {
    let any_bz = storage.get(consensus_db_key(height).as_bytes())?;
    let any = Any::decode(any_bz.as_slice())
        .expect("corrupted client store: undecodable consensus state envelope");
    let wasm_consensus_state = WasmConsensusState::decode(any.value.as_slice())
        .expect("corrupted client store: undecodable wasm consensus state");
    Some(
        serde_json::from_slice(&wasm_consensus_state.data)
            .expect("corrupted client store: undecodable consensus state"),
    )
}

fn read_processed_metadata(storage: &dyn Storage, height: Height) -> Option<ProcessedMetadata> {
    let bz = storage.get(metadata_db_key(height).as_bytes())?;
    Some(
        serde_json::from_slice(&bz)
            .expect("corrupted client store: undecodable processing metadata"),
    )
}

fn first_stored_height(storage: &dyn Storage) -> Option<Height> {
    let (start, end) = namespace_bounds(HOST_CONSENSUS_STATES_KEY);
    storage
        .range_keys(Some(&start), Some(&end), Order::Ascending)
        .next()
        .and_then(|key| parse_height_db_key(&key))
}

fn prev_stored_height(storage: &dyn Storage, height: Height) -> Option<Height> {
    let (start, _) = namespace_bounds(HOST_CONSENSUS_STATES_KEY);
    let end = consensus_db_key(height).into_bytes();
    storage
        .range_keys(Some(&start), Some(&end), Order::Descending)
        .next()
        .and_then(|key| parse_height_db_key(&key))
}

fn next_stored_height(storage: &dyn Storage, height: Height) -> Option<Height> {
    // The range start bound is inclusive, so step just past the exact key.
    let mut start = consensus_db_key(height).into_bytes();
    start.push(0);
    let (_, end) = namespace_bounds(HOST_CONSENSUS_STATES_KEY);
    storage
        .range_keys(Some(&start), Some(&end), Order::Ascending)
        .next()
        .and_then(|key| parse_height_db_key(&key))
}

/// The read side of the consensus-state store over host storage.
pub struct ReadonlyConsensusStore<'a> {
    storage: &'a dyn Storage,
}

impl<'a> ReadonlyConsensusStore<'a> {
    #[must_use]
    pub const fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }
}

impl ConsensusStateReader for ReadonlyConsensusStore<'_> {
    fn consensus_state(&self, height: Height) -> Option<ConsensusState> {
        read_consensus_state(self.storage, height)
    }

    fn processed_metadata(&self, height: Height) -> Option<ProcessedMetadata> {
        read_processed_metadata(self.storage, height)
    }

    fn first_height(&self) -> Option<Height> {
        first_stored_height(self.storage)
    }

    fn prev_height(&self, height: Height) -> Option<Height> {
        prev_stored_height(self.storage, height)
    }

    fn next_height(&self, height: Height) -> Option<Height> {
        next_stored_height(self.storage, height)
    }
}

/// The writable consensus-state store over host storage.
pub struct MutableConsensusStore<'a> {
    storage: &'a mut dyn Storage,
}

impl<'a> MutableConsensusStore<'a> {
    #[must_use]
    pub fn new(storage: &'a mut dyn Storage) -> Self {
        Self { storage }
    }
}

impl ConsensusStateReader for MutableConsensusStore<'_> {
    fn consensus_state(&self, height: Height) -> Option<ConsensusState> {
        read_consensus_state(self.storage, height)
    }

    fn processed_metadata(&self, height: Height) -> Option<ProcessedMetadata> {
        read_processed_metadata(self.storage, height)
    }

    fn first_height(&self) -> Option<Height> {
        first_stored_height(self.storage)
    }

    fn prev_height(&self, height: Height) -> Option<Height> {
        prev_stored_height(self.storage, height)
    }

    fn next_height(&self, height: Height) -> Option<Height> {
        next_stored_height(self.storage, height)
    }
}

impl ConsensusStateStore for MutableConsensusStore<'_> {
    fn set_consensus_state(&mut self, height: Height, consensus_state: &ConsensusState) {
        let wasm_consensus_state = WasmConsensusState {
            data: serde_json::to_vec(consensus_state)
                .expect("consensus state serialization is infallible"),
        };
        self.storage.set(
            consensus_db_key(height).as_bytes(),
            wrap_any(&wasm_consensus_state).encode_to_vec().as_slice(),
        );
    }

    fn delete_consensus_state(&mut self, height: Height) {
        self.storage.remove(consensus_db_key(height).as_bytes());
    }

    fn set_processed_metadata(&mut self, height: Height, metadata: &ProcessedMetadata) {
        self.storage.set(
            metadata_db_key(height).as_bytes(),
            serde_json::to_vec(metadata)
                .expect("metadata serialization is infallible")
                .as_slice(),
        );
    }

    fn delete_processed_metadata(&mut self, height: Height) {
        self.storage.remove(metadata_db_key(height).as_bytes());
    }
}

//! State transitions applied after verification succeeds.

use crate::client_message::ClientMessage;
use crate::client_state::ClientState;
use crate::consensus_state::ConsensusState;
use crate::store::{ConsensusStateReader, ConsensusStateStore, ProcessedMetadata};
use crate::types::{Height, Timestamp, FROZEN_HEIGHT};

/// Host-side facts at the time of an update: wall-clock time, block height
/// and whether the call is a gas-estimation simulation. Simulations skip
/// pruning so that estimates match the cost of the real execution.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct HostContext {
    /// Host wall-clock time.
    pub timestamp: Timestamp,
    /// Host block height.
    pub height: u64,
    /// Whether this call only estimates gas. The 08-wasm ABI carries no
    /// simulation signal, so the hosted contract always passes `false`;
    /// hosts that know they are simulating set it to skip pruning.
    pub simulation: bool,
}

/// Applies a verified client message to the store.
///
/// Headers persist a new consensus state (and processing metadata) at the
/// header's height and advance `latest_height` when it moved forward; a
/// resubmitted height is a no-op that still reports the height. One expired
/// consensus state is pruned per call. Misbehaviour messages change nothing
/// here; freezing goes through [`update_state_on_misbehaviour`].
///
/// Returns the heights the update touched and the resulting client state.
pub fn update_state<S: ConsensusStateStore>(
    client_state: &ClientState,
    store: &mut S,
    context: &HostContext,
    message: &ClientMessage,
) -> (Vec<Height>, ClientState) {
    let ClientMessage::Header(header) = message else {
        return (vec![], client_state.clone());
    };

    if !context.simulation {
        prune_oldest_consensus_state(client_state, store, context.timestamp.as_unix_nanos());
    }

    let header_height = header.height();
    if store.consensus_state(header_height).is_some() {
        // Duplicate or raced submission of an already-accepted height.
        return (vec![header_height], client_state.clone());
    }

    let mut new_client_state = client_state.clone();
    if header_height > new_client_state.latest_height {
        new_client_state.latest_height = header_height;
    }

    store.set_consensus_state(header_height, &ConsensusState::from(header.as_ref()));
    store.set_processed_metadata(
        header_height,
        &ProcessedMetadata {
            processed_time: context.timestamp.as_unix_nanos(),
            processed_height: context.height,
        },
    );

    (vec![header_height], new_client_state)
}

/// Freezes the client after verified misbehaviour. Idempotent; the stored
/// consensus states are left untouched.
#[must_use]
pub fn update_state_on_misbehaviour(client_state: &ClientState) -> ClientState {
    let mut frozen = client_state.clone();
    frozen.frozen_height = Some(FROZEN_HEIGHT);
    frozen
}

/// Decides whether a verified message is evidence of misbehaviour.
///
/// A `Misbehaviour` message that passed verification always is. A header
/// is misbehaviour when it conflicts with an already-stored consensus state
/// at its height, or when it breaks time monotonicity against its stored
/// neighbours.
#[must_use]
pub fn check_for_misbehaviour<S: ConsensusStateReader>(
    store: &S,
    message: &ClientMessage,
) -> bool {
    let header = match message {
        ClientMessage::Header(header) => header,
        ClientMessage::Misbehaviour(_) => return true,
    };

    let header_height = header.height();
    let header_time = header.signed_header.time.as_unix_nanos();

    if let Some(existing) = store.consensus_state(header_height) {
        return existing != ConsensusState::from(header.as_ref());
    }

    if let Some(prev) = store.prev_height(header_height) {
        if let Some(prev_state) = store.consensus_state(prev) {
            if prev_state.timestamp >= header_time {
                return true;
            }
        }
    }

    if let Some(next) = store.next_height(header_height) {
        if let Some(next_state) = store.consensus_state(next) {
            if next_state.timestamp <= header_time {
                return true;
            }
        }
    }

    false
}

/// Deletes the single oldest consensus state if it has expired. Bounding
/// the work to one entry keeps update gas flat regardless of backlog.
///
/// # Panics
/// Panics if the store reports a first height but holds no consensus state
/// there; that store is corrupted and must not be written to.
fn prune_oldest_consensus_state<S: ConsensusStateStore>(
    client_state: &ClientState,
    store: &mut S,
    current_time: u64,
) {
    let Some(first_height) = store.first_height() else {
        return;
    };
    let oldest = store
        .consensus_state(first_height)
        .expect("corrupted client store: no consensus state at the first stored height");
    if oldest.is_expired(client_state.trusting_period, current_time) {
        store.delete_consensus_state(first_height);
        store.delete_processed_metadata(first_height);
    }
}

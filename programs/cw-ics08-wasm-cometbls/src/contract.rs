//! The entry points called by `ibc-go` through the 08-wasm proxy client.

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response,
};
use ibc_proto::ibc::core::client::v1::Height as IbcProtoHeight;
use ibc_proto::ibc::lightclients::wasm::v1::ClientState as WasmClientState;

use ark_serialize::CanonicalDeserialize;
use cometbls_groth16_verifier::VerifyingKey;
use cometbls_light_client::client_message::ClientMessage;
use cometbls_light_client::client_state::ClientState;
use cometbls_light_client::consensus_state::ConsensusState;
use cometbls_light_client::store::{ConsensusStateReader, ConsensusStateStore};
use cometbls_light_client::types::Timestamp;
use cometbls_light_client::update::{self, HostContext};
use cometbls_light_client::{misbehaviour, verify};

use crate::error::ContractError;
use crate::msg::{
    CheckForMisbehaviourMsg, CheckForMisbehaviourResult, ExecuteMsg, ExportMetadataResult,
    GenesisMetadata, InstantiateMsg, QueryMsg, Status, StatusResult, SudoMsg,
    TimestampAtHeightMsg, TimestampAtHeightResult, UpdateStateMsg, UpdateStateResult,
    UpdateVerifyingKeyMsg, VerifyClientMessageMsg,
};
use crate::state::{
    get_client_state, get_verifying_key, get_wasm_client_state, metadata_db_key,
    set_client_state, set_wasm_client_state, MutableConsensusStore, ReadonlyConsensusStore,
    AUTHORITY_KEY, VERIFYING_KEY_KEY,
};

const CONTRACT_NAME: &str = "crates.io:cw-ics08-wasm-cometbls";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let authority = deps.api.addr_validate(&msg.authority)?;
    deps.storage
        .set(AUTHORITY_KEY.as_bytes(), authority.as_bytes());

    let client_state_bz: Vec<u8> = msg.client_state.into();
    let client_state: ClientState = serde_json::from_slice(&client_state_bz)
        .map_err(ContractError::DeserializeClientStateFailed)?;
    client_state
        .validate()
        .map_err(ContractError::InvalidClientState)?;
    set_wasm_client_state(
        deps.storage,
        &WasmClientState {
            checksum: msg.checksum.into(),
            data: client_state_bz,
            latest_height: Some(IbcProtoHeight {
                revision_number: client_state.latest_height.revision_number,
                revision_height: client_state.latest_height.revision_height,
            }),
        },
    );

    let consensus_state: ConsensusState = serde_json::from_slice(&msg.consensus_state)
        .map_err(ContractError::DeserializeConsensusStateFailed)?;
    let mut store = MutableConsensusStore::new(deps.storage);
    store.set_consensus_state(client_state.latest_height, &consensus_state);

    Ok(Response::default())
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateVerifyingKey(update_verifying_key_msg) => {
            update_verifying_key(deps, &info, &update_verifying_key_msg)
        }
    }
}

/// Rotates the stored Groth16 verifying key. Only the authority recorded
/// at instantiation may call this; the key is validated by a full
/// canonical deserialization before it is stored.
pub fn update_verifying_key(
    deps: DepsMut,
    info: &MessageInfo,
    msg: &UpdateVerifyingKeyMsg,
) -> Result<Response, ContractError> {
    let authority = deps
        .storage
        .get(AUTHORITY_KEY.as_bytes())
        .ok_or(ContractError::Unauthorized)?;
    if info.sender.as_bytes() != authority.as_slice() {
        return Err(ContractError::Unauthorized);
    }

    let verifying_key_bz =
        hex::decode(&msg.verifying_key).map_err(ContractError::InvalidVerifyingKeyHex)?;
    VerifyingKey::deserialize_compressed(verifying_key_bz.as_slice())
        .map_err(|err| ContractError::InvalidVerifyingKey(err.to_string()))?;
    deps.storage
        .set(VERIFYING_KEY_KEY.as_bytes(), &verifying_key_bz);

    Ok(Response::default())
}

#[entry_point]
pub fn sudo(deps: DepsMut, env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    let result = match msg {
        SudoMsg::UpdateState(update_state_msg) => update_state(deps, &env, &update_state_msg)?,
        SudoMsg::UpdateStateOnMisbehaviour(_) => update_state_on_misbehaviour(deps)?,
        SudoMsg::VerifyUpgradeAndUpdateState(_) => unimplemented!(),
        SudoMsg::MigrateClientStore(_) => unimplemented!(),
    };

    Ok(Response::default().set_data(result))
}

/// Commits a verified client message: persists the new consensus state
/// (and metadata) and, when the latest height moved, the client state.
pub fn update_state(
    deps: DepsMut,
    env: &Env,
    msg: &UpdateStateMsg,
) -> Result<Binary, ContractError> {
    let message: ClientMessage = serde_json::from_slice(&msg.client_message)
        .map_err(ContractError::DeserializeClientMessageFailed)?;
    let wasm_client_state = get_wasm_client_state(deps.storage)?;
    let client_state = get_client_state(deps.storage)?;

    let context = HostContext {
        timestamp: env_timestamp(env),
        height: env.block.height,
        simulation: false,
    };
    let mut store = MutableConsensusStore::new(deps.storage);
    let (heights, new_client_state) =
        update::update_state(&client_state, &mut store, &context, &message);

    if new_client_state != client_state {
        set_client_state(deps.storage, wasm_client_state.checksum, &new_client_state)?;
    }

    Ok(to_json_binary(&UpdateStateResult {
        heights: heights.into_iter().map(Into::into).collect(),
    })?)
}

/// Freezes the client after `ibc-go` accepted misbehaviour evidence. The
/// stored consensus states are kept for auditability.
pub fn update_state_on_misbehaviour(deps: DepsMut) -> Result<Binary, ContractError> {
    let wasm_client_state = get_wasm_client_state(deps.storage)?;
    let client_state = get_client_state(deps.storage)?;
    let frozen = update::update_state_on_misbehaviour(&client_state);
    set_client_state(deps.storage, wasm_client_state.checksum, &frozen)?;

    Ok(to_json_binary(&Ok::<(), ()>(()))?)
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::VerifyClientMessage(verify_client_message_msg) => {
            verify_client_message(deps, &env, &verify_client_message_msg)
        }
        QueryMsg::CheckForMisbehaviour(check_for_misbehaviour_msg) => {
            check_for_misbehaviour(deps, &check_for_misbehaviour_msg)
        }
        QueryMsg::TimestampAtHeight(timestamp_at_height_msg) => {
            timestamp_at_height(deps, &timestamp_at_height_msg)
        }
        QueryMsg::Status(_) => status(deps, &env),
        QueryMsg::ExportMetadata(_) => export_metadata(deps),
    }
}

/// Runs full verification of a header or misbehaviour message without
/// committing anything.
pub fn verify_client_message(
    deps: Deps,
    env: &Env,
    msg: &VerifyClientMessageMsg,
) -> Result<Binary, ContractError> {
    let message: ClientMessage = serde_json::from_slice(&msg.client_message)
        .map_err(ContractError::DeserializeClientMessageFailed)?;
    let client_state = get_client_state(deps.storage)?;
    let verifying_key = get_verifying_key(deps.storage)?;
    let store = ReadonlyConsensusStore::new(deps.storage);
    let current_time = env_timestamp(env);

    match &message {
        ClientMessage::Header(header) => verify::verify_header(
            &client_state,
            &store,
            &verifying_key,
            current_time,
            header,
        ),
        ClientMessage::Misbehaviour(evidence) => misbehaviour::verify_misbehaviour(
            &client_state,
            &store,
            &verifying_key,
            current_time,
            evidence,
        ),
    }
    .map_err(ContractError::VerifyClientMessageFailed)?;

    Ok(to_json_binary(&Ok::<(), ()>(()))?)
}

pub fn check_for_misbehaviour(
    deps: Deps,
    msg: &CheckForMisbehaviourMsg,
) -> Result<Binary, ContractError> {
    let message: ClientMessage = serde_json::from_slice(&msg.client_message)
        .map_err(ContractError::DeserializeClientMessageFailed)?;
    let store = ReadonlyConsensusStore::new(deps.storage);

    Ok(to_json_binary(&CheckForMisbehaviourResult {
        found_misbehaviour: update::check_for_misbehaviour(&store, &message),
    })?)
}

pub fn timestamp_at_height(
    deps: Deps,
    msg: &TimestampAtHeightMsg,
) -> Result<Binary, ContractError> {
    let height = msg.height.into();
    let store = ReadonlyConsensusStore::new(deps.storage);
    let consensus_state = store
        .consensus_state(height)
        .ok_or(ContractError::ConsensusStateNotFound { height })?;

    Ok(to_json_binary(&TimestampAtHeightResult {
        timestamp: consensus_state.timestamp,
    })?)
}

pub fn status(deps: Deps, env: &Env) -> Result<Binary, ContractError> {
    let client_state = get_client_state(deps.storage)?;
    let store = ReadonlyConsensusStore::new(deps.storage);

    let status = if client_state.is_frozen() {
        Status::Frozen
    } else {
        // A pruned-away latest consensus state means the client sat past
        // its trusting period.
        match store.consensus_state(client_state.latest_height) {
            Some(latest) if !latest.is_expired(
                client_state.trusting_period,
                env_timestamp(env).as_unix_nanos(),
            ) => Status::Active,
            _ => Status::Expired,
        }
    };

    Ok(to_json_binary(&StatusResult {
        status: status.to_string(),
    })?)
}

pub fn export_metadata(deps: Deps) -> Result<Binary, ContractError> {
    let genesis_metadata = crate::state::all_processed_metadata(deps.storage)
        .into_iter()
        .map(|(height, value)| GenesisMetadata {
            key: metadata_db_key(height).into_bytes().into(),
            value: value.into(),
        })
        .collect();

    Ok(to_json_binary(&ExportMetadataResult { genesis_metadata })?)
}

#[allow(clippy::cast_possible_truncation)] // subsec_nanos is always < 10^9
fn env_timestamp(env: &Env) -> Timestamp {
    Timestamp {
        seconds: env.block.time.seconds(),
        nanos: env.block.time.subsec_nanos() as u32,
    }
}

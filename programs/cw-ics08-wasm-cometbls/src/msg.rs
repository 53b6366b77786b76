//! The messages that are passed between the contract and the ibc-go module

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

use cometbls_light_client::types::Height as CoreHeight;

/// The message to instantiate the contract
#[cw_serde]
pub struct InstantiateMsg {
    /// The JSON-encoded client state
    pub client_state: Binary,
    /// The JSON-encoded consensus state at the client state's latest height
    pub consensus_state: Binary,
    /// The checksum of this wasm code
    pub checksum: Binary,
    /// The address allowed to rotate the verifying key
    pub authority: String,
}

/// The governance-gated messages to execute the contract
#[cw_serde]
pub enum ExecuteMsg {
    /// Store a new Groth16 verifying key
    UpdateVerifyingKey(UpdateVerifyingKeyMsg),
}

/// The message to store a new Groth16 verifying key
#[cw_serde]
pub struct UpdateVerifyingKeyMsg {
    /// The canonically-serialized verifying key, hex encoded
    pub verifying_key: String,
}

/// The sudo messages called by `ibc-go`
#[cw_serde]
pub enum SudoMsg {
    /// The message to update the client state
    UpdateState(UpdateStateMsg),
    /// The message to freeze the client after proven misbehaviour
    UpdateStateOnMisbehaviour(UpdateStateOnMisbehaviourMsg),
    /// The message to verify an upgrade (unsupported)
    VerifyUpgradeAndUpdateState(VerifyUpgradeAndUpdateStateMsg),
    /// The message to migrate the client store (unsupported)
    MigrateClientStore(MigrateClientStoreMsg),
}

/// The query messages called by `ibc-go`
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// The message to verify the client message
    #[returns[()]]
    VerifyClientMessage(VerifyClientMessageMsg),

    /// The message to check for misbehaviour
    #[returns[CheckForMisbehaviourResult]]
    CheckForMisbehaviour(CheckForMisbehaviourMsg),

    /// The message to get the timestamp at height
    #[returns[TimestampAtHeightResult]]
    TimestampAtHeight(TimestampAtHeightMsg),

    /// The message to get the status
    #[returns[StatusResult]]
    Status(StatusMsg),

    /// The message to export the processing metadata
    #[returns[ExportMetadataResult]]
    ExportMetadata(ExportMetadataMsg),
}

/// Update state message
#[cw_serde]
pub struct UpdateStateMsg {
    /// The client message
    pub client_message: Binary,
}

/// Update state on misbehaviour message
#[cw_serde]
pub struct UpdateStateOnMisbehaviourMsg {
    /// The client message
    pub client_message: Binary,
}

/// Verify upgrade and update state message
#[cw_serde]
pub struct VerifyUpgradeAndUpdateStateMsg {
    /// The upgraded client state
    pub upgrade_client_state: Binary,
    /// The upgraded consensus state
    pub upgrade_consensus_state: Binary,
    /// The proof of the upgraded client state
    pub proof_upgrade_client: Binary,
    /// The proof of the upgraded consensus state
    pub proof_upgrade_consensus_state: Binary,
}

/// Migrate client store message
#[cw_serde]
pub struct MigrateClientStoreMsg {}

/// The message to verify the client message
#[cw_serde]
pub struct VerifyClientMessageMsg {
    /// The JSON-encoded client message to verify
    pub client_message: Binary,
}

/// The message to check for misbehaviour
#[cw_serde]
pub struct CheckForMisbehaviourMsg {
    /// The JSON-encoded client message to check
    pub client_message: Binary,
}

/// The message to get the timestamp at height
#[cw_serde]
pub struct TimestampAtHeightMsg {
    /// The height to get the timestamp at
    pub height: Height,
}

/// The status query message
#[cw_serde]
pub struct StatusMsg {}

/// The export metadata query message
#[cw_serde]
pub struct ExportMetadataMsg {}

/// An IBC height as `ibc-go` serializes it
#[cw_serde]
#[derive(Copy)]
pub struct Height {
    /// The revision the chain is currently on
    #[serde(default)]
    pub revision_number: u64,
    /// The block height within the revision
    #[serde(default)]
    pub revision_height: u64,
}

impl From<CoreHeight> for Height {
    fn from(height: CoreHeight) -> Self {
        Self {
            revision_number: height.revision_number,
            revision_height: height.revision_height,
        }
    }
}

impl From<Height> for CoreHeight {
    fn from(height: Height) -> Self {
        Self::new(height.revision_number, height.revision_height)
    }
}

/// The result of updating the client state
#[cw_serde]
pub struct UpdateStateResult {
    /// The heights the update touched
    pub heights: Vec<Height>,
}

/// The result of checking for misbehaviour
#[cw_serde]
pub struct CheckForMisbehaviourResult {
    /// Whether misbehaviour was found
    pub found_misbehaviour: bool,
}

/// The result of the timestamp at height query
#[cw_serde]
pub struct TimestampAtHeightResult {
    /// The timestamp at the height, nanoseconds since the unix epoch
    pub timestamp: u64,
}

/// The response to the status query
#[cw_serde]
pub struct StatusResult {
    /// The status of the client
    pub status: String,
}

/// One exported metadata entry
#[cw_serde]
pub struct GenesisMetadata {
    /// The store key of the entry
    pub key: Binary,
    /// The stored value
    pub value: Binary,
}

/// The result of the export metadata query
#[cw_serde]
pub struct ExportMetadataResult {
    /// The stored processing metadata, ascending by height
    pub genesis_metadata: Vec<GenesisMetadata>,
}

/// The client status types
pub enum Status {
    /// The client is active
    Active,
    /// The client is frozen after proven misbehaviour
    Frozen,
    /// The client's latest consensus state has outlived the trusting period
    Expired,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Frozen => write!(f, "Frozen"),
            Self::Expired => write!(f, "Expired"),
        }
    }
}

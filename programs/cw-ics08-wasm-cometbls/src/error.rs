use cometbls_light_client::error::CometblsIBCError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized")]
    Unauthorized,

    #[error("client state not found")]
    ClientStateNotFound,

    #[error("consensus state not found at height {height}")]
    ConsensusStateNotFound {
        height: cometbls_light_client::types::Height,
    },

    #[error("decoding stored envelope failed: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("deserializing client state failed: {0}")]
    DeserializeClientStateFailed(#[source] serde_json::Error),

    #[error("serializing client state failed: {0}")]
    SerializeClientStateFailed(#[source] serde_json::Error),

    #[error("deserializing consensus state failed: {0}")]
    DeserializeConsensusStateFailed(#[source] serde_json::Error),

    #[error("deserializing client message failed: {0}")]
    DeserializeClientMessageFailed(#[source] serde_json::Error),

    #[error("verifying key has not been set")]
    VerifyingKeyNotSet,

    #[error("verifying key is not valid hex: {0}")]
    InvalidVerifyingKeyHex(#[source] hex::FromHexError),

    #[error("verifying key does not deserialize: {0}")]
    InvalidVerifyingKey(String),

    #[error("invalid client state: {0}")]
    InvalidClientState(#[source] CometblsIBCError),

    #[error("verify client message failed: {0}")]
    VerifyClientMessageFailed(#[source] CometblsIBCError),
}

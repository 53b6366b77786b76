use serde::{Deserialize, Serialize};

use cometbls_groth16_verifier::field::MAX_CHAIN_ID_LEN;

use crate::error::CometblsIBCError;
use crate::types::Height;

/// The process of record for a light-client instance.
///
/// Mutated only by `update_state` (`latest_height`) and
/// `update_state_on_misbehaviour` (`frozen_height`, one-way). Owned
/// exclusively by the client instance identified by its client id and
/// persisted per update by the enclosing contract.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct ClientState {
    /// The counterparty chain id.
    pub chain_id: String,
    /// How long a consensus state stays usable, in nanoseconds.
    pub trusting_period: u64,
    /// Maximum tolerated clock drift between chains, in nanoseconds.
    pub max_clock_drift: u64,
    /// The highest verified height.
    pub latest_height: Height,
    /// Set to the frozen sentinel once misbehaviour is proven; never
    /// cleared by this module.
    #[serde(default)]
    pub frozen_height: Option<Height>,
}

impl ClientState {
    /// Whether the client has been frozen by misbehaviour.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen_height.is_some()
    }

    /// Basic well-formedness checks, run when the client is created.
    ///
    /// # Errors
    /// Returns [`CometblsIBCError::InvalidClientState`] naming the first
    /// violated constraint.
    pub fn validate(&self) -> Result<(), CometblsIBCError> {
        if self.chain_id.is_empty() {
            return Err(CometblsIBCError::InvalidClientState(
                "chain id must not be empty".into(),
            ));
        }
        if self.chain_id.len() > MAX_CHAIN_ID_LEN {
            return Err(CometblsIBCError::InvalidClientState(format!(
                "chain id `{}` exceeds {MAX_CHAIN_ID_LEN} bytes",
                self.chain_id
            )));
        }
        if self.trusting_period == 0 {
            return Err(CometblsIBCError::InvalidClientState(
                "trusting period must be positive".into(),
            ));
        }
        if self.max_clock_drift == 0 {
            return Err(CometblsIBCError::InvalidClientState(
                "max clock drift must be positive".into(),
            ));
        }
        if self.latest_height.revision_height == 0 {
            return Err(CometblsIBCError::InvalidClientState(
                "latest height must be positive".into(),
            ));
        }
        Ok(())
    }
}

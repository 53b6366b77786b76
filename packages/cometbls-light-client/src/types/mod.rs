//! Shared value types.

pub mod height;

pub use cometbls_groth16_verifier::types::Timestamp;
pub use height::{Height, FROZEN_HEIGHT};

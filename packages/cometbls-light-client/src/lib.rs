//! CometBLS light client.
//!
//! Verifies that a claimed new block header was produced by the trusted
//! validator set, using a succinct Groth16 proof in place of checking
//! individual signatures, and maintains the append-only consensus-state
//! history downstream packet verification depends on.
//!
//! The crate is pure state-transition logic: all persistence goes through
//! the [`store::ConsensusStateStore`] abstraction injected by the host, and
//! every entry point is synchronous and deterministic. The enclosing wasm
//! contract wires these functions to host storage and message routing.

pub mod client_message;
pub mod client_state;
pub mod consensus_state;
pub mod error;
pub mod header;
pub mod misbehaviour;
pub mod store;
pub mod types;
pub mod update;
pub mod verify;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Ensure that a condition is true, otherwise return an error.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

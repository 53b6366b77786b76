//! This module defines [`ClientMessage`].

use serde::{Deserialize, Serialize};

use crate::header::Header;
use crate::misbehaviour::Misbehaviour;

/// An inbound client message. The two kinds are dispatched by exhaustive
/// pattern matching, so adding a variant is a compile-time-checked
/// decision point.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ClientMessage {
    /// A candidate header update.
    Header(Box<Header>),
    /// Evidence of conflicting or time-inconsistent histories.
    Misbehaviour(Box<Misbehaviour>),
}

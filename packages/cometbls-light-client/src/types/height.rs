//! This module defines [`Height`].

use core::fmt;

use serde::{Deserialize, Serialize};

/// A block height qualified by the chain's revision number.
///
/// Heights are totally ordered, revision first, so they can key an ordered
/// map with meaningful neighbor queries.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default,
)]
pub struct Height {
    /// The revision number, parsed from the chain id suffix.
    #[serde(default)]
    pub revision_number: u64,
    /// The block height within the revision.
    pub revision_height: u64,
}

impl Height {
    /// Creates a new height.
    #[must_use]
    pub const fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

/// Sentinel stored in `frozen_height` once misbehaviour is proven. Used
/// purely as a "frozen" flag and never interpreted as a real height.
pub const FROZEN_HEIGHT: Height = Height::new(0, 1);

//! Parties to a claim case.

use serde::{Deserialize, Serialize};

/// The role an actor holds in a case. Mutually exclusive.
///
/// Role constraints are enforced at validation time: only the claimant
/// submits claims and withdrawals, only the respondent issues decisions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    /// The contractor raising the change-order claim.
    Claimant,
    /// The client deciding on it.
    Respondent,
}

impl core::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ActorRole::Claimant => write!(f, "claimant"),
            ActorRole::Respondent => write!(f, "respondent"),
        }
    }
}

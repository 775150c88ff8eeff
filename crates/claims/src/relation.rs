//! Cross-case references derived from events.
//!
//! A relation entry exists only because some extant event established it; the
//! relation index in the infrastructure layer is purely a cache over these
//! derivations.

use serde::{Deserialize, Serialize};

use claimledger_core::CaseId;

use crate::event::{ClaimEvent, ClaimValue};
use crate::state::CaseState;

/// Why one case references another.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// An acceleration claim rests on the target case's rejected schedule
    /// claim.
    AccelerationBasis,
}

/// A directed cross-case reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationEntry {
    pub source: CaseId,
    pub target: CaseId,
    pub kind: RelationKind,
}

/// Index mutations one event implies, given the state before it applied.
///
/// Corrections are remove + re-insert, never an in-place update: a redraft
/// retracts the old draft's references before adding the new ones, and a
/// withdrawal retracts them outright.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationChanges {
    pub added: Vec<RelationEntry>,
    pub removed: Vec<RelationEntry>,
}

impl RelationChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

fn entries_of(source: CaseId, value: Option<&ClaimValue>) -> Vec<RelationEntry> {
    match value {
        Some(ClaimValue::Acceleration { disputed, .. }) => disputed
            .iter()
            .map(|target| RelationEntry {
                source,
                target: *target,
                kind: RelationKind::AccelerationBasis,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Derive the relation-index mutations for one event.
///
/// `state_before` is the projected state the event was validated against,
/// needed to retract references the event supersedes.
pub fn relation_changes(state_before: &CaseState, event: &ClaimEvent) -> RelationChanges {
    let source = state_before.case_id();
    match event {
        ClaimEvent::ClaimDrafted(e) => RelationChanges {
            removed: entries_of(source, state_before.track(e.track).claimed.as_ref()),
            added: entries_of(source, Some(&e.value)),
        },
        ClaimEvent::ClaimWithdrawn(e) => RelationChanges {
            removed: entries_of(source, state_before.track(e.track).claimed.as_ref()),
            added: Vec::new(),
        },
        _ => RelationChanges::default(),
    }
}

//! Projected case state.
//!
//! `CaseState` is the read-only aggregate computed by folding a case's event
//! stream from empty. No field is ever set by any other path; the log remains
//! authoritative and the state may at most be cached.

use serde::{Deserialize, Serialize};

use claimledger_core::{ActorId, AggregateRoot, CaseId, Money};

use crate::decision::DecisionOutcome;
use crate::event::{ClaimValue, Track};

/// Lifecycle of one track.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackStatus {
    #[default]
    NotStarted,
    Draft,
    Submitted,
    UnderReview,
    Approved,
    PartiallyApproved,
    Rejected,
    Withdrawn,
    Locked,
}

impl TrackStatus {
    pub fn is_started(self) -> bool {
        self != TrackStatus::NotStarted
    }

    /// A respondent decision has been recorded.
    pub fn is_decided(self) -> bool {
        matches!(
            self,
            TrackStatus::Approved | TrackStatus::PartiallyApproved | TrackStatus::Rejected
        )
    }

    /// No further claimant or respondent activity is possible.
    pub fn is_concluded(self) -> bool {
        self.is_decided() || matches!(self, TrackStatus::Withdrawn | TrackStatus::Locked)
    }

    /// A decision event is only valid from these statuses.
    pub fn may_receive_decision(self) -> bool {
        matches!(self, TrackStatus::Submitted | TrackStatus::UnderReview)
    }
}

/// Overall status of a case, combined from the three tracks. Read-only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverallStatus {
    NotStarted,
    InPreparation,
    AwaitingDecision,
    Decided,
    Closed,
}

/// One track's sub-state. Tracks fold independently: an event of one track
/// never mutates another's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackState {
    pub status: TrackStatus,
    pub claimed: Option<ClaimValue>,
    pub decision: Option<DecisionOutcome>,
}

/// Case metadata recorded at opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMeta {
    pub claimant_id: ActorId,
    pub respondent_id: ActorId,
    pub contract_ref: String,
    pub title: String,
    pub daily_penalty_rate: Money,
}

/// The projected state of one claim case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseState {
    case_id: CaseId,
    meta: Option<CaseMeta>,
    basis: TrackState,
    compensation: TrackState,
    schedule: TrackState,
    version: u64,
}

impl CaseState {
    /// Empty default state for rehydration. `version` 0 means no events.
    pub fn empty(case_id: CaseId) -> Self {
        Self {
            case_id,
            meta: None,
            basis: TrackState::default(),
            compensation: TrackState::default(),
            schedule: TrackState::default(),
            version: 0,
        }
    }

    pub fn case_id(&self) -> CaseId {
        self.case_id
    }

    pub fn is_opened(&self) -> bool {
        self.meta.is_some()
    }

    pub fn meta(&self) -> Option<&CaseMeta> {
        self.meta.as_ref()
    }

    pub fn track(&self, track: Track) -> &TrackState {
        match track {
            Track::Basis => &self.basis,
            Track::Compensation => &self.compensation,
            Track::Schedule => &self.schedule,
        }
    }

    pub(crate) fn track_mut(&mut self, track: Track) -> &mut TrackState {
        match track {
            Track::Basis => &mut self.basis,
            Track::Compensation => &mut self.compensation,
            Track::Schedule => &mut self.schedule,
        }
    }

    pub(crate) fn set_meta(&mut self, meta: CaseMeta) {
        self.meta = Some(meta);
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Combined status over the three tracks. Computed, never stored.
    pub fn overall_status(&self) -> OverallStatus {
        let started: Vec<TrackStatus> = Track::ALL
            .iter()
            .map(|t| self.track(*t).status)
            .filter(|s| s.is_started())
            .collect();

        if started.is_empty() {
            return OverallStatus::NotStarted;
        }
        if started.iter().all(|s| *s == TrackStatus::Locked) {
            return OverallStatus::Closed;
        }
        if started.iter().any(|s| s.may_receive_decision()) {
            return OverallStatus::AwaitingDecision;
        }
        if started.iter().any(|s| *s == TrackStatus::Draft) {
            return OverallStatus::InPreparation;
        }
        OverallStatus::Decided
    }

    /// True once every started track has concluded (decided, withdrawn or
    /// locked) and at least one track was started.
    pub fn ready_for_closure(&self) -> bool {
        let started: Vec<TrackStatus> = Track::ALL
            .iter()
            .map(|t| self.track(*t).status)
            .filter(|s| s.is_started())
            .collect();

        !started.is_empty() && started.iter().all(|s| s.is_concluded())
    }
}

impl AggregateRoot for CaseState {
    type Id = CaseId;

    fn id(&self) -> &Self::Id {
        &self.case_id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

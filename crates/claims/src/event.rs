//! The closed claim-event taxonomy.
//!
//! Every fact in a case ledger is one of these variants. The set is closed on
//! purpose: replay matches exhaustively, so adding a variant is a
//! compile-time-visible change to every handler rather than a silent runtime
//! miss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use claimledger_core::{ActorId, ActorRole, CaseId, DurationDays, EventId, Money};
use claimledger_events::Event;

use crate::decision::GateFindings;

/// One of the three independent claim dimensions of a case.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// Legal ground for the change order.
    Basis,
    /// Monetary compensation.
    Compensation,
    /// Schedule extension.
    Schedule,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::Basis, Track::Compensation, Track::Schedule];

    /// The value kind a claim on this track must carry.
    pub fn expected_kind(self) -> ClaimKind {
        match self {
            Track::Basis => ClaimKind::Ground,
            Track::Compensation => ClaimKind::Amount,
            Track::Schedule => ClaimKind::Days,
        }
    }
}

impl core::fmt::Display for Track {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Track::Basis => write!(f, "basis"),
            Track::Compensation => write!(f, "compensation"),
            Track::Schedule => write!(f, "schedule"),
        }
    }
}

/// The kind of value a claim carries, one per track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimKind {
    Ground,
    Amount,
    Days,
}

/// What is being claimed (or assessed) on a track.
///
/// `Acceleration` is a compensation-track claim for the cost of speeding up
/// work after disputed schedule rejections; `disputed` names the cases whose
/// rejected schedule claims it rests on. Those references feed the relation
/// index and the statutory cap check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimValue {
    Ground { description: String },
    Amount { amount: Money },
    Days { days: DurationDays },
    Acceleration { amount: Money, disputed: Vec<CaseId> },
}

impl ClaimValue {
    pub fn kind(&self) -> ClaimKind {
        match self {
            ClaimValue::Ground { .. } => ClaimKind::Ground,
            ClaimValue::Amount { .. } | ClaimValue::Acceleration { .. } => ClaimKind::Amount,
            ClaimValue::Days { .. } => ClaimKind::Days,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            ClaimValue::Ground { description } => description.is_empty(),
            ClaimValue::Amount { amount } | ClaimValue::Acceleration { amount, .. } => {
                amount.is_zero()
            }
            ClaimValue::Days { days } => days.is_zero(),
        }
    }
}

/// Event: a new case was opened between the parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOpened {
    pub case_id: CaseId,
    pub claimant_id: ActorId,
    pub respondent_id: ActorId,
    pub contract_ref: String,
    pub title: String,
    /// Contractual daily delay penalty; input to the acceleration cap.
    pub daily_penalty_rate: Money,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Event: the claimant drafted (or redrafted) a claim on a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDrafted {
    pub case_id: CaseId,
    pub track: Track,
    pub value: ClaimValue,
    /// Prior draft event this one amends, if any. Drafts are never edited in
    /// place; a redraft is a new event.
    pub amends: Option<EventId>,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Event: the claimant formally submitted the drafted claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmitted {
    pub case_id: CaseId,
    pub track: Track,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Event: the respondent took the submitted claim under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOpened {
    pub case_id: CaseId,
    pub track: Track,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Event: the respondent issued a decision on a track.
///
/// Carries the gate findings, not the synthesized outcome: the outcome is
/// recomputed deterministically from the findings on every replay, so the
/// evaluator is the single source of decision semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionIssued {
    pub case_id: CaseId,
    pub track: Track,
    pub findings: GateFindings,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Event: the claimant withdrew a claim before it was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimWithdrawn {
    pub case_id: CaseId,
    pub track: Track,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a concluded track was locked against further activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackLocked {
    pub case_id: CaseId,
    pub track: Track,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimEvent {
    CaseOpened(CaseOpened),
    ClaimDrafted(ClaimDrafted),
    ClaimSubmitted(ClaimSubmitted),
    ReviewOpened(ReviewOpened),
    DecisionIssued(DecisionIssued),
    ClaimWithdrawn(ClaimWithdrawn),
    TrackLocked(TrackLocked),
}

impl ClaimEvent {
    /// All stable type tags. The store decoder checks incoming tags against
    /// this set so an unknown tag is a replay error, never a silent skip.
    pub const KNOWN_TYPES: [&'static str; 7] = [
        "claim.case.opened",
        "claim.track.drafted",
        "claim.track.submitted",
        "claim.track.review_opened",
        "claim.track.decision_issued",
        "claim.track.withdrawn",
        "claim.track.locked",
    ];

    pub fn case_id(&self) -> CaseId {
        match self {
            ClaimEvent::CaseOpened(e) => e.case_id,
            ClaimEvent::ClaimDrafted(e) => e.case_id,
            ClaimEvent::ClaimSubmitted(e) => e.case_id,
            ClaimEvent::ReviewOpened(e) => e.case_id,
            ClaimEvent::DecisionIssued(e) => e.case_id,
            ClaimEvent::ClaimWithdrawn(e) => e.case_id,
            ClaimEvent::TrackLocked(e) => e.case_id,
        }
    }

}

impl Event for ClaimEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ClaimEvent::CaseOpened(_) => "claim.case.opened",
            ClaimEvent::ClaimDrafted(_) => "claim.track.drafted",
            ClaimEvent::ClaimSubmitted(_) => "claim.track.submitted",
            ClaimEvent::ReviewOpened(_) => "claim.track.review_opened",
            ClaimEvent::DecisionIssued(_) => "claim.track.decision_issued",
            ClaimEvent::ClaimWithdrawn(_) => "claim.track.withdrawn",
            ClaimEvent::TrackLocked(_) => "claim.track.locked",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ClaimEvent::CaseOpened(e) => e.occurred_at,
            ClaimEvent::ClaimDrafted(e) => e.occurred_at,
            ClaimEvent::ClaimSubmitted(e) => e.occurred_at,
            ClaimEvent::ReviewOpened(e) => e.occurred_at,
            ClaimEvent::DecisionIssued(e) => e.occurred_at,
            ClaimEvent::ClaimWithdrawn(e) => e.occurred_at,
            ClaimEvent::TrackLocked(e) => e.occurred_at,
        }
    }
}

//! Commands against a claim case.
//!
//! Commands are intents; `CaseState::handle` decides whether they become
//! events. Each carries the acting party so role constraints can be enforced
//! at decision time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use claimledger_core::{ActorId, ActorRole, CaseId, EventId, Money};

use crate::decision::GateFindings;
use crate::event::{ClaimValue, Track};

/// Command: open a new case between the parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCase {
    pub case_id: CaseId,
    pub claimant_id: ActorId,
    pub respondent_id: ActorId,
    pub contract_ref: String,
    pub title: String,
    pub daily_penalty_rate: Money,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Command: draft (or redraft) a claim on a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftClaim {
    pub case_id: CaseId,
    pub track: Track,
    pub value: ClaimValue,
    pub amends: Option<EventId>,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Command: submit the drafted claim to the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitClaim {
    pub case_id: CaseId,
    pub track: Track,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Command: take a submitted claim under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenReview {
    pub case_id: CaseId,
    pub track: Track,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Command: issue a decision on a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDecision {
    pub case_id: CaseId,
    pub track: Track,
    pub findings: GateFindings,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Command: withdraw an undecided claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawClaim {
    pub case_id: CaseId,
    pub track: Track,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

/// Command: lock a concluded track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTrack {
    pub case_id: CaseId,
    pub track: Track,
    pub actor_id: ActorId,
    pub actor_role: ActorRole,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimCommand {
    OpenCase(OpenCase),
    DraftClaim(DraftClaim),
    SubmitClaim(SubmitClaim),
    OpenReview(OpenReview),
    IssueDecision(IssueDecision),
    WithdrawClaim(WithdrawClaim),
    LockTrack(LockTrack),
}

impl ClaimCommand {
    pub fn case_id(&self) -> CaseId {
        match self {
            ClaimCommand::OpenCase(c) => c.case_id,
            ClaimCommand::DraftClaim(c) => c.case_id,
            ClaimCommand::SubmitClaim(c) => c.case_id,
            ClaimCommand::OpenReview(c) => c.case_id,
            ClaimCommand::IssueDecision(c) => c.case_id,
            ClaimCommand::WithdrawClaim(c) => c.case_id,
            ClaimCommand::LockTrack(c) => c.case_id,
        }
    }

    pub fn actor_id(&self) -> ActorId {
        match self {
            ClaimCommand::OpenCase(c) => c.actor_id,
            ClaimCommand::DraftClaim(c) => c.actor_id,
            ClaimCommand::SubmitClaim(c) => c.actor_id,
            ClaimCommand::OpenReview(c) => c.actor_id,
            ClaimCommand::IssueDecision(c) => c.actor_id,
            ClaimCommand::WithdrawClaim(c) => c.actor_id,
            ClaimCommand::LockTrack(c) => c.actor_id,
        }
    }

    pub fn actor_role(&self) -> ActorRole {
        match self {
            ClaimCommand::OpenCase(c) => c.actor_role,
            ClaimCommand::DraftClaim(c) => c.actor_role,
            ClaimCommand::SubmitClaim(c) => c.actor_role,
            ClaimCommand::OpenReview(c) => c.actor_role,
            ClaimCommand::IssueDecision(c) => c.actor_role,
            ClaimCommand::WithdrawClaim(c) => c.actor_role,
            ClaimCommand::LockTrack(c) => c.actor_role,
        }
    }
}

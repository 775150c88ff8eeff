//! The submission pipeline: one command in, zero or more committed events out.
//!
//! Every mutation goes through the same path. The pipeline rehydrates the
//! case from its stream, runs the domain validator, appends the accepted
//! events under optimistic concurrency and maintains the relation index in
//! the same call. Cross-case checks (the acceleration cap) also live here,
//! since only the pipeline can see other cases' streams.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use claimledger_claims::{
    check_acceleration_cap, ClaimCommand, ClaimValue, relation_changes, CaseState, Track,
};
use claimledger_core::{Aggregate, CaseId, DomainError, EventId, ExpectedVersion, Money};

use crate::collaborators::{AccessControl, AllowAll, CollaborationNotifier, NoopNotifier};
use crate::event_store::{EventStore, EventStoreError, UncommittedEvent};
use crate::relation_index::{rebuild_from_events, RelationIndex};
use crate::replay::{decode_stream, project_stream, ReplayError};

/// A command together with the stream version the caller based it on.
#[derive(Debug, Clone)]
pub struct Submission {
    pub case_id: CaseId,
    pub command: ClaimCommand,
    pub expected_version: u64,
}

/// What a committed submission produced.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub event_ids: Vec<EventId>,
    pub new_version: u64,
    pub case_state: CaseState,
}

/// Submission failure.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The case moved on since the caller read it. Recoverable: re-read and
    /// resubmit against the fresh version.
    #[error("submission conflicts with version {actual} (expected {expected})")]
    Conflict { expected: u64, actual: u64 },

    /// The domain validator refused the command. Nothing was appended.
    #[error(transparent)]
    Rejected(DomainError),

    /// The actor may not act on this case.
    #[error("actor is not authorized for this case")]
    Unauthorized,

    /// A stored stream failed to replay.
    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// The store failed.
    #[error(transparent)]
    Store(EventStoreError),
}

impl From<EventStoreError> for SubmitError {
    fn from(e: EventStoreError) -> Self {
        match e {
            EventStoreError::Concurrency { expected, actual } => {
                SubmitError::Conflict { expected, actual }
            }
            other => SubmitError::Store(other),
        }
    }
}

impl From<DomainError> for SubmitError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthorized => SubmitError::Unauthorized,
            other => SubmitError::Rejected(other),
        }
    }
}

/// Serializes command handling per case: rehydrate, validate, append, index.
pub struct SubmissionPipeline<S: EventStore> {
    store: S,
    relations: Arc<RelationIndex>,
    access: Arc<dyn AccessControl>,
    notifier: Arc<dyn CollaborationNotifier>,
}

impl<S: EventStore> SubmissionPipeline<S> {
    /// Opens the pipeline over a store, reconciling the relation index with
    /// the log first. A process that died between an append and its index
    /// update leaves the index stale; the rebuild at open adopts whatever the
    /// log says before the first submission runs.
    pub fn new(store: S, relations: Arc<RelationIndex>) -> Self {
        match rebuild_from_events(&store) {
            Ok(rebuilt) => {
                relations.reconcile(rebuilt);
            }
            Err(e) => warn!(error = %e, "relation index recovery failed, keeping the index as given"),
        }
        Self {
            store,
            relations,
            access: Arc::new(AllowAll),
            notifier: Arc::new(NoopNotifier),
        }
    }

    pub fn with_access(mut self, access: Arc<dyn AccessControl>) -> Self {
        self.access = access;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn CollaborationNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn relations(&self) -> &RelationIndex {
        &self.relations
    }

    /// Current projected state and version of a case.
    pub fn case_state(&self, case_id: CaseId) -> Result<(CaseState, u64), SubmitError> {
        let (stream, version) = self.store.read(case_id)?;
        let state = project_stream(case_id, &stream)?;
        Ok((state, version))
    }

    /// Run one command end to end.
    pub fn submit(&self, submission: Submission) -> Result<SubmissionOutcome, SubmitError> {
        let Submission {
            case_id,
            command,
            expected_version,
        } = submission;

        if !self
            .access
            .authorize(command.actor_id(), command.actor_role(), case_id)
        {
            return Err(SubmitError::Unauthorized);
        }

        let (stream, version) = self.store.read(case_id)?;
        if version != expected_version {
            // Cheap pre-check; the append re-verifies under the case lock.
            return Err(SubmitError::Conflict {
                expected: expected_version,
                actual: version,
            });
        }

        let events = decode_stream(&stream)?;
        let mut state = CaseState::empty(case_id);
        for event in &events {
            state
                .apply(event)
                .map_err(|e| ReplayError::CorruptSequence(e.to_string()))?;
        }

        let accepted = state.handle(&command)?;

        // Only after the domain validator accepts: a role or state failure is
        // the more specific rule and must surface first.
        if let Some((amount, cited)) = acceleration_under_check(&command, &state) {
            self.check_cap(amount, &cited)?;
        }

        if accepted.is_empty() {
            return Ok(SubmissionOutcome {
                event_ids: vec![],
                new_version: version,
                case_state: state,
            });
        }

        let mut uncommitted = Vec::with_capacity(accepted.len());
        for event in &accepted {
            uncommitted.push(UncommittedEvent::from_typed(case_id, EventId::new(), event)?);
        }
        let event_ids: Vec<EventId> = uncommitted.iter().map(|e| e.event_id).collect();

        let committed =
            self.store
                .append_batch(case_id, uncommitted, ExpectedVersion::Exact(version))?;
        let new_version = committed
            .last()
            .map(|e| e.sequence_number)
            .unwrap_or(version);

        // Index maintenance is part of the same submission, so a reader that
        // observes the new version also observes its relations.
        for event in &accepted {
            self.relations.apply_changes(&relation_changes(&state, event));
            state.apply(event).map_err(SubmitError::from)?;
        }

        info!(
            %case_id,
            events = event_ids.len(),
            version = new_version,
            "submission committed"
        );

        if let Some(meta) = state.meta() {
            let summary = format!("case advanced to version {new_version}");
            if let Err(e) = self.notifier.post_update(&meta.contract_ref, &summary) {
                warn!(%case_id, error = %e, "collaboration notification failed");
            }
        }

        Ok(SubmissionOutcome {
            event_ids,
            new_version,
            case_state: state,
        })
    }

    fn check_cap(&self, amount: Money, cited: &[CaseId]) -> Result<(), SubmitError> {
        let mut states = Vec::with_capacity(cited.len());
        for id in cited {
            let (stream, _) = self.store.read(*id)?;
            states.push(project_stream(*id, &stream)?);
        }
        check_acceleration_cap(amount, &states).map_err(SubmitError::from)
    }
}

/// The acceleration figure a command puts in play, if any. Drafting an
/// acceleration claim checks the cap immediately; submitting the compensation
/// track re-checks it, since cited decisions may have changed since drafting.
fn acceleration_under_check(
    command: &ClaimCommand,
    state: &CaseState,
) -> Option<(Money, Vec<CaseId>)> {
    match command {
        ClaimCommand::DraftClaim(c) => match &c.value {
            ClaimValue::Acceleration { amount, disputed } => Some((*amount, disputed.clone())),
            _ => None,
        },
        ClaimCommand::SubmitClaim(c) if c.track == Track::Compensation => {
            match &state.track(Track::Compensation).claimed {
                Some(ClaimValue::Acceleration { amount, disputed }) => {
                    Some((*amount, disputed.clone()))
                }
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use claimledger_claims::{DraftClaim, OpenCase, TrackStatus};
    use claimledger_core::{ActorId, ActorRole, DurationDays};

    use crate::event_store::InMemoryEventStore;

    struct DenyAll;
    impl AccessControl for DenyAll {
        fn authorize(&self, _a: ActorId, _r: ActorRole, _c: CaseId) -> bool {
            false
        }
    }

    fn pipeline() -> SubmissionPipeline<InMemoryEventStore> {
        SubmissionPipeline::new(InMemoryEventStore::new(), Arc::new(RelationIndex::new()))
    }

    fn open_case(pipeline: &SubmissionPipeline<InMemoryEventStore>) -> (CaseId, ActorId, ActorId) {
        let case_id = CaseId::new();
        let claimant = ActorId::new();
        let respondent = ActorId::new();
        pipeline
            .submit(Submission {
                case_id,
                command: ClaimCommand::OpenCase(OpenCase {
                    case_id,
                    claimant_id: claimant,
                    respondent_id: respondent,
                    contract_ref: "NS-8405/7".to_string(),
                    title: "Winter works".to_string(),
                    daily_penalty_rate: Money::from_minor_units(50_000),
                    actor_id: claimant,
                    actor_role: ActorRole::Claimant,
                    occurred_at: Utc::now(),
                }),
                expected_version: 0,
            })
            .unwrap();
        (case_id, claimant, respondent)
    }

    #[test]
    fn opening_a_case_commits_one_event() {
        let pipeline = pipeline();
        let (case_id, _, _) = open_case(&pipeline);

        let (state, version) = pipeline.case_state(case_id).unwrap();
        assert_eq!(version, 1);
        assert!(state.is_opened());
    }

    #[test]
    fn a_rejected_command_appends_nothing() {
        let pipeline = pipeline();
        let (case_id, claimant, _) = open_case(&pipeline);

        // Days on the compensation track is a kind mismatch.
        let err = pipeline
            .submit(Submission {
                case_id,
                command: ClaimCommand::DraftClaim(DraftClaim {
                    case_id,
                    track: Track::Compensation,
                    value: ClaimValue::Days {
                        days: DurationDays::new(3),
                    },
                    amends: None,
                    actor_id: claimant,
                    actor_role: ActorRole::Claimant,
                    occurred_at: Utc::now(),
                }),
                expected_version: 1,
            })
            .unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(_)));

        let (state, version) = pipeline.case_state(case_id).unwrap();
        assert_eq!(version, 1);
        assert_eq!(
            state.track(Track::Compensation).status,
            TrackStatus::NotStarted
        );
    }

    #[test]
    fn role_failures_surface_before_the_cap_check() {
        let pipeline = pipeline();
        let (case_id, _, respondent) = open_case(&pipeline);

        // A respondent cannot draft; that is the answer even when the draft
        // is an over-cap acceleration claim citing a case that does not
        // exist.
        let err = pipeline
            .submit(Submission {
                case_id,
                command: ClaimCommand::DraftClaim(DraftClaim {
                    case_id,
                    track: Track::Compensation,
                    value: ClaimValue::Acceleration {
                        amount: Money::from_minor_units(10_000_000),
                        disputed: vec![CaseId::new()],
                    },
                    amends: None,
                    actor_id: respondent,
                    actor_role: ActorRole::Respondent,
                    occurred_at: Utc::now(),
                }),
                expected_version: 1,
            })
            .unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(_)));
        assert!(err.to_string().contains("only the claimant"));
    }

    #[test]
    fn stale_expected_version_is_a_conflict() {
        let pipeline = pipeline();
        let (case_id, claimant, _) = open_case(&pipeline);

        let err = pipeline
            .submit(Submission {
                case_id,
                command: ClaimCommand::DraftClaim(DraftClaim {
                    case_id,
                    track: Track::Basis,
                    value: ClaimValue::Ground {
                        description: "Changed ground conditions".to_string(),
                    },
                    amends: None,
                    actor_id: claimant,
                    actor_role: ActorRole::Claimant,
                    occurred_at: Utc::now(),
                }),
                expected_version: 0,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Conflict {
                expected: 0,
                actual: 1
            }
        ));
    }

    #[test]
    fn denied_actors_never_reach_the_store() {
        let pipeline = SubmissionPipeline::new(
            InMemoryEventStore::new(),
            Arc::new(RelationIndex::new()),
        )
        .with_access(Arc::new(DenyAll));
        let case_id = CaseId::new();

        let err = pipeline
            .submit(Submission {
                case_id,
                command: ClaimCommand::OpenCase(OpenCase {
                    case_id,
                    claimant_id: ActorId::new(),
                    respondent_id: ActorId::new(),
                    contract_ref: "NS-8405/7".to_string(),
                    title: "Winter works".to_string(),
                    daily_penalty_rate: Money::from_minor_units(50_000),
                    actor_id: ActorId::new(),
                    actor_role: ActorRole::Claimant,
                    occurred_at: Utc::now(),
                }),
                expected_version: 0,
            })
            .unwrap_err();
        assert!(matches!(err, SubmitError::Unauthorized));
        assert!(pipeline.store().case_ids().unwrap().is_empty());
    }
}

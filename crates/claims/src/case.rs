//! Aggregate behavior of a claim case: decision logic (`handle`) and state
//! evolution (`apply`).
//!
//! `handle` is the business-rule validator: it inspects a command against the
//! projected state and either emits events or rejects with the specific
//! failing rule. `apply` folds one accepted event; since every append is
//! validator-gated, an event that cannot be applied signals a corrupt log and
//! halts replay.

use claimledger_core::{Aggregate, ActorRole, DomainError};

use crate::command::{
    ClaimCommand, DraftClaim, IssueDecision, LockTrack, OpenCase, OpenReview, SubmitClaim,
    WithdrawClaim,
};
use crate::decision::{evaluate_decision, DecisionOutcome};
use crate::event::{
    CaseOpened, ClaimDrafted, ClaimEvent, ClaimSubmitted, ClaimValue, ClaimWithdrawn,
    DecisionIssued, ReviewOpened, Track, TrackLocked,
};
use crate::state::{CaseMeta, CaseState, TrackStatus};

impl Aggregate for CaseState {
    type Command = ClaimCommand;
    type Event = ClaimEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) -> Result<(), DomainError> {
        if event.case_id() != self.case_id() {
            return Err(DomainError::invariant(
                "event belongs to a different case",
            ));
        }

        match event {
            ClaimEvent::CaseOpened(e) => self.apply_case_opened(e)?,
            ClaimEvent::ClaimDrafted(e) => self.apply_drafted(e)?,
            ClaimEvent::ClaimSubmitted(e) => {
                self.apply_transition(e.track, TrackStatus::Draft, TrackStatus::Submitted)?
            }
            ClaimEvent::ReviewOpened(e) => {
                self.apply_transition(e.track, TrackStatus::Submitted, TrackStatus::UnderReview)?
            }
            ClaimEvent::DecisionIssued(e) => self.apply_decision(e)?,
            ClaimEvent::ClaimWithdrawn(e) => self.apply_withdrawn(e)?,
            ClaimEvent::TrackLocked(e) => self.apply_locked(e)?,
        }

        // Deterministic version tracking: +1 per applied event.
        self.bump_version();
        Ok(())
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, DomainError> {
        match command {
            ClaimCommand::OpenCase(cmd) => self.handle_open(cmd),
            ClaimCommand::DraftClaim(cmd) => self.handle_draft(cmd),
            ClaimCommand::SubmitClaim(cmd) => self.handle_submit(cmd),
            ClaimCommand::OpenReview(cmd) => self.handle_open_review(cmd),
            ClaimCommand::IssueDecision(cmd) => self.handle_decision(cmd),
            ClaimCommand::WithdrawClaim(cmd) => self.handle_withdraw(cmd),
            ClaimCommand::LockTrack(cmd) => self.handle_lock(cmd),
        }
    }
}

// Event application (fold). Total over the event set; any failure is log
// corruption, surfaced to the operator and never skipped.
impl CaseState {
    fn apply_case_opened(&mut self, e: &CaseOpened) -> Result<(), DomainError> {
        if self.is_opened() {
            return Err(DomainError::invariant("case opened twice"));
        }
        self.set_meta(CaseMeta {
            claimant_id: e.claimant_id,
            respondent_id: e.respondent_id,
            contract_ref: e.contract_ref.clone(),
            title: e.title.clone(),
            daily_penalty_rate: e.daily_penalty_rate,
        });
        Ok(())
    }

    fn ensure_opened(&self) -> Result<(), DomainError> {
        if self.is_opened() {
            Ok(())
        } else {
            Err(DomainError::invariant("event precedes case opening"))
        }
    }

    fn apply_drafted(&mut self, e: &ClaimDrafted) -> Result<(), DomainError> {
        self.ensure_opened()?;
        let track = self.track(e.track);
        if !matches!(track.status, TrackStatus::NotStarted | TrackStatus::Draft) {
            return Err(DomainError::invariant(format!(
                "draft recorded on {} track in status {:?}",
                e.track, track.status
            )));
        }
        let track = self.track_mut(e.track);
        track.claimed = Some(e.value.clone());
        track.status = TrackStatus::Draft;
        Ok(())
    }

    fn apply_transition(
        &mut self,
        track: Track,
        from: TrackStatus,
        to: TrackStatus,
    ) -> Result<(), DomainError> {
        self.ensure_opened()?;
        let current = self.track(track).status;
        if current != from {
            return Err(DomainError::invariant(format!(
                "{track} track transition to {to:?} recorded from status {current:?}"
            )));
        }
        self.track_mut(track).status = to;
        Ok(())
    }

    fn apply_decision(&mut self, e: &DecisionIssued) -> Result<(), DomainError> {
        self.ensure_opened()?;
        let track = self.track(e.track);
        if !track.status.may_receive_decision() {
            return Err(DomainError::invariant(format!(
                "decision recorded on {} track in status {:?}",
                e.track, track.status
            )));
        }
        let claimed = track
            .claimed
            .clone()
            .ok_or_else(|| DomainError::invariant("decision recorded without a claim"))?;

        // The outcome is derived from the findings on every fold, so the
        // evaluator stays the single source of decision semantics.
        let outcome = evaluate_decision(&claimed, &e.findings)?;
        let status = match &outcome {
            DecisionOutcome::Approved { .. } => TrackStatus::Approved,
            DecisionOutcome::PartiallyApproved { .. } => TrackStatus::PartiallyApproved,
            DecisionOutcome::RejectedOnMerits { .. } | DecisionOutcome::Barred { .. } => {
                TrackStatus::Rejected
            }
        };

        let track = self.track_mut(e.track);
        track.decision = Some(outcome);
        track.status = status;
        Ok(())
    }

    fn apply_withdrawn(&mut self, e: &ClaimWithdrawn) -> Result<(), DomainError> {
        self.ensure_opened()?;
        let current = self.track(e.track).status;
        if !matches!(
            current,
            TrackStatus::Draft | TrackStatus::Submitted | TrackStatus::UnderReview
        ) {
            return Err(DomainError::invariant(format!(
                "withdrawal recorded on {} track in status {current:?}",
                e.track
            )));
        }
        self.track_mut(e.track).status = TrackStatus::Withdrawn;
        Ok(())
    }

    fn apply_locked(&mut self, e: &TrackLocked) -> Result<(), DomainError> {
        self.ensure_opened()?;
        let current = self.track(e.track).status;
        if current == TrackStatus::Locked || !current.is_concluded() {
            return Err(DomainError::invariant(format!(
                "lock recorded on {} track in status {current:?}",
                e.track
            )));
        }
        self.track_mut(e.track).status = TrackStatus::Locked;
        Ok(())
    }
}

// Command handling (the validator). Role constraints, status preconditions,
// then gate evaluation; no state mutation.
impl CaseState {
    fn ensure_role(&self, actual: ActorRole, required: ActorRole) -> Result<(), DomainError> {
        if actual != required {
            return Err(DomainError::validation(format!(
                "only the {required} may perform this action"
            )));
        }
        Ok(())
    }

    fn ensure_case(&self, case_id: claimledger_core::CaseId) -> Result<(), DomainError> {
        if case_id != self.case_id() {
            return Err(DomainError::invariant("case_id mismatch"));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenCase) -> Result<Vec<ClaimEvent>, DomainError> {
        self.ensure_case(cmd.case_id)?;
        self.ensure_role(cmd.actor_role, ActorRole::Claimant)?;
        if self.is_opened() {
            return Err(DomainError::conflict("case already opened"));
        }
        if cmd.contract_ref.is_empty() {
            return Err(DomainError::validation("contract_ref must not be empty"));
        }

        Ok(vec![ClaimEvent::CaseOpened(CaseOpened {
            case_id: cmd.case_id,
            claimant_id: cmd.claimant_id,
            respondent_id: cmd.respondent_id,
            contract_ref: cmd.contract_ref.clone(),
            title: cmd.title.clone(),
            daily_penalty_rate: cmd.daily_penalty_rate,
            actor_id: cmd.actor_id,
            actor_role: cmd.actor_role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_draft(&self, cmd: &DraftClaim) -> Result<Vec<ClaimEvent>, DomainError> {
        self.ensure_case(cmd.case_id)?;
        self.ensure_role(cmd.actor_role, ActorRole::Claimant)?;
        if !self.is_opened() {
            return Err(DomainError::not_found());
        }

        let status = self.track(cmd.track).status;
        if !matches!(status, TrackStatus::NotStarted | TrackStatus::Draft) {
            return Err(DomainError::validation(format!(
                "cannot draft on {} track in status {status:?}",
                cmd.track
            )));
        }

        if cmd.value.kind() != cmd.track.expected_kind() {
            return Err(DomainError::validation(format!(
                "claim value kind does not fit the {} track",
                cmd.track
            )));
        }
        if cmd.value.is_zero() {
            return Err(DomainError::validation("claimed value must be non-zero"));
        }
        if let ClaimValue::Acceleration { disputed, .. } = &cmd.value {
            if disputed.is_empty() {
                return Err(DomainError::validation(
                    "acceleration claim must cite at least one rejected schedule claim",
                ));
            }
            if disputed.contains(&self.case_id()) {
                return Err(DomainError::validation(
                    "acceleration claim cannot cite its own case",
                ));
            }
        }

        Ok(vec![ClaimEvent::ClaimDrafted(ClaimDrafted {
            case_id: cmd.case_id,
            track: cmd.track,
            value: cmd.value.clone(),
            amends: cmd.amends,
            actor_id: cmd.actor_id,
            actor_role: cmd.actor_role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_submit(&self, cmd: &SubmitClaim) -> Result<Vec<ClaimEvent>, DomainError> {
        self.ensure_case(cmd.case_id)?;
        self.ensure_role(cmd.actor_role, ActorRole::Claimant)?;
        if !self.is_opened() {
            return Err(DomainError::not_found());
        }

        let status = self.track(cmd.track).status;
        if status != TrackStatus::Draft {
            return Err(DomainError::validation(format!(
                "only a drafted claim can be submitted ({} track is {status:?})",
                cmd.track
            )));
        }

        Ok(vec![ClaimEvent::ClaimSubmitted(ClaimSubmitted {
            case_id: cmd.case_id,
            track: cmd.track,
            actor_id: cmd.actor_id,
            actor_role: cmd.actor_role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_open_review(&self, cmd: &OpenReview) -> Result<Vec<ClaimEvent>, DomainError> {
        self.ensure_case(cmd.case_id)?;
        self.ensure_role(cmd.actor_role, ActorRole::Respondent)?;
        if !self.is_opened() {
            return Err(DomainError::not_found());
        }

        let status = self.track(cmd.track).status;
        if status != TrackStatus::Submitted {
            return Err(DomainError::validation(format!(
                "only a submitted claim can be taken under review ({} track is {status:?})",
                cmd.track
            )));
        }

        Ok(vec![ClaimEvent::ReviewOpened(ReviewOpened {
            case_id: cmd.case_id,
            track: cmd.track,
            actor_id: cmd.actor_id,
            actor_role: cmd.actor_role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_decision(&self, cmd: &IssueDecision) -> Result<Vec<ClaimEvent>, DomainError> {
        self.ensure_case(cmd.case_id)?;
        self.ensure_role(cmd.actor_role, ActorRole::Respondent)?;
        if !self.is_opened() {
            return Err(DomainError::not_found());
        }

        let track = self.track(cmd.track);
        if !track.status.may_receive_decision() {
            return Err(DomainError::validation(format!(
                "a decision is only valid while the claim is submitted or under review \
                 ({} track is {:?})",
                cmd.track, track.status
            )));
        }
        let claimed = track
            .claimed
            .as_ref()
            .ok_or_else(|| DomainError::invariant("submitted track has no claimed value"))?;

        // Run the gates now so an invalid decision never reaches the log.
        evaluate_decision(claimed, &cmd.findings)?;

        Ok(vec![ClaimEvent::DecisionIssued(DecisionIssued {
            case_id: cmd.case_id,
            track: cmd.track,
            findings: cmd.findings.clone(),
            actor_id: cmd.actor_id,
            actor_role: cmd.actor_role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_withdraw(&self, cmd: &WithdrawClaim) -> Result<Vec<ClaimEvent>, DomainError> {
        self.ensure_case(cmd.case_id)?;
        self.ensure_role(cmd.actor_role, ActorRole::Claimant)?;
        if !self.is_opened() {
            return Err(DomainError::not_found());
        }

        let status = self.track(cmd.track).status;
        if !matches!(
            status,
            TrackStatus::Draft | TrackStatus::Submitted | TrackStatus::UnderReview
        ) {
            return Err(DomainError::validation(format!(
                "only an undecided claim can be withdrawn ({} track is {status:?})",
                cmd.track
            )));
        }

        Ok(vec![ClaimEvent::ClaimWithdrawn(ClaimWithdrawn {
            case_id: cmd.case_id,
            track: cmd.track,
            actor_id: cmd.actor_id,
            actor_role: cmd.actor_role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_lock(&self, cmd: &LockTrack) -> Result<Vec<ClaimEvent>, DomainError> {
        self.ensure_case(cmd.case_id)?;
        if !self.is_opened() {
            return Err(DomainError::not_found());
        }

        let status = self.track(cmd.track).status;
        if status == TrackStatus::Locked {
            return Err(DomainError::conflict(format!(
                "{} track is already locked",
                cmd.track
            )));
        }
        if !status.is_concluded() {
            return Err(DomainError::validation(format!(
                "only a decided or withdrawn track can be locked ({} track is {status:?})",
                cmd.track
            )));
        }

        Ok(vec![ClaimEvent::TrackLocked(TrackLocked {
            case_id: cmd.case_id,
            track: cmd.track,
            actor_id: cmd.actor_id,
            actor_role: cmd.actor_role,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    use claimledger_core::{ActorId, CaseId, DurationDays, Money};

    use crate::decision::GateFindings;
    use crate::state::OverallStatus;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    struct Fixture {
        case_id: CaseId,
        claimant: ActorId,
        respondent: ActorId,
        state: CaseState,
    }

    impl Fixture {
        fn new() -> Self {
            let case_id = CaseId::new();
            Self {
                case_id,
                claimant: ActorId::new(),
                respondent: ActorId::new(),
                state: CaseState::empty(case_id),
            }
        }

        fn run(&mut self, cmd: ClaimCommand) -> Vec<ClaimEvent> {
            let events = self.state.handle(&cmd).unwrap();
            for e in &events {
                self.state.apply(e).unwrap();
            }
            events
        }

        fn open(&mut self) {
            let cmd = ClaimCommand::OpenCase(OpenCase {
                case_id: self.case_id,
                claimant_id: self.claimant,
                respondent_id: self.respondent,
                contract_ref: "NS-8405/42".to_string(),
                title: "Rock excavation change order".to_string(),
                daily_penalty_rate: Money::from_minor_units(50_000),
                actor_id: self.claimant,
                actor_role: ActorRole::Claimant,
                occurred_at: test_time(),
            });
            self.run(cmd);
        }

        fn draft(&mut self, track: Track, value: ClaimValue) {
            let cmd = ClaimCommand::DraftClaim(DraftClaim {
                case_id: self.case_id,
                track,
                value,
                amends: None,
                actor_id: self.claimant,
                actor_role: ActorRole::Claimant,
                occurred_at: test_time(),
            });
            self.run(cmd);
        }

        fn submit(&mut self, track: Track) {
            let cmd = ClaimCommand::SubmitClaim(SubmitClaim {
                case_id: self.case_id,
                track,
                actor_id: self.claimant,
                actor_role: ActorRole::Claimant,
                occurred_at: test_time(),
            });
            self.run(cmd);
        }

        fn decide(&mut self, track: Track, findings: GateFindings) -> Result<(), DomainError> {
            let cmd = ClaimCommand::IssueDecision(IssueDecision {
                case_id: self.case_id,
                track,
                findings,
                actor_id: self.respondent,
                actor_role: ActorRole::Respondent,
                occurred_at: test_time(),
            });
            let events = self.state.handle(&cmd)?;
            for e in &events {
                self.state.apply(e).unwrap();
            }
            Ok(())
        }
    }

    fn days(n: u32) -> ClaimValue {
        ClaimValue::Days {
            days: DurationDays::new(n),
        }
    }

    #[test]
    fn late_notice_rejection_records_barred_principal_and_subsidiary_grant() {
        let mut fx = Fixture::new();
        fx.open();
        fx.draft(Track::Schedule, days(30));
        fx.submit(Track::Schedule);

        fx.decide(
            Track::Schedule,
            GateFindings {
                notice_timely: false,
                conditions_met: true,
                assessed: days(10),
                subsidiary_position: None,
                reason: Some("notice arrived after the contractual window".to_string()),
            },
        )
        .unwrap();

        let track = fx.state.track(Track::Schedule);
        assert_eq!(track.status, TrackStatus::Rejected);
        let decision = track.decision.as_ref().unwrap();
        assert!(decision.is_barred());
        assert_eq!(decision.subsidiary().unwrap().granted, days(10));
    }

    #[test]
    fn respondent_cannot_submit_claims() {
        let mut fx = Fixture::new();
        fx.open();
        fx.draft(Track::Schedule, days(5));

        let cmd = ClaimCommand::SubmitClaim(SubmitClaim {
            case_id: fx.case_id,
            track: Track::Schedule,
            actor_id: fx.respondent,
            actor_role: ActorRole::Respondent,
            occurred_at: test_time(),
        });
        let err = fx.state.handle(&cmd).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("only the claimant")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn claimant_cannot_issue_decisions() {
        let mut fx = Fixture::new();
        fx.open();
        fx.draft(Track::Schedule, days(5));
        fx.submit(Track::Schedule);

        let cmd = ClaimCommand::IssueDecision(IssueDecision {
            case_id: fx.case_id,
            track: Track::Schedule,
            findings: GateFindings {
                notice_timely: true,
                conditions_met: true,
                assessed: days(5),
                subsidiary_position: None,
                reason: None,
            },
            actor_id: fx.claimant,
            actor_role: ActorRole::Claimant,
            occurred_at: test_time(),
        });
        let err = fx.state.handle(&cmd).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("only the respondent")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn decision_requires_submitted_or_under_review() {
        let mut fx = Fixture::new();
        fx.open();
        fx.draft(Track::Compensation, ClaimValue::Amount {
            amount: Money::from_minor_units(1_000),
        });

        let err = fx
            .decide(
                Track::Compensation,
                GateFindings {
                    notice_timely: true,
                    conditions_met: true,
                    assessed: ClaimValue::Amount {
                        amount: Money::from_minor_units(1_000),
                    },
                    subsidiary_position: None,
                    reason: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn tracks_evolve_independently() {
        let mut fx = Fixture::new();
        fx.open();
        fx.draft(Track::Basis, ClaimValue::Ground {
            description: "unforeseen ground conditions".to_string(),
        });
        fx.draft(Track::Schedule, days(12));
        fx.submit(Track::Schedule);

        assert_eq!(fx.state.track(Track::Basis).status, TrackStatus::Draft);
        assert_eq!(fx.state.track(Track::Schedule).status, TrackStatus::Submitted);
        assert_eq!(
            fx.state.track(Track::Compensation).status,
            TrackStatus::NotStarted
        );
        assert_eq!(fx.state.overall_status(), OverallStatus::AwaitingDecision);
    }

    #[test]
    fn value_kind_must_fit_the_track() {
        let mut fx = Fixture::new();
        fx.open();

        let cmd = ClaimCommand::DraftClaim(DraftClaim {
            case_id: fx.case_id,
            track: Track::Schedule,
            value: ClaimValue::Amount {
                amount: Money::from_minor_units(100),
            },
            amends: None,
            actor_id: fx.claimant,
            actor_role: ActorRole::Claimant,
            occurred_at: test_time(),
        });
        let err = fx.state.handle(&cmd).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn withdrawal_is_a_new_event_not_a_mutation() {
        let mut fx = Fixture::new();
        fx.open();
        fx.draft(Track::Schedule, days(8));
        fx.submit(Track::Schedule);

        let events = fx.run(ClaimCommand::WithdrawClaim(WithdrawClaim {
            case_id: fx.case_id,
            track: Track::Schedule,
            actor_id: fx.claimant,
            actor_role: ActorRole::Claimant,
            occurred_at: test_time(),
        }));
        assert_eq!(events.len(), 1);

        let track = fx.state.track(Track::Schedule);
        assert_eq!(track.status, TrackStatus::Withdrawn);
        // The claim itself stays in state; only the status moved.
        assert_eq!(track.claimed, Some(days(8)));
    }

    #[test]
    fn locking_requires_a_concluded_track_and_is_final() {
        let mut fx = Fixture::new();
        fx.open();
        fx.draft(Track::Schedule, days(8));

        let premature = ClaimCommand::LockTrack(LockTrack {
            case_id: fx.case_id,
            track: Track::Schedule,
            actor_id: fx.respondent,
            actor_role: ActorRole::Respondent,
            occurred_at: test_time(),
        });
        assert!(fx.state.handle(&premature).is_err());

        fx.submit(Track::Schedule);
        fx.decide(
            Track::Schedule,
            GateFindings {
                notice_timely: true,
                conditions_met: true,
                assessed: days(8),
                subsidiary_position: None,
                reason: None,
            },
        )
        .unwrap();

        fx.run(ClaimCommand::LockTrack(LockTrack {
            case_id: fx.case_id,
            track: Track::Schedule,
            actor_id: fx.respondent,
            actor_role: ActorRole::Respondent,
            occurred_at: test_time(),
        }));
        assert_eq!(fx.state.track(Track::Schedule).status, TrackStatus::Locked);

        let again = ClaimCommand::LockTrack(LockTrack {
            case_id: fx.case_id,
            track: Track::Schedule,
            actor_id: fx.respondent,
            actor_role: ActorRole::Respondent,
            occurred_at: test_time(),
        });
        assert!(matches!(
            fx.state.handle(&again).unwrap_err(),
            DomainError::Conflict(_)
        ));
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut fx = Fixture::new();
        fx.open();
        fx.draft(Track::Schedule, days(8));

        let before = fx.state.clone();
        let cmd = ClaimCommand::SubmitClaim(SubmitClaim {
            case_id: fx.case_id,
            track: Track::Schedule,
            actor_id: fx.claimant,
            actor_role: ActorRole::Claimant,
            occurred_at: test_time(),
        });
        let events1 = fx.state.handle(&cmd).unwrap();
        let events2 = fx.state.handle(&cmd).unwrap();

        assert_eq!(fx.state, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn applying_an_event_out_of_order_is_a_corrupt_log() {
        let case_id = CaseId::new();
        let mut state = CaseState::empty(case_id);

        let err = state
            .apply(&ClaimEvent::ClaimSubmitted(ClaimSubmitted {
                case_id,
                track: Track::Schedule,
                actor_id: ActorId::new(),
                actor_role: ActorRole::Claimant,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn foreign_case_event_is_rejected_by_the_fold() {
        let mut state = CaseState::empty(CaseId::new());
        let err = state
            .apply(&ClaimEvent::CaseOpened(CaseOpened {
                case_id: CaseId::new(),
                claimant_id: ActorId::new(),
                respondent_id: ActorId::new(),
                contract_ref: "X".to_string(),
                title: String::new(),
                daily_penalty_rate: Money::ZERO,
                actor_id: ActorId::new(),
                actor_role: ActorRole::Claimant,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}

//! `claimledger-claims` — the change-order claims domain.
//!
//! Pure domain logic for one contract standard and its three claim tracks:
//! the closed event taxonomy, the case-state fold, the gated decision
//! evaluator and the acceleration cap. No IO; persistence and orchestration
//! live in `claimledger-infra`.

pub mod acceleration;
pub mod case;
pub mod command;
pub mod decision;
pub mod event;
pub mod projection;
pub mod relation;
pub mod state;

pub use acceleration::{acceleration_cap, check_acceleration_cap, disputed_schedule_days};
pub use command::{
    ClaimCommand, DraftClaim, IssueDecision, LockTrack, OpenCase, OpenReview, SubmitClaim,
    WithdrawClaim,
};
pub use decision::{evaluate_decision, DecisionOutcome, Gate, GateFindings, SubsidiaryOutcome};
pub use event::{ClaimEvent, ClaimKind, ClaimValue, Track};
pub use projection::compute_state;
pub use relation::{relation_changes, RelationChanges, RelationEntry, RelationKind};
pub use state::{CaseMeta, CaseState, OverallStatus, TrackState, TrackStatus};

//! Replay: folding an ordered event sequence into case state.

use claimledger_core::{Aggregate, CaseId, DomainError, DomainResult};
use claimledger_events::EventEnvelope;

use crate::event::ClaimEvent;
use crate::state::CaseState;

/// Compute the case state by folding the full event list from empty.
///
/// Pure and deterministic: identical input always yields identical state,
/// independent of wall-clock time or external systems. Any event that cannot
/// be applied to the accumulated state is an error, never skipped — appends
/// are validator-gated, so failure here means the log is corrupt.
pub fn compute_state(case_id: CaseId, events: &[ClaimEvent]) -> DomainResult<CaseState> {
    let mut state = CaseState::empty(case_id);
    for event in events {
        state.apply(event)?;
    }
    Ok(state)
}

/// Envelope-driven variant of the fold, for consumers that stream envelopes
/// instead of bare events.
impl claimledger_events::Projection for CaseState {
    type Ev = ClaimEvent;
    type Error = DomainError;

    fn apply(&mut self, envelope: &EventEnvelope<ClaimEvent>) -> Result<(), DomainError> {
        Aggregate::apply(self, envelope.payload())
    }
}

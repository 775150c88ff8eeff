//! Statutory cap on acceleration claims.
//!
//! An acceleration claim covers the cost of speeding up work after a
//! disputed schedule-extension rejection. Its cost is capped at the disputed
//! delay times the contractual daily penalty rate, times a statutory 1.3
//! multiple.

use claimledger_core::{DomainError, DomainResult, DurationDays, Money};

use crate::decision::DecisionOutcome;
use crate::event::{ClaimValue, Track};
use crate::state::CaseState;

/// Statutory multiple over the penalty exposure, in percent.
pub const CAP_PERCENT: u64 = 130;

fn days_of(value: &ClaimValue) -> DomainResult<DurationDays> {
    match value {
        ClaimValue::Days { days } => Ok(*days),
        _ => Err(DomainError::invariant(
            "schedule decision carries a non-duration value",
        )),
    }
}

/// The rejected duration of a cited case's schedule claim.
///
/// For a rejection on the merits the principal figures govern. When the
/// principal result is barred — the rejection traces to a disputed
/// legal-ground or notice bar rather than the merits — the *subsidiary*
/// granted figure is used instead, since that is the respondent's own
/// position should the bar fall.
pub fn disputed_schedule_days(state: &CaseState) -> DomainResult<DurationDays> {
    let track = state.track(Track::Schedule);
    let claimed = match &track.claimed {
        Some(value) => days_of(value)?,
        None => {
            return Err(DomainError::validation(
                "cited case has no schedule claim",
            ))
        }
    };

    match &track.decision {
        None => Err(DomainError::validation(
            "cited case's schedule claim has not been decided",
        )),
        Some(DecisionOutcome::Approved { .. }) => Err(DomainError::validation(
            "cited case's schedule claim was approved; nothing is disputed",
        )),
        Some(DecisionOutcome::PartiallyApproved { granted }) => {
            Ok(claimed.saturating_sub(days_of(granted)?))
        }
        Some(DecisionOutcome::RejectedOnMerits { .. }) => Ok(claimed),
        Some(DecisionOutcome::Barred { subsidiary, .. }) => match subsidiary {
            Some(sub) => Ok(claimed.saturating_sub(days_of(&sub.granted)?)),
            None => Ok(claimed),
        },
    }
}

/// The cap for an acceleration claim citing the given cases:
/// `Σ disputed_days × daily_penalty_rate × 1.3`, integer arithmetic.
pub fn acceleration_cap(cited: &[CaseState]) -> DomainResult<Money> {
    let mut exposure = Money::ZERO;
    for state in cited {
        let rate = state
            .meta()
            .ok_or_else(|| DomainError::invariant("cited case has no metadata"))?
            .daily_penalty_rate;
        let days = disputed_schedule_days(state)?;
        exposure = exposure.checked_add(rate.checked_mul_days(days)?)?;
    }
    exposure.scale_percent(CAP_PERCENT)
}

/// Reject an acceleration cost exceeding the statutory cap.
pub fn check_acceleration_cap(amount: Money, cited: &[CaseState]) -> DomainResult<()> {
    let cap = acceleration_cap(cited)?;
    if amount > cap {
        return Err(DomainError::validation(format!(
            "acceleration cost {amount} exceeds the statutory cap {cap}"
        )));
    }
    Ok(())
}

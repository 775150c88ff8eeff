//! The gated decision evaluator.
//!
//! A respondent decision runs through an ordered gate sequence:
//!
//! 1. **Preclusion** — was notice given in time? Failing this bars the claim
//!    regardless of merit.
//! 2. **Condition** — are the substantive entitlement conditions met?
//! 3. **Quantification** — what is warranted on the merits, ignoring gates
//!    1–2.
//! 4. **Outcome synthesis** — the principal result respects gates 1–2; a
//!    subsidiary result exists only when the principal is barred and states
//!    the outcome if the bar were later overturned.

use serde::{Deserialize, Serialize};

use claimledger_core::{DomainError, DomainResult};

use crate::event::ClaimValue;

/// Which gate barred a principal result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    /// Late notice: the claim right is precluded.
    Preclusion,
    /// Substantive entitlement conditions not met (e.g. no actual
    /// critical-path delay).
    Condition,
}

impl core::fmt::Display for Gate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Gate::Preclusion => write!(f, "preclusion"),
            Gate::Condition => write!(f, "condition"),
        }
    }
}

/// The respondent's findings per gate, as carried by a decision event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateFindings {
    /// Gate 1: notice was given within the contractual window.
    pub notice_timely: bool,
    /// Gate 2: the substantive entitlement conditions are met.
    pub conditions_met: bool,
    /// Gate 3: the value warranted on the merits, gates 1–2 ignored.
    pub assessed: ClaimValue,
    /// Explicit fallback grant, meaningful only alongside a barred principal
    /// result. Overrides `assessed` as the subsidiary figure when given.
    pub subsidiary_position: Option<ClaimValue>,
    pub reason: Option<String>,
}

/// The fallback outcome should the principal bar be overturned.
///
/// Only constructible inside [`DecisionOutcome::Barred`]; there is no way to
/// record a subsidiary result next to an unbarred principal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsidiaryOutcome {
    pub granted: ClaimValue,
}

/// The synthesized decision on one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Granted in full.
    Approved { granted: ClaimValue },
    /// Granted in part, on the merits.
    PartiallyApproved { granted: ClaimValue },
    /// Rejected on the merits; both gates passed, so no subsidiary result.
    RejectedOnMerits { reason: String },
    /// Barred by gate 1 or 2. The subsidiary outcome takes the merits
    /// quantification at face value.
    Barred {
        gate: Gate,
        reason: String,
        subsidiary: Option<SubsidiaryOutcome>,
    },
}

impl DecisionOutcome {
    pub fn is_barred(&self) -> bool {
        matches!(self, DecisionOutcome::Barred { .. })
    }

    pub fn subsidiary(&self) -> Option<&SubsidiaryOutcome> {
        match self {
            DecisionOutcome::Barred { subsidiary, .. } => subsidiary.as_ref(),
            _ => None,
        }
    }

    /// The principally granted value, if any.
    pub fn granted(&self) -> Option<&ClaimValue> {
        match self {
            DecisionOutcome::Approved { granted }
            | DecisionOutcome::PartiallyApproved { granted } => Some(granted),
            _ => None,
        }
    }
}

/// Run the gate sequence over a claimed value and the respondent's findings.
///
/// Fails with `Validation` (naming the rule) rather than coercing:
/// - the assessed kind must match the claimed kind;
/// - the assessed value must not exceed the claimed value;
/// - a subsidiary position is rejected outright while both gates pass.
pub fn evaluate_decision(
    claimed: &ClaimValue,
    findings: &GateFindings,
) -> DomainResult<DecisionOutcome> {
    if findings.assessed.kind() != claimed.kind() {
        return Err(DomainError::validation(
            "assessed value kind must match the claimed kind",
        ));
    }
    if exceeds_claimed(claimed, &findings.assessed) {
        return Err(DomainError::validation(
            "assessed value exceeds the claimed value",
        ));
    }
    if let Some(sub) = &findings.subsidiary_position {
        if findings.notice_timely && findings.conditions_met {
            return Err(DomainError::validation(
                "subsidiary position requires a barred principal result",
            ));
        }
        if sub.kind() != claimed.kind() {
            return Err(DomainError::validation(
                "subsidiary value kind must match the claimed kind",
            ));
        }
    }

    let reason = findings.reason.clone();

    // Gates 1 and 2, in order. Either failing bars the claim principally; the
    // merits quantification survives as the subsidiary figure.
    let barring_gate = if !findings.notice_timely {
        Some(Gate::Preclusion)
    } else if !findings.conditions_met {
        Some(Gate::Condition)
    } else {
        None
    };

    if let Some(gate) = barring_gate {
        let granted = findings
            .subsidiary_position
            .clone()
            .unwrap_or_else(|| findings.assessed.clone());
        let subsidiary = if granted.is_zero() {
            None
        } else {
            Some(SubsidiaryOutcome { granted })
        };
        return Ok(DecisionOutcome::Barred {
            gate,
            reason: reason.unwrap_or_else(|| default_bar_reason(gate).to_string()),
            subsidiary,
        });
    }

    // Gate 3 on the merits.
    if findings.assessed.is_zero() {
        return Ok(DecisionOutcome::RejectedOnMerits {
            reason: reason.unwrap_or_else(|| "claim not substantiated on the merits".to_string()),
        });
    }

    if &findings.assessed == claimed || equal_magnitude(claimed, &findings.assessed) {
        Ok(DecisionOutcome::Approved {
            granted: findings.assessed.clone(),
        })
    } else {
        Ok(DecisionOutcome::PartiallyApproved {
            granted: findings.assessed.clone(),
        })
    }
}

fn default_bar_reason(gate: Gate) -> &'static str {
    match gate {
        Gate::Preclusion => "notice was not given in time",
        Gate::Condition => "substantive entitlement conditions not met",
    }
}

fn exceeds_claimed(claimed: &ClaimValue, assessed: &ClaimValue) -> bool {
    match (claimed, assessed) {
        (
            ClaimValue::Amount { amount: c } | ClaimValue::Acceleration { amount: c, .. },
            ClaimValue::Amount { amount: a },
        ) => a > c,
        (ClaimValue::Days { days: c }, ClaimValue::Days { days: a }) => a > c,
        // Grounds have no magnitude to exceed.
        _ => false,
    }
}

fn equal_magnitude(claimed: &ClaimValue, assessed: &ClaimValue) -> bool {
    match (claimed, assessed) {
        (
            ClaimValue::Amount { amount: c } | ClaimValue::Acceleration { amount: c, .. },
            ClaimValue::Amount { amount: a },
        ) => a == c,
        (ClaimValue::Days { days: c }, ClaimValue::Days { days: a }) => a == c,
        _ => false,
    }
}

//! Monetary and duration value objects.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A monetary amount in the smallest currency unit (e.g. øre, cents).
///
/// The ledger deals with one contract currency, so no currency tag is
/// carried. Stored as a non-negative integer; claim amounts are never
/// fractional at this resolution.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    pub fn minor_units(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("monetary overflow"))
    }

    /// Multiply by a whole number of days (for penalty-rate arithmetic).
    pub fn checked_mul_days(self, days: DurationDays) -> DomainResult<Money> {
        self.0
            .checked_mul(u64::from(days.days()))
            .map(Money)
            .ok_or_else(|| DomainError::invariant("monetary overflow"))
    }

    /// Scale by a percentage, rounding down.
    ///
    /// Integer arithmetic only: `cap.scale_percent(130)` is the statutory
    /// 1.3 multiple without touching floating point.
    pub fn scale_percent(self, percent: u64) -> DomainResult<Money> {
        self.0
            .checked_mul(percent)
            .map(|v| Money(v / 100))
            .ok_or_else(|| DomainError::invariant("monetary overflow"))
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A schedule duration in whole calendar days.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DurationDays(u32);

impl DurationDays {
    pub fn new(days: u32) -> Self {
        Self(days)
    }

    pub fn days(self) -> u32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, other: DurationDays) -> DurationDays {
        DurationDays(self.0.saturating_sub(other.0))
    }
}

impl ValueObject for DurationDays {}

impl core::fmt::Display for DurationDays {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} days", self.0)
    }
}

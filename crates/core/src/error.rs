//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic business failure.
///
/// Everything here is a rule outcome, reproducible from the same state and
/// input: gate failures, role violations, impossible transitions, cap
/// breaches. Storage and concurrency failures live in the infrastructure
/// layer's own error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A command failed a business rule; the message names the rule so the
    /// caller can show the specific reason, never a coerced value.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The accumulated state contradicts itself. During replay this means
    /// the log is corrupt and the projection must halt.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The addressed case or claim does not exist.
    #[error("not found")]
    NotFound,

    /// The command is valid but arrived against a state that already moved
    /// past it (e.g. locking an already locked track).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The actor may not act on this case at all.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

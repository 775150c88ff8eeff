//! Aggregate root trait for the event-sourced case ledger.

/// Aggregate root marker + minimal interface.
///
/// Intentionally small so the claims domain can decide how it models state
/// transitions (pure folds, command handling) without bringing in any
/// infrastructure concerns.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Corresponds to the number of events applied (the stream revision).
    fn version(&self) -> u64;
}

/// Optimistic concurrency expectation for a case stream.
///
/// Writers declare the version they believe current; the store rejects stale
/// writers instead of merging.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (rebuilds, migrations).
    Any,
    /// Require the stream to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` returns events.
/// - **State evolution**: `apply(&mut self, event)` folds one event in.
///
/// Aggregates must not perform IO or side effects, and must never consult the
/// wall clock: replaying an identical sequence always yields identical state.
///
/// `apply` is fallible here, unlike in many event-sourcing frameworks: every
/// append is gated by `handle`, so an event that cannot be applied to the
/// accumulated state signals a corrupt log and must halt replay rather than
/// be skipped.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    ///
    /// Implementations should remain deterministic and update their internal
    /// `version()` tracking consistently (+1 per applied event).
    fn apply(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Decide which events to emit given the current state and a command.
    ///
    /// This must not mutate state. State evolution is done through `apply`.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}

use crate::{Event, EventEnvelope};

/// A projection builds a read model from an append-only event stream.
///
/// Projections are **derived, disposable views**: the log is the source of
/// truth and any projection can be deleted and rebuilt by replaying events.
/// Applying the same event stream twice must produce the same read model
/// (replay idempotence), and `apply` must never consult the clock or any
/// external system.
///
/// Unlike the aggregate fold, a projection decides its own failure policy:
/// the fallible `apply` lets implementations surface corruption instead of
/// silently skipping an event it cannot interpret.
pub trait Projection {
    type Ev: Event;
    type Error: core::fmt::Debug;

    /// Apply a single event to the projection, updating the read model.
    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>) -> Result<(), Self::Error>;
}

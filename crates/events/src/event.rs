use chrono::{DateTime, Utc};

/// A fact in an append-only case ledger.
///
/// Events are immutable once appended: corrections are new events (a
/// withdrawal, a redraft), never edits. Each carries a stable type tag so a
/// persisted stream is self-describing, and a schema version so payloads can
/// evolve without breaking old streams.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "claim.track.submitted").
    /// Decoders check this against a closed set; an unknown tag is fatal.
    fn event_type(&self) -> &'static str;

    /// Schema version of the payload for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    ///
    /// Informational only: replay ordering is by append sequence, never by
    /// this timestamp, so clock skew cannot affect correctness.
    fn occurred_at(&self) -> DateTime<Utc>;
}

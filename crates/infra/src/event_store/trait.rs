use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;

use claimledger_core::{CaseId, EventId, ExpectedVersion};

/// An event ready to be appended to a case stream, not yet assigned a
/// sequence number. The store assigns sequence numbers during append.
///
/// Built from a typed domain event with [`UncommittedEvent::from_typed`],
/// which serializes the payload and captures the event metadata needed to
/// deserialize it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncommittedEvent {
    pub event_id: EventId,
    pub case_id: CaseId,

    pub event_type: String,
    pub event_version: u32,
    pub occurred_at: DateTime<Utc>,

    pub payload: JsonValue,
}

/// A persisted event in an append-only case stream.
///
/// Sequence numbers are assigned by the store during append and are
/// monotonically increasing per case (1, 2, 3, ...) with no gaps; the last
/// sequence number is the stream version used for optimistic concurrency.
/// The record is self-describing: `event_type` tags the payload so a stream
/// can be decoded without out-of-band schema knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub event_id: EventId,
    pub case_id: CaseId,

    /// Monotonically increasing position in the case stream.
    pub sequence_number: u64,

    pub event_type: String,
    pub event_version: u32,
    pub occurred_at: DateTime<Utc>,

    pub payload: JsonValue,
}

/// Event store operation error.
///
/// Infrastructure errors only (concurrency, storage); domain rejections never
/// reach the store.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// Optimistic concurrency check failed. Caller-recoverable: re-fetch the
    /// stream and retry with the fresh version. Never silently merged.
    #[error("optimistic concurrency check failed: expected {expected}, actual {actual}")]
    Concurrency { expected: u64, actual: u64 },

    /// The backing storage failed. Fatal; the store never auto-retries.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Invalid event data or stream state.
    #[error("invalid append: {0}")]
    InvalidAppend(String),
}

/// Append-only, per-case event store.
///
/// Events are organized into one stream per case. Within a stream, the
/// read-check-write section of an append is indivisible with respect to
/// other writers on that case (per-case lock granularity, never a global
/// lock). Readers never take the write lock and observe either the pre- or
/// post-append snapshot, never a partial batch.
///
/// Implementations must:
/// - enforce optimistic concurrency against the current stream version;
/// - assign sequence numbers monotonically starting at `current + 1`;
/// - persist a batch atomically (all events or none);
/// - return events in append order, never reordered or skipped.
pub trait EventStore: Send + Sync {
    /// Append a batch of events to a case stream. All-or-nothing.
    fn append_batch(
        &self,
        case_id: CaseId,
        events: Vec<UncommittedEvent>,
        expected_version: ExpectedVersion,
    ) -> Result<Vec<StoredEvent>, EventStoreError>;

    /// Append a single event. Same semantics as a one-element batch.
    fn append(
        &self,
        case_id: CaseId,
        event: UncommittedEvent,
        expected_version: ExpectedVersion,
    ) -> Result<StoredEvent, EventStoreError> {
        let mut committed = self.append_batch(case_id, vec![event], expected_version)?;
        committed
            .pop()
            .ok_or_else(|| EventStoreError::InvalidAppend("append committed nothing".to_string()))
    }

    /// Load the full stream for a case, in append order, with the current
    /// version (0 for a stream that does not exist yet).
    fn read(&self, case_id: CaseId) -> Result<(Vec<StoredEvent>, u64), EventStoreError>;

    /// All case ids with at least one event. For full-project rebuilds.
    fn case_ids(&self) -> Result<Vec<CaseId>, EventStoreError>;
}

impl<S> EventStore for Arc<S>
where
    S: EventStore + ?Sized,
{
    fn append_batch(
        &self,
        case_id: CaseId,
        events: Vec<UncommittedEvent>,
        expected_version: ExpectedVersion,
    ) -> Result<Vec<StoredEvent>, EventStoreError> {
        (**self).append_batch(case_id, events, expected_version)
    }

    fn read(&self, case_id: CaseId) -> Result<(Vec<StoredEvent>, u64), EventStoreError> {
        (**self).read(case_id)
    }

    fn case_ids(&self) -> Result<Vec<CaseId>, EventStoreError> {
        (**self).case_ids()
    }
}

impl UncommittedEvent {
    /// Convenience constructor from a typed domain event.
    ///
    /// Keeps infra decoupled from the claims crate while still capturing the
    /// metadata needed for later deserialization.
    pub fn from_typed<E>(
        case_id: CaseId,
        event_id: EventId,
        event: &E,
    ) -> Result<Self, EventStoreError>
    where
        E: claimledger_events::Event + Serialize,
    {
        let payload = serde_json::to_value(event).map_err(|e| {
            EventStoreError::InvalidAppend(format!("payload serialization failed: {e}"))
        })?;

        Ok(Self {
            event_id,
            case_id,
            event_type: event.event_type().to_string(),
            event_version: event.version(),
            occurred_at: event.occurred_at(),
            payload,
        })
    }
}

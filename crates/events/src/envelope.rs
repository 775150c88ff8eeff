use serde::{Deserialize, Serialize};

use claimledger_core::{CaseId, EventId};

/// Envelope for an event, carrying case + stream metadata.
///
/// This is the unit the store persists and readers consume.
///
/// Notes:
/// - **Append-only**: `sequence_number` is monotonically increasing per case
///   stream and doubles as the stream version used for optimistic concurrency.
/// - `payload` is the domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,
    case_id: CaseId,

    /// Monotonically increasing position in the case stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: EventId, case_id: CaseId, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            case_id,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn case_id(&self) -> CaseId {
        self.case_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

//! Decoding stored streams back into typed events and projected state.

use thiserror::Error;

use claimledger_claims::{compute_state, CaseState, ClaimEvent};
use claimledger_core::CaseId;

use crate::event_store::StoredEvent;

/// Replay corruption. Always fatal for the affected case: the projection
/// halts and the error is escalated to an operator, never skipped. It signals
/// a bug or an unsupported schema change, not a caller mistake.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The stored type tag is outside the closed event set.
    #[error("unknown event type '{0}' in stream")]
    UnknownEventType(String),

    /// The payload does not deserialize as its declared type.
    #[error("malformed payload for '{event_type}' at sequence {sequence}: {message}")]
    MalformedPayload {
        event_type: String,
        sequence: u64,
        message: String,
    },

    /// The stream itself is inconsistent (ordering, impossible transition).
    #[error("corrupt event sequence: {0}")]
    CorruptSequence(String),
}

/// Decode one stored record into a typed event.
pub fn decode_event(stored: &StoredEvent) -> Result<ClaimEvent, ReplayError> {
    if !ClaimEvent::KNOWN_TYPES.contains(&stored.event_type.as_str()) {
        return Err(ReplayError::UnknownEventType(stored.event_type.clone()));
    }
    serde_json::from_value(stored.payload.clone()).map_err(|e| ReplayError::MalformedPayload {
        event_type: stored.event_type.clone(),
        sequence: stored.sequence_number,
        message: e.to_string(),
    })
}

/// Decode a full stream, checking sequence contiguity on the way.
///
/// Streams are numbered 1, 2, 3, ... with no gaps. A gap means a record went
/// missing (a truncated or hand-edited log file), and a stream missing a
/// record can fold into a plausible but wrong state, so it must not replay.
pub fn decode_stream(stream: &[StoredEvent]) -> Result<Vec<ClaimEvent>, ReplayError> {
    let mut last = 0u64;
    let mut events = Vec::with_capacity(stream.len());
    for stored in stream {
        if stored.sequence_number != last + 1 {
            return Err(ReplayError::CorruptSequence(format!(
                "sequence_number not contiguous (last={last}, found={})",
                stored.sequence_number
            )));
        }
        last = stored.sequence_number;
        events.push(decode_event(stored)?);
    }
    Ok(events)
}

/// Decode and fold a stored stream into case state.
pub fn project_stream(case_id: CaseId, stream: &[StoredEvent]) -> Result<CaseState, ReplayError> {
    let events = decode_stream(stream)?;
    compute_state(case_id, &events).map_err(|e| ReplayError::CorruptSequence(e.to_string()))
}

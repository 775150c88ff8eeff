use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use claimledger_core::{CaseId, ExpectedVersion};

use super::r#trait::{EventStore, EventStoreError, StoredEvent, UncommittedEvent};

type CaseLog = Arc<RwLock<Vec<StoredEvent>>>;

/// In-memory append-only event store.
///
/// The arena of per-case logs: the outer map lock is held only long enough to
/// fetch a case's log handle, so writers on different cases never contend.
/// Within one case, the append's read-check-write section runs under that
/// case's write lock; readers take only the read lock and see either the
/// pre- or post-append snapshot.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    streams: RwLock<HashMap<CaseId, CaseLog>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn log_for(&self, case_id: CaseId) -> CaseLog {
        if let Some(log) = self
            .streams
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&case_id)
        {
            return Arc::clone(log);
        }
        let mut streams = self
            .streams
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(streams.entry(case_id).or_default())
    }

    fn current_version(stream: &[StoredEvent]) -> u64 {
        stream.last().map(|e| e.sequence_number).unwrap_or(0)
    }
}

impl EventStore for InMemoryEventStore {
    fn append_batch(
        &self,
        case_id: CaseId,
        events: Vec<UncommittedEvent>,
        expected_version: ExpectedVersion,
    ) -> Result<Vec<StoredEvent>, EventStoreError> {
        if events.is_empty() {
            return Ok(vec![]);
        }
        for (idx, e) in events.iter().enumerate() {
            if e.case_id != case_id {
                return Err(EventStoreError::InvalidAppend(format!(
                    "batch contains a foreign case_id (index {idx})"
                )));
            }
        }

        let log = self.log_for(case_id);
        let mut stream = log.write().unwrap_or_else(PoisonError::into_inner);

        let current = Self::current_version(&stream);
        if !expected_version.matches(current) {
            let expected = match expected_version {
                ExpectedVersion::Exact(v) => v,
                ExpectedVersion::Any => current,
            };
            return Err(EventStoreError::Concurrency {
                expected,
                actual: current,
            });
        }

        // Assign sequence numbers and append (append-only).
        let mut next = current + 1;
        let mut committed = Vec::with_capacity(events.len());
        for e in events {
            let stored = StoredEvent {
                event_id: e.event_id,
                case_id: e.case_id,
                sequence_number: next,
                event_type: e.event_type,
                event_version: e.event_version,
                occurred_at: e.occurred_at,
                payload: e.payload,
            };
            next += 1;
            stream.push(stored.clone());
            committed.push(stored);
        }

        Ok(committed)
    }

    fn read(&self, case_id: CaseId) -> Result<(Vec<StoredEvent>, u64), EventStoreError> {
        let existing = self
            .streams
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&case_id)
            .cloned();

        match existing {
            Some(log) => {
                let stream = log.read().unwrap_or_else(PoisonError::into_inner);
                Ok((stream.clone(), Self::current_version(&stream)))
            }
            None => Ok((vec![], 0)),
        }
    }

    fn case_ids(&self) -> Result<Vec<CaseId>, EventStoreError> {
        let streams = self
            .streams
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<CaseId> = streams.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}

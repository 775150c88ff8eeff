use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use fs2::FileExt;

use claimledger_core::{CaseId, ExpectedVersion};

use super::r#trait::{EventStore, EventStoreError, StoredEvent, UncommittedEvent};

/// File-backed append-only event store.
///
/// One JSONL file per case under the store directory; each line is a
/// self-describing tagged record ([`StoredEvent`]) in insertion order. The
/// append critical section holds an exclusive `fs2` advisory lock on the
/// case file (per-case granularity, usable across processes) plus a
/// process-local per-case mutex as the single-process fallback. Readers take
/// only the shared lock.
///
/// The batch is serialized in full and written with a single `write_all`, so
/// a caller that fails or times out never leaves a partial batch behind.
pub struct FileEventStore {
    dir: PathBuf,
    locks: RwLock<HashMap<CaseId, Arc<Mutex<()>>>>,
}

impl FileEventStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, EventStoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| storage_err(&dir, e))?;
        Ok(Self {
            dir,
            locks: RwLock::new(HashMap::new()),
        })
    }

    fn case_path(&self, case_id: CaseId) -> PathBuf {
        self.dir.join(format!("{case_id}.jsonl"))
    }

    fn lock_for(&self, case_id: CaseId) -> Arc<Mutex<()>> {
        if let Some(lock) = self
            .locks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&case_id)
        {
            return Arc::clone(lock);
        }
        let mut locks = self.locks.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(case_id).or_default())
    }

    fn read_records(file: &mut File, path: &Path) -> Result<Vec<StoredEvent>, EventStoreError> {
        file.seek(SeekFrom::Start(0)).map_err(|e| storage_err(path, e))?;
        let reader = BufReader::new(&*file);
        let mut records = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| storage_err(path, e))?;
            if line.is_empty() {
                continue;
            }
            let record: StoredEvent = serde_json::from_str(&line).map_err(|e| {
                EventStoreError::StorageUnavailable(format!(
                    "corrupt record at {}:{}: {e}",
                    path.display(),
                    line_no + 1
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn current_version(stream: &[StoredEvent]) -> u64 {
        stream.last().map(|e| e.sequence_number).unwrap_or(0)
    }
}

fn storage_err(path: &Path, e: impl core::fmt::Display) -> EventStoreError {
    EventStoreError::StorageUnavailable(format!("{}: {e}", path.display()))
}

impl EventStore for FileEventStore {
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

        let local = self.lock_for(case_id);
        let _guard = local.lock().unwrap_or_else(PoisonError::into_inner);

        let path = self.case_path(case_id);
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| storage_err(&path, e))?;
        file.lock_exclusive().map_err(|e| storage_err(&path, e))?;

        let result = (|| {
            let stream = Self::read_records(&mut file, &path)?;
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

            let mut next = current + 1;
            let mut committed = Vec::with_capacity(events.len());
            let mut buf = String::new();
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
                let line = serde_json::to_string(&stored)
                    .map_err(|e| EventStoreError::InvalidAppend(e.to_string()))?;
                buf.push_str(&line);
                buf.push('\n');
                committed.push(stored);
            }

            // One write for the whole batch: all lines land or none do.
            file.write_all(buf.as_bytes())
                .map_err(|e| storage_err(&path, e))?;
            file.sync_data().map_err(|e| storage_err(&path, e))?;
            Ok(committed)
        })();

        let _ = fs2::FileExt::unlock(&file);
        result
    }

    fn read(&self, case_id: CaseId) -> Result<(Vec<StoredEvent>, u64), EventStoreError> {
        let path = self.case_path(case_id);
        if !path.exists() {
            return Ok((vec![], 0));
        }
        let mut file = OpenOptions::new()
            .read(true)
            .open(&path)
            .map_err(|e| storage_err(&path, e))?;
        file.lock_shared().map_err(|e| storage_err(&path, e))?;
        let result = Self::read_records(&mut file, &path);
        let _ = fs2::FileExt::unlock(&file);

        let stream = result?;
        let version = Self::current_version(&stream);
        Ok((stream, version))
    }

    fn case_ids(&self) -> Result<Vec<CaseId>, EventStoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| storage_err(&self.dir, e))?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| storage_err(&self.dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if let Ok(id) = CaseId::from_str(stem) {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use claimledger_core::EventId;

    fn uncommitted(case_id: CaseId, tag: &str) -> UncommittedEvent {
        UncommittedEvent {
            event_id: EventId::new(),
            case_id,
            event_type: tag.to_string(),
            event_version: 1,
            occurred_at: Utc::now(),
            payload: serde_json::json!({ "tag": tag }),
        }
    }

    #[test]
    fn stream_survives_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let case_id = CaseId::new();

        {
            let store = FileEventStore::open(dir.path()).unwrap();
            store
                .append_batch(
                    case_id,
                    vec![uncommitted(case_id, "a"), uncommitted(case_id, "b")],
                    ExpectedVersion::Exact(0),
                )
                .unwrap();
        }

        let reopened = FileEventStore::open(dir.path()).unwrap();
        let (events, version) = reopened.read(case_id).unwrap();
        assert_eq!(version, 2);
        assert_eq!(events[0].event_type, "a");
        assert_eq!(events[1].event_type, "b");
        assert_eq!(reopened.case_ids().unwrap(), vec![case_id]);
    }

    #[test]
    fn stale_writer_conflicts_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let case_id = CaseId::new();
        let store = FileEventStore::open(dir.path()).unwrap();

        store
            .append(case_id, uncommitted(case_id, "a"), ExpectedVersion::Exact(0))
            .unwrap();

        let err = store
            .append(case_id, uncommitted(case_id, "b"), ExpectedVersion::Exact(0))
            .unwrap_err();
        assert!(matches!(
            err,
            EventStoreError::Concurrency {
                expected: 0,
                actual: 1
            }
        ));
    }

    #[test]
    fn corrupt_record_is_storage_unavailable_never_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let case_id = CaseId::new();
        let store = FileEventStore::open(dir.path()).unwrap();
        store
            .append(case_id, uncommitted(case_id, "a"), ExpectedVersion::Exact(0))
            .unwrap();

        let path = dir.path().join(format!("{case_id}.jsonl"));
        let mut raw = fs::read_to_string(&path).unwrap();
        raw.push_str("{not json\n");
        fs::write(&path, raw).unwrap();

        let err = store.read(case_id).unwrap_err();
        match err {
            EventStoreError::StorageUnavailable(msg) => assert!(msg.contains("corrupt record")),
            other => panic!("expected StorageUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn unknown_case_reads_as_the_empty_stream() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileEventStore::open(dir.path()).unwrap();
        let (events, version) = store.read(CaseId::new()).unwrap();
        assert!(events.is_empty());
        assert_eq!(version, 0);
    }
}

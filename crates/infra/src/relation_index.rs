//! Reverse-lookup index over cross-case references.
//!
//! A derived cache of the event log, maintained synchronously with appends so
//! answering "which cases rest on this one?" never requires scanning every
//! case history. Fully rebuildable by replay; on divergence the log wins,
//! never the index.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use tracing::{info, warn};

use claimledger_claims::{relation_changes, CaseState, RelationChanges, RelationEntry, RelationKind};
use claimledger_core::{Aggregate, CaseId};

use crate::event_store::{EventStore, EventStoreError};
use crate::replay::{decode_stream, ReplayError};

#[derive(Debug, Default)]
struct Inner {
    /// Reverse path: (target, kind) → sources. The O(1) lookup the index
    /// exists for.
    by_target: HashMap<(CaseId, RelationKind), BTreeSet<CaseId>>,
    /// Forward path: source → its outgoing entries.
    by_source: HashMap<CaseId, BTreeSet<RelationEntry>>,
}

/// The live relation index.
///
/// Entries are unique `(source, target, kind)` triples. Corrections go
/// through remove + re-insert; nothing is updated in place.
#[derive(Debug, Default)]
pub struct RelationIndex {
    inner: RwLock<Inner>,
}

impl RelationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_relation(&self, entry: RelationEntry) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .by_target
            .entry((entry.target, entry.kind))
            .or_default()
            .insert(entry.source);
        inner.by_source.entry(entry.source).or_default().insert(entry);
    }

    pub fn remove_relation(&self, entry: &RelationEntry) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(sources) = inner.by_target.get_mut(&(entry.target, entry.kind)) {
            sources.remove(&entry.source);
            if sources.is_empty() {
                inner.by_target.remove(&(entry.target, entry.kind));
            }
        }
        if let Some(entries) = inner.by_source.get_mut(&entry.source) {
            entries.remove(entry);
            if entries.is_empty() {
                inner.by_source.remove(&entry.source);
            }
        }
    }

    /// Apply the mutations one event implies, removals first.
    pub fn apply_changes(&self, changes: &RelationChanges) {
        for entry in &changes.removed {
            self.remove_relation(entry);
        }
        for entry in &changes.added {
            self.add_relation(*entry);
        }
    }

    /// All cases referencing `target` with the given kind.
    pub fn get_sources_for_target(&self, target: CaseId, kind: RelationKind) -> Vec<CaseId> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .by_target
            .get(&(target, kind))
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// All outgoing references of `source`.
    pub fn get_targets_for_source(&self, source: CaseId) -> Vec<RelationEntry> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .by_source
            .get(&source)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The full entry set, for consistency checks.
    pub fn entries(&self) -> BTreeSet<RelationEntry> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.by_source.values().flatten().copied().collect()
    }

    /// Entries present in exactly one of the live index and `rebuilt`.
    pub fn divergence_from(&self, rebuilt: &RelationIndex) -> Vec<RelationEntry> {
        let live = self.entries();
        let fresh = rebuilt.entries();
        live.symmetric_difference(&fresh).copied().collect()
    }

    /// Compare against a freshly rebuilt index and, if they diverge, log the
    /// defect and take over the rebuilt set. The log always wins.
    pub fn reconcile(&self, rebuilt: RelationIndex) -> Vec<RelationEntry> {
        let diverged = self.divergence_from(&rebuilt);
        if diverged.is_empty() {
            return diverged;
        }
        warn!(
            entries = diverged.len(),
            "relation index diverged from the event log; rebuilding"
        );
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let fresh = rebuilt.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        *inner = fresh;
        diverged
    }
}

/// Rebuild failure: either the log could not be read or a stream failed to
/// replay.
#[derive(Debug, Error)]
pub enum IndexRebuildError {
    #[error(transparent)]
    Store(#[from] EventStoreError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// Full reconstruction from the event log, for repair or index-less
/// environments. Must always yield the same set as the incrementally
/// maintained index.
pub fn rebuild_from_events<S: EventStore>(store: &S) -> Result<RelationIndex, IndexRebuildError> {
    let index = RelationIndex::new();
    let case_ids = store.case_ids()?;
    for case_id in &case_ids {
        let (stream, _) = store.read(*case_id)?;
        let events = decode_stream(&stream)?;
        let mut state = CaseState::empty(*case_id);
        for event in &events {
            index.apply_changes(&relation_changes(&state, event));
            state
                .apply(event)
                .map_err(|e| ReplayError::CorruptSequence(e.to_string()))?;
        }
    }
    info!(cases = case_ids.len(), "relation index rebuilt from events");
    Ok(index)
}

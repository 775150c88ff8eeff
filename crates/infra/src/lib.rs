//! `claimledger-infra` — persistence and orchestration for the claims ledger.
//!
//! Event stores (in-memory and file-backed), stream replay, the relation
//! index and the submission pipeline that ties them together.

pub mod collaborators;
pub mod event_store;
pub mod pipeline;
pub mod relation_index;
pub mod replay;


pub use collaborators::{
    AccessControl, AllowAll, CaseRenderer, CollaborationNotifier, JsonCaseRenderer, NoopNotifier,
};
pub use event_store::{
    EventStore, EventStoreError, FileEventStore, InMemoryEventStore, StoredEvent, UncommittedEvent,
};
pub use pipeline::{Submission, SubmissionOutcome, SubmissionPipeline, SubmitError};
pub use relation_index::{rebuild_from_events, IndexRebuildError, RelationIndex};
pub use replay::{decode_event, decode_stream, project_stream, ReplayError};

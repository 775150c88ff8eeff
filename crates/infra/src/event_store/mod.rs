//! Append-only persistence of case streams.

mod file;
mod in_memory;
#[allow(clippy::module_inception)]
mod r#trait;

pub use file::FileEventStore;
pub use in_memory::InMemoryEventStore;
pub use r#trait::{EventStore, EventStoreError, StoredEvent, UncommittedEvent};

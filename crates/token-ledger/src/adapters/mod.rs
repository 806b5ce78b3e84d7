//! # Adapters Layer
//!
//! In-memory implementations of the outbound ports.

pub mod event_sink;
pub mod identity;
pub mod memory_store;
pub mod write_set;

pub use event_sink::RecordingEventSink;
pub use identity::{JsonIdentityResolver, StaticIdentityResolver};
pub use memory_store::InMemoryLedgerStore;
pub use write_set::WriteSetStore;

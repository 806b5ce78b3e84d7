//! # Outbound Ports (Driven Side)
//!
//! Collaborators the ledger depends on but does not implement: the world
//! state store, the identity resolver and the notification channel.

use crate::domain::{IdentityAttributes, LedgerResult, StoreError};

/// Key/value world state of the current invocation.
///
/// Reads observe earlier writes of the same invocation. Atomic commit of an
/// invocation's write set is the implementation's concern.
pub trait LedgerStore: Send + Sync {
    /// Value stored under `key`, `None` if absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

/// Turns an opaque creator credential into verified identity attributes.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, creator: &[u8]) -> LedgerResult<IdentityAttributes>;
}

/// Notification channel of the hosting substrate.
pub trait EventSink: Send + Sync {
    fn set_event(&self, name: &str, payload: Vec<u8>) -> Result<(), StoreError>;
}

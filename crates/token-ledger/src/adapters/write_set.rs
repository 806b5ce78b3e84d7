//! Per-invocation write set.
//!
//! Buffers the writes of one invocation over a shared store. Reads see the
//! buffered writes first. [`WriteSetStore::commit`] applies the whole set to
//! the inner store; dropping the write set without committing discards it,
//! which is how a failed invocation leaves no trace.
//!
//! Puts are idempotent, so a commit the inner store fails halfway keeps the
//! full set and can be retried until every write has landed.

use crate::domain::StoreError;
use crate::ports::LedgerStore;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

struct Pending {
    writes: BTreeMap<String, Vec<u8>>,
    committed: bool,
}

/// Overlay store with all-or-nothing commit.
pub struct WriteSetStore<S: LedgerStore> {
    inner: Arc<S>,
    pending: Mutex<Pending>,
}

impl<S: LedgerStore> WriteSetStore<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self {
            inner,
            pending: Mutex::new(Pending {
                writes: BTreeMap::new(),
                committed: false,
            }),
        }
    }

    /// Keys written so far, in key order.
    pub fn written_keys(&self) -> Vec<String> {
        self.pending.lock().writes.keys().cloned().collect()
    }

    /// Applies every buffered write to the inner store. Returns the number
    /// of keys written.
    ///
    /// On error the set stays pending and uncommitted.
    pub fn commit(&self) -> Result<usize, StoreError> {
        let mut pending = self.pending.lock();
        if pending.committed {
            return Err(StoreError::AlreadyCommitted);
        }

        for (key, value) in &pending.writes {
            if let Err(e) = self.inner.put_state(key, value.clone()) {
                warn!(key = %key.escape_debug(), error = %e, "Write set commit interrupted");
                return Err(e);
            }
        }
        let count = pending.writes.len();
        pending.writes.clear();
        pending.committed = true;

        debug!(keys = count, "Write set committed");
        Ok(count)
    }
}

impl<S: LedgerStore> LedgerStore for WriteSetStore<S> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(value) = self.pending.lock().writes.get(key) {
            return Ok(Some(value.clone()));
        }
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut pending = self.pending.lock();
        if pending.committed {
            return Err(StoreError::AlreadyCommitted);
        }
        pending.writes.insert(key.to_string(), value);
        Ok(())
    }
}

//! Recording notification channel.

use crate::domain::StoreError;
use crate::ports::EventSink;
use parking_lot::Mutex;

/// Keeps every `(name, payload)` pair it is handed, in order.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Vec<u8>)> {
        self.events.lock().clone()
    }

    /// Most recent event, if any.
    pub fn last(&self) -> Option<(String, Vec<u8>)> {
        self.events.lock().last().cloned()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<(String, Vec<u8>)> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingEventSink {
    fn set_event(&self, name: &str, payload: Vec<u8>) -> Result<(), StoreError> {
        self.events.lock().push((name.to_string(), payload));
        Ok(())
    }
}

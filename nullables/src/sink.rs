//! Recording event sink — captures emitted events for assertions.

use ballot_types::{EventSink, LedgerEvent};
use std::sync::Mutex;

/// An event sink that records every event it receives, in order.
///
/// Wrap it in an `Arc` to keep a handle after giving one to the ledger.
pub struct RecordingSink {
    events: Mutex<Vec<LedgerEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &LedgerEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

//! Ledger event model.
//!
//! Every state transition emits one event to the configured sink,
//! fire-and-forget, at most once per triggering call. Consumers are
//! observers only (front ends, indexers); a sink must never fail or stall
//! the operation that triggered it.

use crate::poll::PollId;
use crate::principal::Principal;
use crate::time::Timestamp;
use serde::Serialize;

/// A notification announcing a committed ledger state transition.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    PollCreated {
        id: PollId,
        creator: Principal,
        title: String,
        deadline: Timestamp,
    },
    VoteCast {
        id: PollId,
        voter: Principal,
        /// The option index the payload resolved to.
        choice: u32,
        /// The label of that option.
        label: String,
    },
    ResultsRevealed {
        id: PollId,
        counts: Vec<u64>,
    },
}

/// Destination for ledger events.
///
/// Implementations must be infallible from the ledger's perspective: drop
/// the event rather than surface an error.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &LedgerEvent);
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn emit(&self, event: &LedgerEvent) {
        (**self).emit(event)
    }
}

/// Sink that discards every event.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &LedgerEvent) {}
}

//! Event broadcasting — fans ledger events out to WebSocket subscribers.

use axum::extract::ws::{Message, WebSocket};
use ballot_types::{EventSink, LedgerEvent};
use tokio::sync::broadcast;

/// Default capacity of the event channel; slow subscribers that fall more
/// than this far behind skip ahead (events are fire-and-forget).
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Create the broadcast channel ledger events flow through.
pub fn event_channel() -> broadcast::Sender<LedgerEvent> {
    broadcast::channel(EVENT_CHANNEL_CAPACITY).0
}

/// An [`EventSink`] that publishes to a tokio broadcast channel.
///
/// Sending to a channel with no subscribers is not an error; the event is
/// simply dropped, which matches the at-most-once notification contract.
pub struct BroadcastSink(broadcast::Sender<LedgerEvent>);

impl BroadcastSink {
    pub fn new(sender: broadcast::Sender<LedgerEvent>) -> Self {
        Self(sender)
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: &LedgerEvent) {
        let _ = self.0.send(event.clone());
    }
}

/// Forward events from a broadcast receiver to a WebSocket client as JSON,
/// until the client disconnects or the channel closes.
pub async fn stream_events(mut socket: WebSocket, mut rx: broadcast::Receiver<LedgerEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to encode event");
                        continue;
                    }
                };
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "websocket subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

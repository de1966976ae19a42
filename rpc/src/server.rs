//! Axum-based server wiring.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

use ballot_ledger::PollLedger;
use ballot_store::PollStore;
use ballot_types::{Clock, LedgerEvent, Timestamp};

use crate::error::RpcError;
use crate::{events, handlers};

/// Shared server state: the ledger behind its linearizing lock, the clock
/// collaborator, and the event channel subscribers attach to.
pub struct RpcState<S: PollStore> {
    ledger: Mutex<PollLedger<S>>,
    pub clock: Box<dyn Clock>,
    pub events: broadcast::Sender<LedgerEvent>,
    pub started_at: Timestamp,
}

impl<S: PollStore> RpcState<S> {
    pub fn new(
        ledger: PollLedger<S>,
        clock: Box<dyn Clock>,
        events: broadcast::Sender<LedgerEvent>,
    ) -> Self {
        let started_at = clock.now();
        Self {
            ledger: Mutex::new(ledger),
            clock,
            events,
            started_at,
        }
    }

    /// Exclusive access to the ledger. Every call through this lock is
    /// applied in a single total order.
    pub fn ledger(&self) -> Result<MutexGuard<'_, PollLedger<S>>, RpcError> {
        self.ledger
            .lock()
            .map_err(|_| RpcError::Server("ledger lock poisoned".into()))
    }
}

async fn ws_upgrade<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    ws: WebSocketUpgrade,
) -> Response {
    let rx = state.events.subscribe();
    ws.on_upgrade(move |socket| events::stream_events(socket, rx))
}

/// Build the full route table over the given state.
pub fn router<S: PollStore + Send + 'static>(state: Arc<RpcState<S>>) -> Router {
    Router::new()
        .route("/polls", post(handlers::create_poll).get(handlers::list_polls))
        .route("/polls/:id", get(handlers::poll_info))
        .route("/polls/:id/votes", post(handlers::cast_vote))
        .route("/polls/:id/results", get(handlers::results))
        .route("/polls/:id/reveal", post(handlers::reveal_results))
        .route("/polls/:id/end", post(handlers::end_vote_early))
        .route("/polls/:id/voters/:address", get(handlers::has_voted))
        .route("/telemetry", get(handlers::telemetry))
        .route("/ws", get(ws_upgrade))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The HTTP server.
pub struct RpcServer {
    addr: SocketAddr,
}

impl RpcServer {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Bind and serve until the process is stopped.
    pub async fn start<S: PollStore + Send + 'static>(
        &self,
        state: Arc<RpcState<S>>,
    ) -> Result<(), RpcError> {
        let app = router(state);
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.addr)))?;
        tracing::info!(addr = %self.addr, "rpc server listening");
        axum::serve(listener, app)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}

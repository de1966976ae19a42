//! HTTP + WebSocket server for the ballot ledger.
//!
//! Provides endpoints for:
//! - Poll creation and paged listing
//! - Vote submission
//! - Early termination and result reveal (creator/owner only)
//! - Poll info, results, and participation queries
//! - A WebSocket feed of ledger events
//! - Server telemetry
//!
//! The server linearizes all ledger calls through one exclusive lock: the
//! execution substrate's "single global sequential ordering" guarantee is
//! provided here. Caller identity is taken verbatim from requests; fronting
//! this server with real authentication is the deployment's concern.

pub mod error;
pub mod events;
pub mod handlers;
pub mod pagination;
pub mod server;

pub use error::RpcError;
pub use events::{event_channel, BroadcastSink};
pub use server::{router, RpcServer, RpcState};

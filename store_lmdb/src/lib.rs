//! LMDB storage backend for the ballot ledger.
//!
//! Implements the `ballot-store` traits using the `heed` LMDB bindings.
//! Polls, ballots, and metadata each map to a named LMDB database within a
//! single environment; records are bincode-encoded.

pub mod environment;
pub mod error;
pub mod poll;

pub use environment::{LmdbEnvironment, DEFAULT_MAP_SIZE};
pub use error::LmdbError;
pub use poll::LmdbPollStore;

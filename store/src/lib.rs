//! Abstract storage traits for the ballot ledger.
//!
//! Every storage backend (LMDB for production, in-memory for testing)
//! implements these traits. The ledger depends only on the traits.

pub mod error;
pub mod poll;

pub use error::StoreError;
pub use poll::PollStore;

//! Nullable infrastructure for deterministic testing.
//!
//! The ledger's external collaborators (clock, storage, event sink) are
//! abstracted behind traits; this crate provides test-friendly
//! implementations that return deterministic values, can be controlled
//! programmatically, and never touch the filesystem.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod sink;
pub mod store;

pub use clock::NullClock;
pub use sink::RecordingSink;
pub use store::MemoryPollStore;

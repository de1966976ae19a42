//! Append-only poll ledger.
//!
//! The `PollLedger` owns the full set of polls, their deadlines, per-voter
//! ballots, and tallies, and enforces every invariant of the voting state
//! machine: double-vote prevention, deadline enforcement, creator/owner
//! authorization, and result immutability. State-changing operations are
//! linearized by exclusive access (`&mut self`) and are all-or-nothing:
//! every check runs before the single atomic store write.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{LedgerSummary, PollLedger, PollResults};

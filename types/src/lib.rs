//! Fundamental types for the ballot ledger.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: principals, timestamps, poll and ballot records, the choice
//! payload codec, and the ledger event model.

pub mod choice;
pub mod event;
pub mod poll;
pub mod principal;
pub mod time;

pub use choice::{encode_choice, resolve_choice, CHOICE_PAYLOAD_LEN};
pub use event::{EventSink, LedgerEvent, NoopSink};
pub use poll::{Ballot, Poll, PollId, MAX_OPTIONS};
pub use principal::{InvalidPrincipal, Principal};
pub use time::{Clock, SystemClock, Timestamp};

//! Poll and ballot records.
//!
//! A `Poll` is the aggregate root: fixed options, a deadline, and the
//! per-option tally vector. Per-voter participation is deliberately NOT
//! embedded in the record — each vote is a separate [`Ballot`] keyed by
//! `(PollId, Principal)` in the store, keeping per-poll invariants locally
//! checkable without cross-poll aliasing.

use crate::principal::Principal;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of options a poll may carry.
pub const MAX_OPTIONS: usize = 10;

/// Sequential poll identifier, assigned from 0 and never reused.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PollId(u64);

impl PollId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single voting round with fixed options and a deadline.
///
/// `title`, `description`, `options`, `creator`, and `created_at` are
/// immutable after creation. `deadline` only ever moves to "now" (early
/// end). `tallies` always has exactly one entry per option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub deadline: Timestamp,
    /// Distinct principals that have cast a vote. Monotonically increasing.
    pub total_voters: u64,
    /// Set true at creation; no lifecycle transition clears it.
    pub is_active: bool,
    /// True once the tally is visible: from the first cast vote, or from an
    /// explicit authorized reveal.
    pub is_revealed: bool,
    pub creator: Principal,
    /// Per-option vote counts, same order as `options`.
    pub tallies: Vec<u64>,
    pub created_at: Timestamp,
}

impl Poll {
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// The label for an option index, if in range.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// One voter's participation record for one poll.
///
/// The raw payload is retained verbatim for audit, alongside the option
/// index it resolved to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// The opaque choice payload exactly as submitted.
    pub payload: Vec<u8>,
    /// The option index the payload resolved to.
    pub choice: u32,
    pub cast_at: Timestamp,
}

//! The poll ledger state machine.
//!
//! All state-changing operations take the caller principal and the current
//! time explicitly; the clock and identity collaborators live at the
//! boundary. Checks run fail-fast in a fixed order before any store write,
//! and each call commits through a single atomic store operation, so a
//! failed call leaves no partial effect.

use crate::error::LedgerError;
use ballot_store::PollStore;
use ballot_types::{
    resolve_choice, Ballot, EventSink, LedgerEvent, NoopSink, Poll, PollId, Principal, Timestamp,
    MAX_OPTIONS,
};
use serde::Serialize;

/// The poll/vote ledger.
///
/// Owns the poll arena through its store and enforces every invariant.
/// The `owner` principal carries the same override authority as any poll's
/// creator on administrative calls (early end, reveal).
pub struct PollLedger<S: PollStore> {
    store: S,
    owner: Principal,
    sink: Box<dyn EventSink>,
}

/// Read-model for a poll's results.
#[derive(Clone, Debug, Serialize)]
pub struct PollResults {
    pub options: Vec<String>,
    pub tallies: Vec<u64>,
    pub total_voters: u64,
    pub is_revealed: bool,
}

/// Summary statistics for the ledger.
#[derive(Clone, Debug, Serialize)]
pub struct LedgerSummary {
    pub polls: u64,
    pub ballots: u64,
}

impl<S: PollStore> PollLedger<S> {
    pub fn new(store: S, owner: Principal) -> Self {
        Self {
            store,
            owner,
            sink: Box::new(NoopSink),
        }
    }

    /// Attach an event sink announcing state transitions to observers.
    pub fn with_event_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Write operations ─────────────────────────────────────────────────

    /// Create a new poll and return its sequential id.
    ///
    /// The deadline must be strictly in the future at creation time.
    pub fn create_poll(
        &mut self,
        title: String,
        description: String,
        options: Vec<String>,
        deadline: Timestamp,
        caller: &Principal,
        now: Timestamp,
    ) -> Result<PollId, LedgerError> {
        if title.is_empty() {
            return Err(LedgerError::EmptyTitle);
        }
        if options.is_empty() {
            return Err(LedgerError::NoOptions);
        }
        if options.len() > MAX_OPTIONS {
            return Err(LedgerError::TooManyOptions {
                count: options.len(),
                max: MAX_OPTIONS,
            });
        }
        if deadline <= now {
            return Err(LedgerError::InvalidDeadline);
        }

        let tallies = vec![0u64; options.len()];
        let poll = Poll {
            title: title.clone(),
            description,
            options,
            deadline,
            total_voters: 0,
            is_active: true,
            is_revealed: false,
            creator: caller.clone(),
            tallies,
            created_at: now,
        };
        let id = self.store.append_poll(&poll)?;
        tracing::info!(%id, creator = %caller, %deadline, "poll created");
        self.sink.emit(&LedgerEvent::PollCreated {
            id,
            creator: caller.clone(),
            title,
            deadline,
        });
        Ok(id)
    }

    /// Cast a vote on a poll.
    ///
    /// The payload is resolved to an option index by the lenient choice
    /// codec (see `ballot_types::choice`); the raw bytes are retained in the
    /// ballot for audit. The tally update is visible immediately — the poll
    /// is marked revealed by its first vote.
    pub fn cast_vote(
        &mut self,
        id: PollId,
        payload: &[u8],
        caller: &Principal,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let mut poll = self.active_poll(id)?;
        if poll.deadline.has_passed(now) {
            return Err(LedgerError::VoteExpired(id));
        }
        if self.store.has_voted(id, caller)? {
            return Err(LedgerError::AlreadyVoted {
                id,
                voter: caller.to_string(),
            });
        }

        let choice = resolve_choice(payload, poll.option_count());
        let label = poll.label(choice).unwrap_or("").to_string();
        poll.tallies[choice] += 1;
        poll.total_voters += 1;
        poll.is_revealed = true;
        let ballot = Ballot {
            payload: payload.to_vec(),
            choice: choice as u32,
            cast_at: now,
        };
        self.store.record_vote(id, caller, &ballot, &poll)?;
        tracing::debug!(%id, voter = %caller, choice, "vote cast");
        self.sink.emit(&LedgerEvent::VoteCast {
            id,
            voter: caller.clone(),
            choice: choice as u32,
            label,
        });
        Ok(())
    }

    /// Replace a poll's tallies with externally-supplied counts.
    ///
    /// Only the poll creator or the ledger owner may call this, only at or
    /// after the deadline, and only once. The counts are trusted outright:
    /// nothing cross-checks them against recorded ballots, so
    /// `sum(tallies) == total_voters` no longer holds after this call.
    /// Known gap versus a verifiable-tally design.
    pub fn reveal_results(
        &mut self,
        id: PollId,
        counts: Vec<u64>,
        caller: &Principal,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let mut poll = self.active_poll(id)?;
        self.require_admin(&poll, caller)?;
        if !poll.deadline.has_passed(now) {
            return Err(LedgerError::VoteNotExpired(id));
        }
        if poll.is_revealed {
            return Err(LedgerError::VoteAlreadyRevealed(id));
        }
        if counts.len() != poll.option_count() {
            return Err(LedgerError::InvalidOption {
                expected: poll.option_count(),
                got: counts.len(),
            });
        }

        poll.tallies = counts.clone();
        poll.is_revealed = true;
        self.store.put_poll(id, &poll)?;
        tracing::info!(%id, caller = %caller, "results revealed");
        self.sink.emit(&LedgerEvent::ResultsRevealed { id, counts });
        Ok(())
    }

    /// Move a poll's deadline to `now`, rejecting all subsequent votes.
    ///
    /// Does not undo votes already cast; there is no other undo mechanism.
    pub fn end_vote_early(
        &mut self,
        id: PollId,
        caller: &Principal,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let mut poll = self.active_poll(id)?;
        self.require_admin(&poll, caller)?;
        poll.deadline = now;
        self.store.put_poll(id, &poll)?;
        tracing::info!(%id, caller = %caller, "voting ended early");
        Ok(())
    }

    // ── Read operations ──────────────────────────────────────────────────

    /// The full stored record for a poll.
    pub fn poll_info(&self, id: PollId) -> Result<Poll, LedgerError> {
        self.active_poll(id)
    }

    /// Option labels and current tallies for a poll.
    pub fn results(&self, id: PollId) -> Result<PollResults, LedgerError> {
        let poll = self.active_poll(id)?;
        Ok(PollResults {
            options: poll.options,
            tallies: poll.tallies,
            total_voters: poll.total_voters,
            is_revealed: poll.is_revealed,
        })
    }

    /// Whether `voter` has cast a ballot on this poll.
    pub fn has_address_voted(&self, id: PollId, voter: &Principal) -> Result<bool, LedgerError> {
        self.active_poll(id)?;
        Ok(self.store.has_voted(id, voter)?)
    }

    /// Number of polls ever created.
    pub fn total_polls(&self) -> Result<u64, LedgerError> {
        Ok(self.store.poll_count()?)
    }

    /// Whether a poll's deadline has been reached at `now`.
    pub fn is_poll_expired(&self, id: PollId, now: Timestamp) -> Result<bool, LedgerError> {
        let poll = self.active_poll(id)?;
        Ok(poll.deadline.has_passed(now))
    }

    /// A voter's stored ballot for a poll, raw payload included (audit).
    pub fn ballot(&self, id: PollId, voter: &Principal) -> Result<Option<Ballot>, LedgerError> {
        self.active_poll(id)?;
        Ok(self.store.get_ballot(id, voter)?)
    }

    /// Up to `limit` polls in ascending id order, starting at `offset`.
    pub fn polls_page(
        &self,
        offset: u64,
        limit: usize,
    ) -> Result<Vec<(PollId, Poll)>, LedgerError> {
        Ok(self.store.iter_polls_paged(offset, limit)?)
    }

    /// Ledger summary statistics.
    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        Ok(LedgerSummary {
            polls: self.store.poll_count()?,
            ballots: self.store.ballot_count()?,
        })
    }

    // ── Internals ────────────────────────────────────────────────────────

    /// Fetch a poll, treating "never created" and "inactive" identically.
    /// No code path deactivates a poll; the flag is kept for the stored
    /// record's fidelity and checked here anyway.
    fn active_poll(&self, id: PollId) -> Result<Poll, LedgerError> {
        match self.store.get_poll(id)? {
            Some(poll) if poll.is_active => Ok(poll),
            _ => Err(LedgerError::VoteNotFound(id)),
        }
    }

    fn require_admin(&self, poll: &Poll, caller: &Principal) -> Result<(), LedgerError> {
        if caller == &poll.creator || caller == &self.owner {
            Ok(())
        } else {
            Err(LedgerError::NotVoteCreator)
        }
    }
}

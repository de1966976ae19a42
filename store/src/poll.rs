//! Poll storage trait.

use crate::StoreError;
use ballot_types::{Ballot, Poll, PollId, Principal};

/// Trait for poll and ballot storage.
///
/// The store is an arena of polls keyed by sequential integer id, plus a
/// per-poll map from voter principal to [`Ballot`]. It is append-only:
/// polls are never deleted and ballots are write-once per `(poll, voter)`.
///
/// Atomicity contract: [`PollStore::append_poll`] allocates the id and
/// persists the record in one atomic step (the id counter is the one piece
/// of store-wide mutable state); [`PollStore::record_vote`] persists the
/// ballot and the updated poll record in one atomic step. The ledger relies
/// on both to guarantee all-or-nothing calls.
pub trait PollStore {
    /// Persist a new poll under the next sequential id and return that id.
    fn append_poll(&self, poll: &Poll) -> Result<PollId, StoreError>;

    /// Fetch a poll by id. `Ok(None)` when the id has never been allocated.
    fn get_poll(&self, id: PollId) -> Result<Option<Poll>, StoreError>;

    /// Overwrite an existing poll record (deadline moves, tally reveals).
    fn put_poll(&self, id: PollId, poll: &Poll) -> Result<(), StoreError>;

    /// Number of polls ever created (also the next id to be allocated).
    fn poll_count(&self) -> Result<u64, StoreError>;

    /// Persist a voter's ballot together with the poll's updated record.
    ///
    /// Fails with [`StoreError::Duplicate`] if a ballot already exists for
    /// this `(poll, voter)` pair.
    fn record_vote(
        &self,
        id: PollId,
        voter: &Principal,
        ballot: &Ballot,
        poll: &Poll,
    ) -> Result<(), StoreError>;

    /// Fetch a voter's ballot for a poll, if one was cast.
    fn get_ballot(&self, id: PollId, voter: &Principal) -> Result<Option<Ballot>, StoreError>;

    /// Whether a voter has already cast a ballot on this poll.
    fn has_voted(&self, id: PollId, voter: &Principal) -> Result<bool, StoreError> {
        self.get_ballot(id, voter).map(|b| b.is_some())
    }

    /// Number of ballots across all polls.
    fn ballot_count(&self) -> Result<u64, StoreError>;

    /// Up to `limit` polls in ascending id order, starting at `offset`.
    fn iter_polls_paged(&self, offset: u64, limit: usize)
        -> Result<Vec<(PollId, Poll)>, StoreError>;
}

//! Nullable store — thread-safe in-memory poll storage for testing.

use ballot_store::{PollStore, StoreError};
use ballot_types::{Ballot, Poll, PollId, Principal};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory poll + ballot store.
///
/// Ids are allocated sequentially from the length of the poll arena, so the
/// same id/count relationship holds as in the persistent backend.
pub struct MemoryPollStore {
    polls: Mutex<Vec<Poll>>,
    ballots: Mutex<HashMap<(u64, String), Ballot>>,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self {
            polls: Mutex::new(Vec::new()),
            ballots: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryPollStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PollStore for MemoryPollStore {
    fn append_poll(&self, poll: &Poll) -> Result<PollId, StoreError> {
        let mut polls = self.polls.lock().unwrap();
        let id = polls.len() as u64;
        polls.push(poll.clone());
        Ok(PollId::new(id))
    }

    fn get_poll(&self, id: PollId) -> Result<Option<Poll>, StoreError> {
        Ok(self.polls.lock().unwrap().get(id.as_u64() as usize).cloned())
    }

    fn put_poll(&self, id: PollId, poll: &Poll) -> Result<(), StoreError> {
        let mut polls = self.polls.lock().unwrap();
        match polls.get_mut(id.as_u64() as usize) {
            Some(slot) => {
                *slot = poll.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("poll {id}"))),
        }
    }

    fn poll_count(&self) -> Result<u64, StoreError> {
        Ok(self.polls.lock().unwrap().len() as u64)
    }

    fn record_vote(
        &self,
        id: PollId,
        voter: &Principal,
        ballot: &Ballot,
        poll: &Poll,
    ) -> Result<(), StoreError> {
        let mut polls = self.polls.lock().unwrap();
        let mut ballots = self.ballots.lock().unwrap();
        let key = (id.as_u64(), voter.to_string());
        if ballots.contains_key(&key) {
            return Err(StoreError::Duplicate(format!("ballot {id}/{voter}")));
        }
        let slot = polls
            .get_mut(id.as_u64() as usize)
            .ok_or_else(|| StoreError::NotFound(format!("poll {id}")))?;
        ballots.insert(key, ballot.clone());
        *slot = poll.clone();
        Ok(())
    }

    fn get_ballot(&self, id: PollId, voter: &Principal) -> Result<Option<Ballot>, StoreError> {
        Ok(self
            .ballots
            .lock()
            .unwrap()
            .get(&(id.as_u64(), voter.to_string()))
            .cloned())
    }

    fn ballot_count(&self) -> Result<u64, StoreError> {
        Ok(self.ballots.lock().unwrap().len() as u64)
    }

    fn iter_polls_paged(
        &self,
        offset: u64,
        limit: usize,
    ) -> Result<Vec<(PollId, Poll)>, StoreError> {
        Ok(self
            .polls
            .lock()
            .unwrap()
            .iter()
            .enumerate()
            .skip(offset as usize)
            .take(limit)
            .map(|(i, p)| (PollId::new(i as u64), p.clone()))
            .collect())
    }
}

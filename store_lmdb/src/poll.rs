//! LMDB implementation of PollStore.
//!
//! Layout:
//! - `polls`:   8-byte big-endian poll id → bincode [`Poll`]
//! - `ballots`: 8-byte big-endian poll id ++ voter bytes → bincode [`Ballot`]
//!
//! Big-endian ids make lexicographic key order equal numeric order, so
//! paged iteration walks polls in creation order. Each state-changing call
//! runs in a single write transaction, which is what gives the ledger its
//! all-or-nothing guarantee.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use ballot_store::{PollStore, StoreError};
use ballot_types::{Ballot, Poll, PollId, Principal};

use crate::LmdbError;

pub struct LmdbPollStore {
    env: Arc<Env>,
    polls_db: Database<Bytes, Bytes>,
    ballots_db: Database<Bytes, Bytes>,
}

impl LmdbPollStore {
    pub fn new(
        env: Arc<Env>,
        polls_db: Database<Bytes, Bytes>,
        ballots_db: Database<Bytes, Bytes>,
    ) -> Self {
        Self {
            env,
            polls_db,
            ballots_db,
        }
    }

    fn poll_key(id: PollId) -> [u8; 8] {
        id.as_u64().to_be_bytes()
    }

    fn ballot_key(id: PollId, voter: &Principal) -> Vec<u8> {
        let mut key = Self::poll_key(id).to_vec();
        key.extend_from_slice(voter.as_str().as_bytes());
        key
    }

    fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(value)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl PollStore for LmdbPollStore {
    fn append_poll(&self, poll: &Poll) -> Result<PollId, StoreError> {
        let encoded = Self::encode(poll)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        // Polls are never deleted, so the database length doubles as the
        // next sequential id. Allocating and writing under one write
        // transaction keeps the counter consistent.
        let id = PollId::new(self.polls_db.len(&wtxn).map_err(LmdbError::from)?);
        self.polls_db
            .put(&mut wtxn, &Self::poll_key(id), &encoded)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(id)
    }

    fn get_poll(&self, id: PollId) -> Result<Option<Poll>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .polls_db
            .get(&rtxn, &Self::poll_key(id))
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(Self::decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn put_poll(&self, id: PollId, poll: &Poll) -> Result<(), StoreError> {
        let encoded = Self::encode(poll)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let key = Self::poll_key(id);
        if self
            .polls_db
            .get(&wtxn, &key)
            .map_err(LmdbError::from)?
            .is_none()
        {
            return Err(LmdbError::NotFound(format!("poll {id}")).into());
        }
        self.polls_db
            .put(&mut wtxn, &key, &encoded)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn poll_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.polls_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn record_vote(
        &self,
        id: PollId,
        voter: &Principal,
        ballot: &Ballot,
        poll: &Poll,
    ) -> Result<(), StoreError> {
        let ballot_bytes = Self::encode(ballot)?;
        let poll_bytes = Self::encode(poll)?;
        let ballot_key = Self::ballot_key(id, voter);
        let poll_key = Self::poll_key(id);

        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .polls_db
            .get(&wtxn, &poll_key)
            .map_err(LmdbError::from)?
            .is_none()
        {
            return Err(LmdbError::NotFound(format!("poll {id}")).into());
        }
        if self
            .ballots_db
            .get(&wtxn, &ballot_key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate(format!("ballot {id}/{voter}")));
        }
        self.ballots_db
            .put(&mut wtxn, &ballot_key, &ballot_bytes)
            .map_err(LmdbError::from)?;
        self.polls_db
            .put(&mut wtxn, &poll_key, &poll_bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_ballot(&self, id: PollId, voter: &Principal) -> Result<Option<Ballot>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .ballots_db
            .get(&rtxn, &Self::ballot_key(id, voter))
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(Some(Self::decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn ballot_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.ballots_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn iter_polls_paged(
        &self,
        offset: u64,
        limit: usize,
    ) -> Result<Vec<(PollId, Poll)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut polls = Vec::new();
        let iter = self.polls_db.iter(&rtxn).map_err(LmdbError::from)?;
        for result in iter.skip(offset as usize).take(limit) {
            let (key, val) = result.map_err(LmdbError::from)?;
            let arr: [u8; 8] = key
                .try_into()
                .map_err(|_| LmdbError::Serialization("invalid poll key length".into()))?;
            polls.push((PollId::new(u64::from_be_bytes(arr)), Self::decode(val)?));
        }
        Ok(polls)
    }
}

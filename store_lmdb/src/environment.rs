//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::poll::LmdbPollStore;
use crate::LmdbError;

/// Current on-disk schema version. Bumped on incompatible layout changes.
const SCHEMA_VERSION: u32 = 1;
const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

/// Default LMDB map size: 1 GiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    polls_db: Database<Bytes, Bytes>,
    ballots_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// Creates the directory if needed, opens the named databases, and
    /// verifies the schema version (initializing it on first open).
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(3)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let polls_db = env.create_database(&mut wtxn, Some("polls"))?;
        let ballots_db = env.create_database(&mut wtxn, Some("ballots"))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some("meta"))?;

        match meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
            None => {
                meta_db.put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_le_bytes())?;
            }
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("schema_version has unexpected byte length".into())
                })?;
                let version = u32::from_le_bytes(arr);
                if version != SCHEMA_VERSION {
                    return Err(LmdbError::SchemaVersion(version));
                }
            }
        }
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened LMDB environment");
        Ok(Self {
            env: Arc::new(env),
            polls_db,
            ballots_db,
            meta_db,
        })
    }

    /// A poll store backed by this environment.
    pub fn poll_store(&self) -> LmdbPollStore {
        LmdbPollStore::new(self.env.clone(), self.polls_db, self.ballots_db)
    }

    pub(crate) fn env(&self) -> &Arc<Env> {
        &self.env
    }

    pub(crate) fn meta_db(&self) -> Database<Bytes, Bytes> {
        self.meta_db
    }
}

use ballot_types::PollId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("poll title must not be empty")]
    EmptyTitle,

    #[error("poll must have at least one option")]
    NoOptions,

    #[error("poll has too many options: {count} (max {max})")]
    TooManyOptions { count: usize, max: usize },

    #[error("deadline must be strictly in the future")]
    InvalidDeadline,

    #[error("poll {0} not found")]
    VoteNotFound(PollId),

    #[error("voting period has expired for poll {0}")]
    VoteExpired(PollId),

    #[error("{voter} has already voted on poll {id}")]
    AlreadyVoted { id: PollId, voter: String },

    #[error("caller is not the poll creator or ledger owner")]
    NotVoteCreator,

    #[error("voting period has not expired yet for poll {0}")]
    VoteNotExpired(PollId),

    #[error("results for poll {0} are already revealed")]
    VoteAlreadyRevealed(PollId),

    #[error("result count mismatch: expected {expected} entries, got {got}")]
    InvalidOption { expected: usize, got: usize },

    #[error("storage error: {0}")]
    Storage(#[from] ballot_store::StoreError),
}

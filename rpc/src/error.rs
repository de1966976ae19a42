//! RPC error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ballot_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RpcError::Ledger(err) => match err {
                LedgerError::EmptyTitle
                | LedgerError::NoOptions
                | LedgerError::TooManyOptions { .. }
                | LedgerError::InvalidDeadline
                | LedgerError::InvalidOption { .. } => StatusCode::BAD_REQUEST,
                LedgerError::VoteNotFound(_) => StatusCode::NOT_FOUND,
                LedgerError::NotVoteCreator => StatusCode::FORBIDDEN,
                LedgerError::AlreadyVoted { .. } | LedgerError::VoteAlreadyRevealed(_) => {
                    StatusCode::CONFLICT
                }
                LedgerError::VoteExpired(_) | LedgerError::VoteNotExpired(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_types::PollId;

    #[test]
    fn ledger_errors_map_to_expected_statuses() {
        let id = PollId::new(0);
        let cases: Vec<(RpcError, StatusCode)> = vec![
            (LedgerError::EmptyTitle.into(), StatusCode::BAD_REQUEST),
            (LedgerError::VoteNotFound(id).into(), StatusCode::NOT_FOUND),
            (LedgerError::NotVoteCreator.into(), StatusCode::FORBIDDEN),
            (
                LedgerError::AlreadyVoted { id, voter: "0xa".into() }.into(),
                StatusCode::CONFLICT,
            ),
            (
                LedgerError::VoteAlreadyRevealed(id).into(),
                StatusCode::CONFLICT,
            ),
            (
                LedgerError::VoteExpired(id).into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                LedgerError::VoteNotExpired(id).into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                RpcError::InvalidRequest("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }
}

//! RPC request handlers and their DTOs.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use ballot_store::PollStore;
use ballot_types::{Poll, PollId, Principal};

use crate::error::RpcError;
use crate::pagination::{PaginationMeta, PaginationParams};
use crate::server::RpcState;

// ── DTOs ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePollRequest {
    pub creator: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub options: Vec<String>,
    /// Unix seconds; must be strictly in the future.
    pub deadline: u64,
}

#[derive(Serialize)]
pub struct CreatePollResponse {
    pub id: u64,
}

#[derive(Deserialize)]
pub struct CastVoteRequest {
    pub voter: String,
    /// Hex-encoded opaque choice payload (with or without `0x` prefix).
    pub choice: String,
}

#[derive(Serialize)]
pub struct CastVoteResponse {
    pub accepted: bool,
}

#[derive(Deserialize)]
pub struct RevealRequest {
    pub caller: String,
    pub counts: Vec<u64>,
}

#[derive(Deserialize)]
pub struct EndVoteRequest {
    pub caller: String,
}

#[derive(Serialize)]
pub struct PollInfoResponse {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub deadline: u64,
    pub total_voters: u64,
    pub is_active: bool,
    pub is_revealed: bool,
    pub creator: String,
    pub created_at: u64,
    pub expired: bool,
}

impl PollInfoResponse {
    fn from_poll(id: PollId, poll: Poll, expired: bool) -> Self {
        Self {
            id: id.as_u64(),
            title: poll.title,
            description: poll.description,
            options: poll.options,
            deadline: poll.deadline.as_secs(),
            total_voters: poll.total_voters,
            is_active: poll.is_active,
            is_revealed: poll.is_revealed,
            creator: poll.creator.to_string(),
            created_at: poll.created_at.as_secs(),
            expired,
        }
    }
}

#[derive(Serialize)]
pub struct ResultsResponse {
    pub options: Vec<String>,
    pub tallies: Vec<u64>,
    pub total_voters: u64,
    pub is_revealed: bool,
}

#[derive(Serialize)]
pub struct HasVotedResponse {
    pub has_voted: bool,
}

#[derive(Serialize)]
pub struct PollSummary {
    pub id: u64,
    pub title: String,
    pub deadline: u64,
    pub total_voters: u64,
    pub is_revealed: bool,
    pub creator: String,
}

#[derive(Serialize)]
pub struct ListPollsResponse {
    pub polls: Vec<PollSummary>,
    pub total: u64,
    pub pagination: PaginationMeta,
}

#[derive(Serialize)]
pub struct TelemetryResponse {
    pub polls: u64,
    pub ballots: u64,
    pub uptime: String,
}

// ── Helpers ──────────────────────────────────────────────────────────────

fn principal(raw: &str) -> Result<Principal, RpcError> {
    Principal::parse(raw).map_err(|e| RpcError::InvalidRequest(e.to_string()))
}

fn choice_payload(raw: &str) -> Result<Vec<u8>, RpcError> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(stripped)
        .map_err(|_| RpcError::InvalidRequest(format!("choice is not valid hex: {raw:?}")))
}

// ── Write handlers ───────────────────────────────────────────────────────

pub async fn create_poll<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Json(req): Json<CreatePollRequest>,
) -> Result<Json<CreatePollResponse>, RpcError> {
    let creator = principal(&req.creator)?;
    let now = state.clock.now();
    let id = state.ledger()?.create_poll(
        req.title,
        req.description,
        req.options,
        ballot_types::Timestamp::new(req.deadline),
        &creator,
        now,
    )?;
    Ok(Json(CreatePollResponse { id: id.as_u64() }))
}

pub async fn cast_vote<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Path(id): Path<u64>,
    Json(req): Json<CastVoteRequest>,
) -> Result<Json<CastVoteResponse>, RpcError> {
    let voter = principal(&req.voter)?;
    let payload = choice_payload(&req.choice)?;
    let now = state.clock.now();
    state
        .ledger()?
        .cast_vote(PollId::new(id), &payload, &voter, now)?;
    Ok(Json(CastVoteResponse { accepted: true }))
}

pub async fn reveal_results<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Path(id): Path<u64>,
    Json(req): Json<RevealRequest>,
) -> Result<Json<ResultsResponse>, RpcError> {
    let caller = principal(&req.caller)?;
    let now = state.clock.now();
    let mut ledger = state.ledger()?;
    ledger.reveal_results(PollId::new(id), req.counts, &caller, now)?;
    let results = ledger.results(PollId::new(id))?;
    Ok(Json(ResultsResponse {
        options: results.options,
        tallies: results.tallies,
        total_voters: results.total_voters,
        is_revealed: results.is_revealed,
    }))
}

pub async fn end_vote_early<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Path(id): Path<u64>,
    Json(req): Json<EndVoteRequest>,
) -> Result<Json<PollInfoResponse>, RpcError> {
    let caller = principal(&req.caller)?;
    let now = state.clock.now();
    let mut ledger = state.ledger()?;
    ledger.end_vote_early(PollId::new(id), &caller, now)?;
    let poll = ledger.poll_info(PollId::new(id))?;
    let expired = poll.deadline.has_passed(now);
    Ok(Json(PollInfoResponse::from_poll(PollId::new(id), poll, expired)))
}

// ── Read handlers ────────────────────────────────────────────────────────

pub async fn poll_info<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Path(id): Path<u64>,
) -> Result<Json<PollInfoResponse>, RpcError> {
    let now = state.clock.now();
    let ledger = state.ledger()?;
    let poll = ledger.poll_info(PollId::new(id))?;
    let expired = poll.deadline.has_passed(now);
    Ok(Json(PollInfoResponse::from_poll(PollId::new(id), poll, expired)))
}

pub async fn results<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Path(id): Path<u64>,
) -> Result<Json<ResultsResponse>, RpcError> {
    let ledger = state.ledger()?;
    let results = ledger.results(PollId::new(id))?;
    Ok(Json(ResultsResponse {
        options: results.options,
        tallies: results.tallies,
        total_voters: results.total_voters,
        is_revealed: results.is_revealed,
    }))
}

pub async fn has_voted<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Path((id, address)): Path<(u64, String)>,
) -> Result<Json<HasVotedResponse>, RpcError> {
    let voter = principal(&address)?;
    let ledger = state.ledger()?;
    let has_voted = ledger.has_address_voted(PollId::new(id), &voter)?;
    Ok(Json(HasVotedResponse { has_voted }))
}

pub async fn list_polls<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ListPollsResponse>, RpcError> {
    let offset = params.offset();
    let count = params.effective_count();
    let ledger = state.ledger()?;
    let total = ledger.total_polls()?;
    let polls: Vec<PollSummary> = ledger
        .polls_page(offset, count as usize)?
        .into_iter()
        .map(|(id, poll)| PollSummary {
            id: id.as_u64(),
            title: poll.title,
            deadline: poll.deadline.as_secs(),
            total_voters: poll.total_voters,
            is_revealed: poll.is_revealed,
            creator: poll.creator.to_string(),
        })
        .collect();
    let pagination = PaginationMeta::after(offset, polls.len(), count);
    Ok(Json(ListPollsResponse {
        polls,
        total,
        pagination,
    }))
}

pub async fn telemetry<S: PollStore + Send + 'static>(
    State(state): State<Arc<RpcState<S>>>,
) -> Result<Json<TelemetryResponse>, RpcError> {
    let now = state.clock.now();
    let summary = state.ledger()?.summary()?;
    Ok(Json(TelemetryResponse {
        polls: summary.polls,
        ballots: summary.ballots,
        uptime: ballot_utils::format_duration(state.started_at.elapsed_since(now)),
    }))
}

//! End-to-end exercise of the HTTP surface against an in-memory ledger.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ballot_ledger::PollLedger;
use ballot_nullables::{MemoryPollStore, NullClock};
use ballot_rpc::{event_channel, router, BroadcastSink, RpcState};
use ballot_types::Principal;

const START: u64 = 1_000_000;

fn test_router() -> (Router, Arc<NullClock>) {
    let clock = Arc::new(NullClock::new(START));
    let events = event_channel();
    let ledger = PollLedger::new(MemoryPollStore::new(), Principal::new("0xowner"))
        .with_event_sink(Box::new(BroadcastSink::new(events.clone())));
    let state = Arc::new(RpcState::new(ledger, Box::new(clock.clone()), events));
    (router(state), clock)
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_poll(app: &Router, creator: &str, deadline: u64) -> u64 {
    let (status, body) = request(
        app,
        "POST",
        "/polls",
        Some(json!({
            "creator": creator,
            "title": "A or B",
            "options": ["A", "B"],
            "deadline": deadline,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_u64().unwrap()
}

#[tokio::test]
async fn vote_lifecycle_over_http() {
    let (app, _clock) = test_router();
    let id = create_poll(&app, "0xcreator", START + 3600).await;
    assert_eq!(id, 0);

    let (status, body) = request(
        &app,
        "POST",
        "/polls/0/votes",
        Some(json!({ "voter": "0xvoter1", "choice": "0x0001" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["accepted"], json!(true));

    // Same voter again: conflict, tallies unchanged.
    let (status, _) = request(
        &app,
        "POST",
        "/polls/0/votes",
        Some(json!({ "voter": "0xvoter1", "choice": "0x0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = request(&app, "GET", "/polls/0/results", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tallies"], json!([0, 1]));
    assert_eq!(body["total_voters"], json!(1));
    assert_eq!(body["is_revealed"], json!(true));

    let (status, body) = request(&app, "GET", "/polls/0/voters/0xvoter1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_voted"], json!(true));
    let (_, body) = request(&app, "GET", "/polls/0/voters/0xvoter2", None).await;
    assert_eq!(body["has_voted"], json!(false));
}

#[tokio::test]
async fn malformed_choice_hex_is_rejected_but_odd_length_payload_counts() {
    let (app, _clock) = test_router();
    create_poll(&app, "0xcreator", START + 3600).await;

    // Not hex at all: transport-level 400, no vote recorded.
    let (status, _) = request(
        &app,
        "POST",
        "/polls/0/votes",
        Some(json!({ "voter": "0xv1", "choice": "zzzz" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Valid hex but 3 bytes: the lenient codec counts it for option 0.
    let (status, _) = request(
        &app,
        "POST",
        "/polls/0/votes",
        Some(json!({ "voter": "0xv1", "choice": "0x010203" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = request(&app, "GET", "/polls/0/results", None).await;
    assert_eq!(body["tallies"], json!([1, 0]));
}

#[tokio::test]
async fn deadline_and_reveal_flow() {
    let (app, clock) = test_router();
    create_poll(&app, "0xcreator", START + 60).await;
    clock.advance(60);

    let (status, _) = request(
        &app,
        "POST",
        "/polls/0/votes",
        Some(json!({ "voter": "0xv1", "choice": "0x0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Non-creator may not reveal.
    let (status, _) = request(
        &app,
        "POST",
        "/polls/0/reveal",
        Some(json!({ "caller": "0xstranger", "counts": [3, 5] })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = request(
        &app,
        "POST",
        "/polls/0/reveal",
        Some(json!({ "caller": "0xcreator", "counts": [3, 5] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tallies"], json!([3, 5]));

    let (status, _) = request(
        &app,
        "POST",
        "/polls/0/reveal",
        Some(json!({ "caller": "0xcreator", "counts": [0, 0] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn end_early_then_vote_rejected() {
    let (app, _clock) = test_router();
    create_poll(&app, "0xcreator", START + 3600).await;

    // The ledger owner can end a poll it did not create.
    let (status, body) = request(
        &app,
        "POST",
        "/polls/0/end",
        Some(json!({ "caller": "0xowner" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expired"], json!(true));

    let (status, _) = request(
        &app,
        "POST",
        "/polls/0/votes",
        Some(json!({ "voter": "0xv1", "choice": "0x0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_poll_is_404() {
    let (app, _clock) = test_router();
    let (status, _) = request(&app, "GET", "/polls/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = request(&app, "GET", "/polls/42/results", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_pages_through_polls() {
    let (app, _clock) = test_router();
    for _ in 0..3 {
        create_poll(&app, "0xcreator", START + 3600).await;
    }

    let (status, body) = request(&app, "GET", "/polls?count=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["polls"].as_array().unwrap().len(), 2);
    let cursor = body["pagination"]["cursor"].as_str().unwrap().to_string();

    let (_, body) = request(&app, "GET", &format!("/polls?count=2&cursor={cursor}"), None).await;
    let page = body["polls"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["id"], json!(2));
    assert!(body["pagination"].get("cursor").is_none());
}

#[tokio::test]
async fn telemetry_reports_counts() {
    let (app, clock) = test_router();
    create_poll(&app, "0xcreator", START + 3600).await;
    clock.advance(90);
    let (status, body) = request(&app, "GET", "/telemetry", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["polls"], json!(1));
    assert_eq!(body["ballots"], json!(0));
    assert_eq!(body["uptime"], json!("1m 30s"));
}

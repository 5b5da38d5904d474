//! Integration tests for the REST transport.
//!
//! Each test serves the router on an ephemeral port and drives it with
//! `reqwest`.

use chat_queue::config::OfficeHours;
use chat_queue::http::handlers::{StartResponse, StatusResponse, QUEUE_FULL_MESSAGE};
use chat_queue::models::session::{QueueKind, SessionId, SessionStatus};

use super::test_helpers::{overflow_engine, small_engine, spawn_server};

/// Window that never matches, so omitted flags mean "outside office hours".
fn closed_hours() -> OfficeHours {
    OfficeHours {
        start_hour: 0,
        end_hour: 0,
    }
}

/// Window that always matches, so omitted flags mean "inside office hours".
fn open_hours() -> OfficeHours {
    OfficeHours {
        start_hour: 0,
        end_hour: 24,
    }
}

async fn start(client: &reqwest::Client, base_url: &str, query: &str) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/chat/start{query}"))
        .send()
        .await
        .expect("POST /api/chat/start")
}

#[tokio::test]
async fn health_returns_ok() {
    let (base_url, ct) = spawn_server(small_engine(), closed_hours()).await;

    let resp = reqwest::get(format!("{base_url}/health"))
        .await
        .expect("GET /health");

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.expect("body"), "ok");
    ct.cancel();
}

#[tokio::test]
async fn start_then_status_reports_queued() {
    let (base_url, ct) = spawn_server(small_engine(), closed_hours()).await;
    let client = reqwest::Client::new();

    let resp = start(&client, &base_url, "?is_office_hours=false").await;
    assert_eq!(resp.status(), 200);
    let body: StartResponse = resp.json().await.expect("start json");

    let resp = client
        .get(format!("{base_url}/api/chat/status/{}", body.session_id))
        .send()
        .await
        .expect("GET status");
    assert_eq!(resp.status(), 200);
    let status: StatusResponse = resp.json().await.expect("status json");
    assert_eq!(status.session_id, body.session_id);
    assert_eq!(status.status, SessionStatus::Queued);

    ct.cancel();
}

#[tokio::test]
async fn unknown_session_status_is_404() {
    let (base_url, ct) = spawn_server(small_engine(), closed_hours()).await;

    let resp = reqwest::get(format!("{base_url}/api/chat/status/{}", SessionId::new()))
        .await
        .expect("GET status");

    assert_eq!(resp.status(), 404);
    ct.cancel();
}

#[tokio::test]
async fn three_polls_report_inactive() {
    let engine = small_engine();
    let (base_url, ct) = spawn_server(engine, closed_hours()).await;
    let client = reqwest::Client::new();

    let body: StartResponse = start(&client, &base_url, "")
        .await
        .json()
        .await
        .expect("start json");
    for _ in 0..3 {
        let resp = client
            .post(format!("{base_url}/api/chat/poll/{}", body.session_id))
            .send()
            .await
            .expect("POST poll");
        assert_eq!(resp.status(), 200);
    }

    let status: StatusResponse = client
        .get(format!("{base_url}/api/chat/status/{}", body.session_id))
        .send()
        .await
        .expect("GET status")
        .json()
        .await
        .expect("status json");
    assert_eq!(status.status, SessionStatus::Inactive);

    ct.cancel();
}

#[tokio::test]
async fn poll_unknown_session_is_ok() {
    let (base_url, ct) = spawn_server(small_engine(), closed_hours()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base_url}/api/chat/poll/{}", SessionId::new()))
        .send()
        .await
        .expect("POST poll");

    assert_eq!(resp.status(), 200);
    ct.cancel();
}

#[tokio::test]
async fn malformed_session_id_is_400() {
    let (base_url, ct) = spawn_server(small_engine(), closed_hours()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base_url}/api/chat/poll/not-a-uuid"))
        .send()
        .await
        .expect("POST poll");

    assert_eq!(resp.status(), 400);
    ct.cancel();
}

#[tokio::test]
async fn full_queue_returns_429() {
    // Shift 0 limit is 13 and there is no overflow roster.
    let (base_url, ct) = spawn_server(small_engine(), closed_hours()).await;
    let client = reqwest::Client::new();

    for _ in 0..13 {
        let resp = start(&client, &base_url, "?is_office_hours=true").await;
        assert_eq!(resp.status(), 200);
    }
    let resp = start(&client, &base_url, "?is_office_hours=true").await;

    assert_eq!(resp.status(), 429);
    assert_eq!(resp.text().await.expect("body"), QUEUE_FULL_MESSAGE);
    ct.cancel();
}

#[tokio::test]
async fn omitted_flag_inside_window_admits_to_overflow() {
    let engine = overflow_engine();
    let (base_url, ct) = spawn_server(std::sync::Arc::clone(&engine), open_hours()).await;
    let client = reqwest::Client::new();

    for _ in 0..6 {
        assert_eq!(start(&client, &base_url, "").await.status(), 200);
    }
    let resp = start(&client, &base_url, "").await;
    assert_eq!(resp.status(), 200);
    let body: StartResponse = resp.json().await.expect("start json");

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.queue_len(QueueKind::Primary), 6);
    assert_eq!(snapshot.queue_len(QueueKind::Overflow), 1);
    let session = snapshot.session(&body.session_id).expect("tracked");
    assert_eq!(session.queue, QueueKind::Overflow);
    ct.cancel();
}

#[tokio::test]
async fn omitted_flag_outside_window_rejects_past_primary_limit() {
    let engine = overflow_engine();
    let (base_url, ct) = spawn_server(std::sync::Arc::clone(&engine), closed_hours()).await;
    let client = reqwest::Client::new();

    for _ in 0..6 {
        assert_eq!(start(&client, &base_url, "").await.status(), 200);
    }
    let resp = start(&client, &base_url, "").await;

    assert_eq!(resp.status(), 429);
    assert_eq!(engine.snapshot().await.queue_len(QueueKind::Overflow), 0);
    ct.cancel();
}

#[tokio::test]
async fn camel_case_office_hours_flag_is_accepted() {
    let (base_url, ct) = spawn_server(small_engine(), closed_hours()).await;
    let client = reqwest::Client::new();

    let resp = start(&client, &base_url, "?isOfficeHours=true").await;

    assert_eq!(resp.status(), 200);
    ct.cancel();
}

#[tokio::test]
async fn shift_endpoint_changes_engine_shift() {
    let engine = small_engine();
    let (base_url, ct) = spawn_server(std::sync::Arc::clone(&engine), closed_hours()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base_url}/api/chat/shift/2"))
        .send()
        .await
        .expect("POST shift");

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("shift json");
    assert_eq!(body["shift"], 2);
    assert_eq!(engine.current_shift().await, 2);
    ct.cancel();
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (base_url, ct) = spawn_server(small_engine(), closed_hours()).await;

    let resp = reqwest::get(format!("{base_url}/nonexistent"))
        .await
        .expect("GET /nonexistent");

    assert_eq!(resp.status(), 404);
    ct.cancel();
}

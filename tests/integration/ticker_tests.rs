//! Integration tests for the background tick task.

use std::sync::Arc;
use std::time::Duration;

use chat_queue::engine::ticker::{spawn_tick_task, TickTrigger};
use chat_queue::models::session::SessionStatus;
use tokio_util::sync::CancellationToken;

use super::test_helpers::{manual_ticks, small_engine};

#[tokio::test]
async fn interval_ticks_assign_queued_sessions() {
    let engine = small_engine();
    let ct = CancellationToken::new();
    let handle = spawn_tick_task(
        Arc::clone(&engine),
        TickTrigger::Interval(Duration::from_millis(20)),
        ct.clone(),
    );

    let id = engine.submit(false).await.session_id().expect("accepted");

    let assigned = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if engine.status(id).await == SessionStatus::Assigned {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(assigned.is_ok(), "session should be assigned by the interval task");

    ct.cancel();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("task stops after cancel")
        .expect("task did not panic");
}

#[tokio::test]
async fn interval_ticks_evict_inactive_sessions() {
    let engine = small_engine();
    let ct = CancellationToken::new();
    let handle = spawn_tick_task(
        Arc::clone(&engine),
        TickTrigger::Interval(Duration::from_millis(20)),
        ct.clone(),
    );

    let id = engine.submit(false).await.session_id().expect("accepted");
    for _ in 0..3 {
        engine.record_liveness(id).await;
    }

    let evicted = tokio::time::timeout(Duration::from_secs(2), async {
        while engine.status(id).await != SessionStatus::NotFound {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(evicted.is_ok(), "inactive session should be purged");

    ct.cancel();
    handle.await.expect("task did not panic");
}

#[tokio::test]
async fn manual_ticker_reports_none_after_cancel() {
    let engine = small_engine();
    let (ticker, handle, ct) = manual_ticks(&engine);

    assert!(ticker.tick().await.is_some());

    ct.cancel();
    handle.await.expect("task did not panic");
    assert!(ticker.tick().await.is_none());
}

#[tokio::test]
async fn manual_task_stops_when_ticker_dropped() {
    let engine = small_engine();
    let (ticker, handle, _ct) = manual_ticks(&engine);

    drop(ticker);

    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("task stops once every ticker is gone")
        .expect("task did not panic");
}

#[tokio::test]
async fn manual_ticks_do_nothing_without_work() {
    let engine = small_engine();
    let (ticker, handle, ct) = manual_ticks(&engine);

    let report = ticker.tick().await.expect("tick ran");
    assert!(report.is_empty());

    ct.cancel();
    handle.await.expect("task did not panic");
}

//! Background task driving periodic eviction and assignment.
//!
//! Production runs on a fixed [`TickTrigger::Interval`]. Tests inject a
//! [`ManualTicker`] so each tick happens exactly when requested and hands
//! back its [`TickReport`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};

use super::{QueueEngine, TickReport};

type TickRequest = oneshot::Sender<TickReport>;

/// What wakes the tick task.
#[derive(Debug)]
pub enum TickTrigger {
    /// Tick every `Duration`.
    Interval(Duration),
    /// Tick once per request received from a [`ManualTicker`].
    Manual(mpsc::Receiver<TickRequest>),
}

/// Requests ticks from a task spawned with [`TickTrigger::Manual`].
#[derive(Debug, Clone)]
pub struct ManualTicker {
    tx: mpsc::Sender<TickRequest>,
}

impl ManualTicker {
    /// Create a ticker and the trigger to spawn the task with.
    #[must_use]
    pub fn new() -> (Self, TickTrigger) {
        let (tx, rx) = mpsc::channel(8);
        (Self { tx }, TickTrigger::Manual(rx))
    }

    /// Run one tick and wait for its report.
    ///
    /// Returns `None` once the tick task has stopped.
    pub async fn tick(&self) -> Option<TickReport> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx.send(reply_tx).await.ok()?;
        reply_rx.await.ok()
    }
}

/// Spawn the tick task. It runs until `cancel` fires or, for a manual
/// trigger, until every [`ManualTicker`] is dropped.
#[must_use]
pub fn spawn_tick_task(
    engine: Arc<QueueEngine>,
    trigger: TickTrigger,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(
        async move {
            match trigger {
                TickTrigger::Interval(period) => run_interval(&engine, period, &cancel).await,
                TickTrigger::Manual(rx) => run_manual(&engine, rx, &cancel).await,
            }
            info!("tick task shutting down");
        }
        .instrument(info_span!("tick_task")),
    )
}

async fn run_interval(engine: &QueueEngine, period: Duration, cancel: &CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                engine.tick().await;
            }
        }
    }
}

async fn run_manual(
    engine: &QueueEngine,
    mut rx: mpsc::Receiver<TickRequest>,
    cancel: &CancellationToken,
) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            request = rx.recv() => {
                let Some(reply) = request else { break };
                let report = engine.tick().await;
                let _ = reply.send(report);
            }
        }
    }
}

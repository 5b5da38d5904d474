//! Queueing and assignment engine.
//!
//! [`EngineState`] holds rosters, queues, and sessions as plain data.
//! [`QueueEngine`] owns it behind a single lock and exposes the four
//! client operations plus [`tick`](QueueEngine::tick), which the
//! [`ticker`] task drives in the background.

pub mod admission;
pub mod assignment;
pub mod capacity;
pub mod liveness;
pub mod state;
pub mod ticker;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, Instrument};

pub use admission::Admission;
pub use assignment::Assignment;
pub use state::{EngineState, TickReport};

use crate::config::GlobalConfig;
use crate::models::agent::Agent;
use crate::models::session::{SessionId, SessionStatus};

/// Shared queue engine. Construct once and hand out behind an `Arc`.
///
/// Every operation holds the lock for its whole critical section and
/// never awaits anything else while holding it.
#[derive(Debug)]
pub struct QueueEngine {
    state: Mutex<EngineState>,
}

impl QueueEngine {
    /// Wrap an existing state.
    #[must_use]
    pub fn new(state: EngineState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Build an empty engine from configuration.
    #[must_use]
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(EngineState::from_config(config))
    }

    /// Submit a new chat session.
    pub async fn submit(&self, is_office_hours: bool) -> Admission {
        async {
            let admission = self.state.lock().await.admit(is_office_hours);
            match admission {
                Admission::Accepted { session_id, queue } => {
                    info!(%session_id, ?queue, "session admitted");
                }
                Admission::Rejected => info!("session rejected: queues full"),
            }
            admission
        }
        .instrument(info_span!("submit", is_office_hours))
        .await
    }

    /// Record a liveness poll for `id`; unknown ids are ignored.
    pub async fn record_liveness(&self, id: SessionId) {
        async {
            self.state.lock().await.poll(&id);
            debug!("liveness poll recorded");
        }
        .instrument(info_span!("record_liveness", session_id = %id))
        .await;
    }

    /// Current status of `id`.
    pub async fn status(&self, id: SessionId) -> SessionStatus {
        async {
            let status = self.state.lock().await.status(&id);
            debug!(%status, "status queried");
            status
        }
        .instrument(info_span!("status", session_id = %id))
        .await
    }

    /// Switch the active shift.
    pub async fn change_shift(&self, shift: i32) {
        async {
            let previous = {
                let mut state = self.state.lock().await;
                let previous = state.current_shift();
                state.change_shift(shift);
                previous
            };
            info!(previous, "shift changed");
        }
        .instrument(info_span!("change_shift", shift))
        .await;
    }

    /// Run one eviction + assignment pass.
    pub async fn tick(&self) -> TickReport {
        async {
            let report = self.state.lock().await.tick();
            if report.is_empty() {
                debug!("tick: no changes");
            } else {
                info!(
                    evicted = report.evicted.len(),
                    assigned = report.assignments.len(),
                    "tick completed"
                );
            }
            report
        }
        .instrument(info_span!("tick"))
        .await
    }

    /// Shift currently in effect.
    pub async fn current_shift(&self) -> i32 {
        self.state.lock().await.current_shift()
    }

    /// Copy of both rosters with their live chat counts.
    pub async fn agents(&self) -> Vec<Agent> {
        self.state.lock().await.agents().cloned().collect()
    }

    /// Copy of the full state, for inspection.
    pub async fn snapshot(&self) -> EngineState {
        self.state.lock().await.clone()
    }
}

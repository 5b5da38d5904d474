//! Poll counting, status reporting, and inactivity eviction.
//!
//! Poll counts are monotonic: every poll moves a session closer to
//! eviction, and nothing resets the count.

use tracing::info;

use super::state::EngineState;
use crate::models::session::{QueueKind, SessionId, SessionStatus};

impl EngineState {
    /// Record a liveness poll. Unknown ids are ignored.
    pub fn poll(&mut self, id: &SessionId) {
        if let Some(session) = self.sessions.get_mut(id) {
            session.poll_count = session.poll_count.saturating_add(1);
        }
    }

    /// Report the status of `id`.
    #[must_use]
    pub fn status(&self, id: &SessionId) -> SessionStatus {
        self.sessions
            .get(id)
            .map_or(SessionStatus::NotFound, |s| {
                s.status(self.inactivity_threshold)
            })
    }

    /// Purge every session polled up to the threshold.
    ///
    /// Returns the evicted ids.
    pub fn evict_inactive(&mut self) -> Vec<SessionId> {
        let threshold = self.inactivity_threshold;
        let inactive: Vec<(SessionId, QueueKind, bool)> = self
            .sessions
            .values()
            .filter(|s| s.is_inactive(threshold))
            .map(|s| (s.id, s.queue, s.assigned))
            .collect();

        for &(id, queue, assigned) in &inactive {
            if !assigned {
                let q = match queue {
                    QueueKind::Primary => &mut self.primary_queue,
                    QueueKind::Overflow => &mut self.overflow_queue,
                };
                q.retain(|queued| *queued != id);
            }
            self.sessions.remove(&id);
            info!(session_id = %id, assigned, "inactive session evicted");
        }

        inactive.into_iter().map(|(id, _, _)| id).collect()
    }
}

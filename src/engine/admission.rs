//! Admission control: primary queue, overflow queue, or rejection.

use tracing::debug;

use super::capacity::{capacity, max_primary_queue, overflow_capacity};
use super::state::EngineState;
use crate::models::session::{QueueKind, Session, SessionId};

/// Result of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Session admitted into `queue`.
    Accepted {
        /// Identifier of the new session.
        session_id: SessionId,
        /// Queue the session waits in.
        queue: QueueKind,
    },
    /// Both queues are full, or only overflow has room and it is outside
    /// office hours. Nothing was recorded.
    Rejected,
}

impl Admission {
    /// Identifier of the admitted session, if any.
    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            Self::Accepted { session_id, .. } => Some(*session_id),
            Self::Rejected => None,
        }
    }

    /// Whether the submission was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

fn below(len: usize, bound: u32) -> bool {
    u32::try_from(len).is_ok_and(|len| len < bound)
}

impl EngineState {
    /// Current primary queue bound, recomputed from the live roster and shift.
    #[must_use]
    pub fn primary_queue_limit(&self) -> u32 {
        max_primary_queue(capacity(&self.primary_agents, self.current_shift))
    }

    /// Current overflow queue bound.
    #[must_use]
    pub fn overflow_queue_limit(&self) -> u32 {
        overflow_capacity(&self.overflow_agents)
    }

    /// Admit a new session if either queue has room.
    pub fn admit(&mut self, is_office_hours: bool) -> Admission {
        let kind = if below(self.primary_queue.len(), self.primary_queue_limit()) {
            QueueKind::Primary
        } else if is_office_hours
            && below(self.overflow_queue.len(), self.overflow_queue_limit())
        {
            QueueKind::Overflow
        } else {
            debug!(
                primary = self.primary_queue.len(),
                overflow = self.overflow_queue.len(),
                is_office_hours,
                "admission rejected"
            );
            return Admission::Rejected;
        };

        let session = Session::new(kind);
        let session_id = session.id;
        match kind {
            QueueKind::Primary => self.primary_queue.push_back(session_id),
            QueueKind::Overflow => self.overflow_queue.push_back(session_id),
        }
        self.sessions.insert(session_id, session);

        Admission::Accepted {
            session_id,
            queue: kind,
        }
    }
}

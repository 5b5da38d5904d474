//! Seniority-ordered assignment of queued sessions to available agents.
//!
//! Each queue is drained against its own roster. Candidates are agents on
//! the current shift or floating, with spare capacity, ordered junior
//! first so senior capacity stays in reserve. The first session that finds
//! no candidate goes back to the head of its queue and ends that queue's
//! pass for the tick.

use std::collections::{HashMap, VecDeque};

use tracing::info;

use super::state::EngineState;
use crate::models::agent::Agent;
use crate::models::session::{QueueKind, Session, SessionId};

/// A single chat handed to an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Session that was assigned.
    pub session_id: SessionId,
    /// Agent that took it.
    pub agent: String,
    /// Queue the session came from.
    pub queue: QueueKind,
}

/// A queue paired with the roster that serves it.
struct Pool<'a> {
    kind: QueueKind,
    queue: &'a mut VecDeque<SessionId>,
    roster: &'a mut [Agent],
}

/// Index of the preferred eligible agent, if any.
///
/// `min_by_key` keeps the first of equal keys, so roster order breaks ties.
fn pick_agent(roster: &[Agent], shift: i32) -> Option<usize> {
    roster
        .iter()
        .enumerate()
        .filter(|(_, a)| a.shift.covers(shift) && a.is_available())
        .min_by_key(|(_, a)| a.seniority)
        .map(|(idx, _)| idx)
}

fn drain_pool(
    pool: Pool<'_>,
    sessions: &mut HashMap<SessionId, Session>,
    shift: i32,
    out: &mut Vec<Assignment>,
) {
    while let Some(session_id) = pool.queue.pop_front() {
        let Some(session) = sessions.get_mut(&session_id) else {
            // Untracked ids cannot be assigned; drop them from the queue.
            continue;
        };

        let Some(idx) = pick_agent(pool.roster, shift) else {
            pool.queue.push_front(session_id);
            break;
        };

        let agent = &mut pool.roster[idx];
        agent.active_chats += 1;
        session.assigned = true;
        session.assigned_agent = Some(agent.name.clone());

        info!(
            %session_id,
            agent = %agent.name,
            queue = ?pool.kind,
            active_chats = agent.active_chats,
            "session assigned"
        );
        out.push(Assignment {
            session_id,
            agent: agent.name.clone(),
            queue: pool.kind,
        });
    }
}

impl EngineState {
    /// Run one assignment pass over the primary queue, then overflow.
    pub fn assign(&mut self) -> Vec<Assignment> {
        let shift = self.current_shift;
        let mut assignments = Vec::new();

        let pools = [
            Pool {
                kind: QueueKind::Primary,
                queue: &mut self.primary_queue,
                roster: &mut self.primary_agents,
            },
            Pool {
                kind: QueueKind::Overflow,
                queue: &mut self.overflow_queue,
                roster: &mut self.overflow_agents,
            },
        ];
        for pool in pools {
            drain_pool(pool, &mut self.sessions, shift, &mut assignments);
        }

        assignments
    }
}

//! Mutable engine state: rosters, queues, sessions, and the current shift.
//!
//! `EngineState` is plain data with synchronous operations. Admission,
//! assignment, and liveness live in sibling modules as further `impl`
//! blocks; [`QueueEngine`](super::QueueEngine) wraps it in the lock.

use std::collections::{HashMap, VecDeque};

use super::assignment::Assignment;
use crate::config::GlobalConfig;
use crate::models::agent::Agent;
use crate::models::session::{QueueKind, Session, SessionId};

/// Outcome of one eviction + assignment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Sessions purged for inactivity, in no particular order.
    pub evicted: Vec<SessionId>,
    /// Chats handed to agents, in assignment order.
    pub assignments: Vec<Assignment>,
}

impl TickReport {
    /// Whether the tick changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.evicted.is_empty() && self.assignments.is_empty()
    }
}

/// All queueing state owned by the engine.
#[derive(Debug, Clone)]
pub struct EngineState {
    pub(crate) primary_agents: Vec<Agent>,
    pub(crate) overflow_agents: Vec<Agent>,
    pub(crate) primary_queue: VecDeque<SessionId>,
    pub(crate) overflow_queue: VecDeque<SessionId>,
    pub(crate) sessions: HashMap<SessionId, Session>,
    pub(crate) current_shift: i32,
    pub(crate) inactivity_threshold: u32,
}

impl EngineState {
    /// Build an empty state over the given rosters.
    #[must_use]
    pub fn new(
        primary_agents: Vec<Agent>,
        overflow_agents: Vec<Agent>,
        current_shift: i32,
        inactivity_threshold: u32,
    ) -> Self {
        Self {
            primary_agents,
            overflow_agents,
            primary_queue: VecDeque::new(),
            overflow_queue: VecDeque::new(),
            sessions: HashMap::new(),
            current_shift,
            inactivity_threshold,
        }
    }

    /// Build an empty state from configuration.
    #[must_use]
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(
            config.primary_roster(),
            config.overflow_roster(),
            config.initial_shift,
            config.inactivity_poll_threshold,
        )
    }

    /// Shift currently in effect.
    #[must_use]
    pub fn current_shift(&self) -> i32 {
        self.current_shift
    }

    /// Switch to `shift` for all subsequent capacity and assignment decisions.
    ///
    /// Chats already held by agents of the previous shift stay with them.
    pub fn change_shift(&mut self, shift: i32) {
        self.current_shift = shift;
    }

    /// Number of sessions waiting in `kind`.
    #[must_use]
    pub fn queue_len(&self, kind: QueueKind) -> usize {
        match kind {
            QueueKind::Primary => self.primary_queue.len(),
            QueueKind::Overflow => self.overflow_queue.len(),
        }
    }

    /// Sessions waiting in `kind`, head first.
    pub fn queued(&self, kind: QueueKind) -> impl Iterator<Item = &SessionId> {
        match kind {
            QueueKind::Primary => self.primary_queue.iter(),
            QueueKind::Overflow => self.overflow_queue.iter(),
        }
    }

    /// Number of sessions still tracked (queued or assigned).
    #[must_use]
    pub fn tracked_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Look up a tracked session.
    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Primary and overflow agents, primary first.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.primary_agents.iter().chain(self.overflow_agents.iter())
    }

    /// Look up an agent by name across both rosters.
    #[must_use]
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents().find(|a| a.name == name)
    }

    /// Evict inactive sessions, then assign what the rosters can absorb.
    ///
    /// Eviction runs first so a session that went inactive is never
    /// assigned in the same pass.
    pub fn tick(&mut self) -> TickReport {
        let evicted = self.evict_inactive();
        let assignments = self.assign();
        TickReport {
            evicted,
            assignments,
        }
    }
}

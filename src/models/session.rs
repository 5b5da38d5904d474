//! Chat session model and status reporting.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Globally unique chat session identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Queue a session was admitted into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// Shift-capacity queue served by the primary roster.
    Primary,
    /// Office-hours queue served by the floating overflow roster.
    Overflow,
}

/// Externally visible state of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Never issued, or already purged.
    NotFound,
    /// Polled up to the inactivity threshold; awaiting eviction.
    Inactive,
    /// Handed to an agent.
    Assigned,
    /// Waiting in a queue.
    Queued,
}

impl Display for SessionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Inactive => "inactive",
            Self::Assigned => "assigned",
            Self::Queued => "queued",
        };
        f.write_str(label)
    }
}

/// A tracked chat session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Session {
    /// Unique identifier; never reused.
    pub id: SessionId,
    /// Admission timestamp.
    pub created_at: DateTime<Utc>,
    /// Queue the session was admitted into.
    pub queue: QueueKind,
    /// Set once an agent has taken the chat; never cleared.
    pub assigned: bool,
    /// Agent that took the chat.
    pub assigned_agent: Option<String>,
    /// Liveness polls observed so far. Monotonic.
    pub poll_count: u32,
}

impl Session {
    /// Construct a freshly admitted, unpolled session.
    #[must_use]
    pub fn new(queue: QueueKind) -> Self {
        Self {
            id: SessionId::new(),
            created_at: Utc::now(),
            queue,
            assigned: false,
            assigned_agent: None,
            poll_count: 0,
        }
    }

    /// Whether the poll count has reached `threshold`.
    #[must_use]
    pub fn is_inactive(&self, threshold: u32) -> bool {
        self.poll_count >= threshold
    }

    /// Status as reported to callers.
    #[must_use]
    pub fn status(&self, threshold: u32) -> SessionStatus {
        if self.is_inactive(threshold) {
            SessionStatus::Inactive
        } else if self.assigned {
            SessionStatus::Assigned
        } else {
            SessionStatus::Queued
        }
    }
}

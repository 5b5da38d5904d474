//! Support agent model and seniority-derived capacity.

use serde::{Deserialize, Serialize};

/// Seniority level of a support agent.
///
/// The declaration order is also the assignment priority: juniors are
/// offered new chats first, team leads last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    /// Entry-level agent.
    Junior,
    /// Mid-level agent.
    MidLevel,
    /// Senior agent.
    Senior,
    /// Team lead; handles chats only when nobody else can.
    TeamLead,
}

impl Seniority {
    /// Efficiency expressed in tenths (Junior 0.4 is `4`).
    ///
    /// Kept integral so capacity arithmetic stays exact.
    #[must_use]
    pub const fn efficiency_tenths(self) -> u32 {
        match self {
            Self::Junior => 4,
            Self::MidLevel => 6,
            Self::Senior => 8,
            Self::TeamLead => 5,
        }
    }

    /// Maximum concurrent chats: `floor(10 × efficiency)`.
    #[must_use]
    pub const fn max_chats(self) -> u32 {
        self.efficiency_tenths()
    }
}

/// Which shift an agent works.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentShift {
    /// Bound to a single numbered shift.
    Fixed(i32),
    /// Eligible on every shift.
    Floating,
}

impl AgentShift {
    /// Whether an agent on this shift may take chats during `current`.
    #[must_use]
    pub fn covers(self, current: i32) -> bool {
        match self {
            Self::Fixed(shift) => shift == current,
            Self::Floating => true,
        }
    }
}

/// A support agent and their live chat load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Agent {
    /// Display name; unique across all rosters.
    pub name: String,
    /// Seniority level, which fixes capacity and priority.
    pub seniority: Seniority,
    /// Shift assignment.
    pub shift: AgentShift,
    /// Chats currently held by this agent.
    pub active_chats: u32,
}

impl Agent {
    /// Construct an idle agent bound to a numbered shift.
    #[must_use]
    pub fn on_shift(name: impl Into<String>, seniority: Seniority, shift: i32) -> Self {
        Self {
            name: name.into(),
            seniority,
            shift: AgentShift::Fixed(shift),
            active_chats: 0,
        }
    }

    /// Construct an idle floating agent.
    #[must_use]
    pub fn floating(name: impl Into<String>, seniority: Seniority) -> Self {
        Self {
            name: name.into(),
            seniority,
            shift: AgentShift::Floating,
            active_chats: 0,
        }
    }

    /// Maximum concurrent chats for this agent.
    #[must_use]
    pub fn max_chats(&self) -> u32 {
        self.seniority.max_chats()
    }

    /// Whether the agent can take one more chat.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.active_chats < self.max_chats()
    }
}

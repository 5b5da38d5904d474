//! Shift-aware capacity computation.

use crate::models::agent::{Agent, AgentShift};

/// Total concurrent chats the agents bound to `shift` can handle.
///
/// Only agents whose shift is exactly `shift` count; floating agents are
/// budgeted separately through [`overflow_capacity`].
#[must_use]
pub fn capacity(agents: &[Agent], shift: i32) -> u32 {
    agents
        .iter()
        .filter(|a| a.shift == AgentShift::Fixed(shift))
        .map(Agent::max_chats)
        .sum()
}

/// Primary queue bound: `floor(1.5 × capacity)`.
#[must_use]
pub fn max_primary_queue(capacity: u32) -> u32 {
    capacity.saturating_mul(3) / 2
}

/// Overflow queue bound: combined max chats of the overflow roster,
/// regardless of shift.
#[must_use]
pub fn overflow_capacity(agents: &[Agent]) -> u32 {
    agents.iter().map(Agent::max_chats).sum()
}

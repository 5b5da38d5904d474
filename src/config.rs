//! Global configuration parsing and validation.

use std::collections::HashSet;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::models::agent::{Agent, Seniority};
use crate::{AppError, Result};

/// A primary-roster agent bound to one shift.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AgentConfig {
    /// Display name.
    pub name: String,
    /// Seniority level.
    pub seniority: Seniority,
    /// Shift number the agent works.
    pub shift: i32,
}

/// An overflow-roster agent; overflow agents float across shifts.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct OverflowAgentConfig {
    /// Display name.
    pub name: String,
    /// Seniority level.
    pub seniority: Seniority,
}

/// Business-hours window used when a caller does not state office hours.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct OfficeHours {
    /// First hour (local time, inclusive).
    #[serde(default = "default_office_start")]
    pub start_hour: u32,
    /// Last hour (local time, exclusive).
    #[serde(default = "default_office_end")]
    pub end_hour: u32,
}

impl OfficeHours {
    /// Whether `hour` falls inside the window.
    #[must_use]
    pub fn contains(&self, hour: u32) -> bool {
        (self.start_hour..self.end_hour).contains(&hour)
    }
}

impl Default for OfficeHours {
    fn default() -> Self {
        Self {
            start_hour: default_office_start(),
            end_hour: default_office_end(),
        }
    }
}

fn default_office_start() -> u32 {
    9
}

fn default_office_end() -> u32 {
    17
}

fn default_http_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_http_port() -> u16 {
    8080
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_inactivity_poll_threshold() -> u32 {
    3
}

fn default_agents() -> Vec<AgentConfig> {
    let roster = [
        ("A1", Seniority::TeamLead, 0),
        ("A2", Seniority::MidLevel, 0),
        ("A3", Seniority::MidLevel, 0),
        ("A4", Seniority::Junior, 0),
        ("B1", Seniority::Senior, 1),
        ("B2", Seniority::MidLevel, 1),
        ("B3", Seniority::Junior, 1),
        ("B4", Seniority::Junior, 1),
        ("C1", Seniority::MidLevel, 2),
        ("C2", Seniority::MidLevel, 2),
    ];
    roster
        .into_iter()
        .map(|(name, seniority, shift)| AgentConfig {
            name: name.into(),
            seniority,
            shift,
        })
        .collect()
}

fn default_overflow_agents() -> Vec<OverflowAgentConfig> {
    (1..=6)
        .map(|i| OverflowAgentConfig {
            name: format!("Overflow{i}"),
            seniority: Seniority::Junior,
        })
        .collect()
}

/// Global configuration parsed from `config.toml`.
///
/// Every field has a default, so an empty document yields the built-in
/// roster on `127.0.0.1:8080`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Address the HTTP transport binds to.
    #[serde(default = "default_http_host")]
    pub http_host: IpAddr,
    /// HTTP port; `0` lets the OS pick.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Milliseconds between eviction/assignment ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Polls after which a session counts as inactive.
    #[serde(default = "default_inactivity_poll_threshold")]
    pub inactivity_poll_threshold: u32,
    /// Shift active at startup.
    #[serde(default)]
    pub initial_shift: i32,
    /// Business-hours window for callers that omit the flag.
    #[serde(default)]
    pub office_hours: OfficeHours,
    /// Shift-bound primary roster.
    #[serde(default = "default_agents")]
    pub agents: Vec<AgentConfig>,
    /// Floating overflow roster.
    #[serde(default = "default_overflow_agents")]
    pub overflow_agents: Vec<OverflowAgentConfig>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_host: default_http_host(),
            http_port: default_http_port(),
            tick_interval_ms: default_tick_interval_ms(),
            inactivity_poll_threshold: default_inactivity_poll_threshold(),
            initial_shift: 0,
            office_hours: OfficeHours::default(),
            agents: default_agents(),
            overflow_agents: default_overflow_agents(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read, and
    /// `AppError::Config` if it contains invalid TOML or fails validation.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Socket address for the HTTP transport.
    #[must_use]
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }

    /// Interval between background ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Build the idle primary roster.
    #[must_use]
    pub fn primary_roster(&self) -> Vec<Agent> {
        self.agents
            .iter()
            .map(|a| Agent::on_shift(a.name.clone(), a.seniority, a.shift))
            .collect()
    }

    /// Build the idle floating overflow roster.
    #[must_use]
    pub fn overflow_roster(&self) -> Vec<Agent> {
        self.overflow_agents
            .iter()
            .map(|a| Agent::floating(a.name.clone(), a.seniority))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(AppError::Config(
                "tick_interval_ms must be greater than zero".into(),
            ));
        }

        if self.inactivity_poll_threshold == 0 {
            return Err(AppError::Config(
                "inactivity_poll_threshold must be greater than zero".into(),
            ));
        }

        let hours = self.office_hours;
        if hours.start_hour >= hours.end_hour || hours.end_hour > 24 {
            return Err(AppError::Config(format!(
                "office_hours window {}..{} is invalid",
                hours.start_hour, hours.end_hour
            )));
        }

        let mut seen = HashSet::new();
        let names = self
            .agents
            .iter()
            .map(|a| a.name.as_str())
            .chain(self.overflow_agents.iter().map(|a| a.name.as_str()));
        for name in names {
            if name.trim().is_empty() {
                return Err(AppError::Config("agent name must not be empty".into()));
            }
            if !seen.insert(name) {
                return Err(AppError::Config(format!("duplicate agent name: {name}")));
            }
        }

        Ok(())
    }
}

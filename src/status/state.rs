//! Connection status state machine.
//!
//! # States
//! - Unknown: no check has completed yet
//! - Checking: a discovery cycle is in flight
//! - Connected / Disconnected: outcome of the last completed cycle
//!
//! # State Transitions
//! ```text
//! Unknown → Checking: first refresh
//! Connected → Checking: manual refresh or timer tick
//! Disconnected → Checking: manual refresh or timer tick
//! Checking → Connected: a candidate passed its health check
//! Checking → Disconnected: every candidate failed
//! ```
//!
//! There is no terminal state; the status stays live for the whole process.

use serde::Serialize;

/// Connection status of the active endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Unknown,
    Checking,
    Connected,
    Disconnected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConnectionState::Unknown => "unknown",
            ConnectionState::Checking => "checking",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
        };
        f.write_str(s)
    }
}

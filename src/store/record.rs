//! The persisted endpoint record.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// The persisted, currently-trusted base URL plus verification metadata.
///
/// Exactly one record is active at a time. Discovery failure flips
/// `reachable` but never erases `base_url`; only an explicit operator
/// action clears the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    /// Selected base URL. `None` means no endpoint has ever been verified;
    /// consumers fall back to same-origin relative paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Unix seconds of the last completed check.
    pub last_verified_at: u64,

    /// Whether the last check reached the backend.
    pub reachable: bool,
}

impl EndpointRecord {
    /// Record for a candidate that just passed its health check.
    pub fn verified(base_url: impl Into<String>, now: u64) -> Self {
        Self {
            base_url: Some(base_url.into()),
            last_verified_at: now,
            reachable: true,
        }
    }

    /// Record for an exhausted cycle, keeping any prior base URL.
    pub fn unreachable(base_url: Option<String>, now: u64) -> Self {
        Self {
            base_url,
            last_verified_at: now,
            reachable: false,
        }
    }
}

/// Seconds since the unix epoch.
pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

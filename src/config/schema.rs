//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for endpoint
//! discovery. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for backend endpoint discovery.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Backend port convention for generated candidates.
    pub backend_port: u16,

    /// Run automatic discovery. When false, only the persisted record and
    /// manual overrides feed the HTTP client.
    pub auto_discover: bool,

    /// Address the frontend itself is served from, if known
    /// (e.g. "http://localhost:5173").
    pub frontend_origin: Option<String>,

    /// Local ports recognized as a dev proxy serving the frontend. A
    /// matching origin port skips discovery in favor of relative URLs.
    pub dev_proxy_ports: Vec<u16>,

    /// Explicit frontend-host to backend-base-URL mappings for hosted
    /// deployments.
    pub production_map: Vec<HostMapping>,

    /// Health probe settings.
    pub probe: ProbeConfig,

    /// Local network address discovery settings.
    pub localnet: LocalNetConfig,

    /// Periodic re-check settings.
    pub refresh: RefreshConfig,

    /// Endpoint record persistence settings.
    pub store: StoreConfig,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            backend_port: 8000,
            auto_discover: true,
            frontend_origin: None,
            dev_proxy_ports: vec![5173],
            production_map: Vec::new(),
            probe: ProbeConfig::default(),
            localnet: LocalNetConfig::default(),
            refresh: RefreshConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

/// One entry of the hosted-deployment allow-list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostMapping {
    /// Frontend hostname to match (exact, case-insensitive).
    pub frontend_host: String,

    /// Backend base URL to use when the frontend host matches.
    pub backend_base_url: String,
}

/// Health probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Hard per-probe timeout in milliseconds. The in-flight request is
    /// aborted at this bound.
    pub timeout_ms: u64,

    /// Path to probe for HTTP health checks.
    pub health_path: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            health_path: "/api/health/".to_string(),
        }
    }
}

/// Local network address discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalNetConfig {
    /// Enable interface enumeration. When false the discoverer yields an
    /// empty list.
    pub enabled: bool,

    /// Ceiling for one discovery pass in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LocalNetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 3000,
        }
    }
}

/// Periodic re-check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Enable the periodic timer. Manual refresh always works regardless.
    pub enabled: bool,

    /// Re-check interval in seconds.
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 300,
        }
    }
}

/// Endpoint record persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Override for the record file path. Defaults to
    /// `<config_dir>/backend-discovery/endpoint.json`.
    pub path: Option<PathBuf>,
}

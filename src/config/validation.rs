//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check production-map entries parse as usable base URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DiscoveryConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::DiscoveryConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("backend_port must not be 0")]
    ZeroBackendPort,

    #[error("probe.timeout_ms must be greater than 0")]
    ZeroProbeTimeout,

    #[error("probe.health_path must start with '/', got {0:?}")]
    BadHealthPath(String),

    #[error("localnet.timeout_ms must be greater than 0")]
    ZeroLocalNetTimeout,

    #[error("refresh.interval_secs must be greater than 0 when refresh is enabled")]
    ZeroRefreshInterval,

    #[error("frontend_origin {0:?} is not a valid URL")]
    BadFrontendOrigin(String),

    #[error("dev_proxy_ports must not contain 0")]
    ZeroDevProxyPort,

    #[error("production_map[{index}].frontend_host must not be empty")]
    EmptyMapHost { index: usize },

    #[error("production_map[{index}].backend_base_url {url:?} is not a usable http(s) base URL")]
    BadMapUrl { index: usize, url: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &DiscoveryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backend_port == 0 {
        errors.push(ValidationError::ZeroBackendPort);
    }
    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }
    if !config.probe.health_path.starts_with('/') {
        errors.push(ValidationError::BadHealthPath(config.probe.health_path.clone()));
    }
    if config.localnet.timeout_ms == 0 {
        errors.push(ValidationError::ZeroLocalNetTimeout);
    }
    if config.refresh.enabled && config.refresh.interval_secs == 0 {
        errors.push(ValidationError::ZeroRefreshInterval);
    }
    if config.dev_proxy_ports.contains(&0) {
        errors.push(ValidationError::ZeroDevProxyPort);
    }

    if let Some(origin) = &config.frontend_origin {
        match Url::parse(origin) {
            Ok(url) if url.host_str().is_some() => {}
            _ => errors.push(ValidationError::BadFrontendOrigin(origin.clone())),
        }
    }

    for (index, mapping) in config.production_map.iter().enumerate() {
        if mapping.frontend_host.trim().is_empty() {
            errors.push(ValidationError::EmptyMapHost { index });
        }
        match Url::parse(&mapping.backend_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {}
            _ => errors.push(ValidationError::BadMapUrl {
                index,
                url: mapping.backend_base_url.clone(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

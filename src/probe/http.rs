//! HTTP health-check prober.
//!
//! # Responsibilities
//! - GET the candidate's health path with a hard timeout
//! - Classify the outcome: 2xx before the deadline is the only success
//! - Never let a failure escape as an error
//!
//! # Design Decisions
//! - Per-request timeout aborts the in-flight request at the bound
//! - Responses are not cached; the probe asks for a fresh answer
//! - Failures log at debug: an unreachable candidate is expected during
//!   discovery, not an application error

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;

use crate::candidates::Candidate;
use crate::config::ProbeConfig;
use crate::probe::prober::{Prober, ProbeResult};

/// Probes candidates with an HTTP GET against the health path.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    health_path: String,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(health_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            health_path: health_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(
            config.health_path.as_str(),
            Duration::from_millis(config.timeout_ms),
        )
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, candidate: &Candidate) -> ProbeResult {
        let url = format!("{}{}", candidate, self.health_path);
        let started = Instant::now();

        let outcome = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .timeout(self.timeout)
            .send()
            .await;

        let latency_ms = started.elapsed().as_millis() as u64;
        let success = match outcome {
            Ok(response) => {
                let ok = response.status().is_success();
                if !ok {
                    tracing::debug!(
                        candidate = %candidate,
                        status = %response.status(),
                        "health check failed: non-success status"
                    );
                }
                ok
            }
            Err(e) if e.is_timeout() => {
                tracing::debug!(candidate = %candidate, "health check failed: timeout");
                false
            }
            Err(e) => {
                tracing::debug!(candidate = %candidate, error = %e, "health check failed: connection error");
                false
            }
        };

        ProbeResult {
            candidate: candidate.clone(),
            success,
            latency_ms,
        }
    }
}

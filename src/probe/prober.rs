//! Reachability probe contract.

use async_trait::async_trait;

use crate::candidates::Candidate;

/// Outcome of probing one candidate. Consumed immediately by the selector.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub candidate: Candidate,
    pub success: bool,
    pub latency_ms: u64,
}

/// A single bounded-time reachability check of one candidate.
///
/// Implementations resolve by their deadline on every path; a timeout, a
/// connection error or a non-2xx status is a `success = false` result,
/// never an error.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, candidate: &Candidate) -> ProbeResult;
}

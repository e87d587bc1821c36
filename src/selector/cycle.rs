//! The discovery cycle.
//!
//! # Responsibilities
//! - Run local-address discovery, then generate and probe candidates
//! - Probe strictly in order, first reachable wins
//! - Write the outcome to the endpoint store
//!
//! # Design Decisions
//! - Probing is sequential, never parallel: candidate order encodes trust,
//!   and racing would select by latency instead of priority
//! - Exhaustion is reported, not retried within the cycle; callers decide
//!   when to run again
//! - A persistence failure is logged and the cycle outcome stands

use crate::candidates::{CandidateGenerator, CandidatePlan, Origin};
use crate::config::DiscoveryConfig;
use crate::localnet::{AddressDiscoverer, DiscoveredAddress};
use crate::probe::Prober;
use crate::store::{now_unix, EndpointRecord, EndpointStore};

/// Outcome of one discovery cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// A reachable backend was selected and stored.
    Connected { base_url: String },
    /// The frontend is behind a dev proxy; API calls stay relative.
    SameOrigin,
    /// Every candidate failed.
    Exhausted,
}

/// One cycle's outcome plus what was learned along the way.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub outcome: DiscoveryOutcome,
    pub discovered: Vec<DiscoveredAddress>,
    pub probed: usize,
}

/// Orchestrates generation and probing for one endpoint selection.
pub struct Selector<P, D> {
    generator: CandidateGenerator,
    prober: P,
    discoverer: D,
    store: EndpointStore,
    origin: Option<Origin>,
}

impl<P: Prober, D: AddressDiscoverer> Selector<P, D> {
    pub fn new(config: &DiscoveryConfig, prober: P, discoverer: D, store: EndpointStore) -> Self {
        let origin = config.frontend_origin.as_deref().and_then(|raw| {
            Origin::parse(raw)
                .map_err(|e| tracing::warn!(origin = raw, error = %e, "ignoring unparseable frontend origin"))
                .ok()
        });

        Self {
            generator: CandidateGenerator::new(config),
            prober,
            discoverer,
            store,
            origin,
        }
    }

    /// Run one full generate-then-probe cycle.
    pub async fn run_cycle(&self) -> CycleReport {
        let saved = self.store.get();
        let discovered = self.discoverer.discover().await;
        let plan = self
            .generator
            .plan(self.origin.as_ref(), saved.as_ref(), &discovered);

        let candidates = match plan {
            CandidatePlan::SameOriginProxy => {
                tracing::info!("frontend served through a dev proxy, keeping relative API base");
                return CycleReport {
                    outcome: DiscoveryOutcome::SameOrigin,
                    discovered,
                    probed: 0,
                };
            }
            CandidatePlan::Probe(candidates) => candidates,
        };

        let mut probed = 0;
        for candidate in candidates {
            probed += 1;
            let result = self.prober.probe(&candidate).await;
            tracing::debug!(
                candidate = %result.candidate,
                success = result.success,
                latency_ms = result.latency_ms,
                "probe finished"
            );

            if result.success {
                let base_url = candidate.as_str().to_string();
                self.write_record(EndpointRecord::verified(&base_url, now_unix()));
                tracing::info!(base_url = %base_url, probed, "backend selected");
                return CycleReport {
                    outcome: DiscoveryOutcome::Connected { base_url },
                    discovered,
                    probed,
                };
            }
        }

        let prior = saved.and_then(|record| record.base_url);
        self.write_record(EndpointRecord::unreachable(prior, now_unix()));
        tracing::warn!(probed, "no backend reachable");
        CycleReport {
            outcome: DiscoveryOutcome::Exhausted,
            discovered,
            probed,
        }
    }

    /// Probe a single candidate without touching the store.
    pub async fn verify(&self, candidate: &crate::candidates::Candidate) -> crate::probe::ProbeResult {
        self.prober.probe(candidate).await
    }

    pub fn store(&self) -> &EndpointStore {
        &self.store
    }

    fn write_record(&self, record: EndpointRecord) {
        if let Err(e) = self.store.set(record) {
            tracing::error!(error = %e, "failed to persist endpoint record");
        }
    }
}

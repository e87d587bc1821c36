//! Candidate ordering policy.
//!
//! # Responsibilities
//! - Produce the ordered candidate list for one discovery cycle
//! - De-duplicate exact scheme+host+port repeats, keeping first occurrence
//! - Short-circuit to relative URLs behind a recognized dev proxy
//!
//! # Design Decisions
//! - Order encodes trust: previously verified endpoint first, then
//!   offline-friendly local candidates, then network-dependent ones
//! - The production mapping is an explicit allow-list, never a hostname
//!   rewrite

use std::collections::HashSet;

use crate::candidates::candidate::Candidate;
use crate::candidates::origin::Origin;
use crate::config::{DiscoveryConfig, HostMapping};
use crate::localnet::DiscoveredAddress;
use crate::store::EndpointRecord;

/// What one discovery cycle should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidatePlan {
    /// The frontend is served through a dev proxy that already forwards
    /// API calls; probing would be meaningless.
    SameOriginProxy,
    /// Probe these candidates in order, first reachable wins.
    Probe(Vec<Candidate>),
}

/// Produces the ordered candidate list for a discovery cycle.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    backend_port: u16,
    dev_proxy_ports: Vec<u16>,
    production_map: Vec<HostMapping>,
}

impl CandidateGenerator {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            backend_port: config.backend_port,
            dev_proxy_ports: config.dev_proxy_ports.clone(),
            production_map: config.production_map.clone(),
        }
    }

    /// Build the plan for one cycle.
    pub fn plan(
        &self,
        origin: Option<&Origin>,
        saved: Option<&EndpointRecord>,
        discovered: &[DiscoveredAddress],
    ) -> CandidatePlan {
        if let Some(origin) = origin {
            if origin.is_dev_proxy(&self.dev_proxy_ports) {
                return CandidatePlan::SameOriginProxy;
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut push = |candidate: Candidate| {
            if seen.insert(candidate.as_str().to_string()) {
                candidates.push(candidate);
            }
        };

        // Fast-path trust: the previously verified endpoint goes first.
        if let Some(base_url) = saved.and_then(|record| record.base_url.as_deref()) {
            match Candidate::parse(base_url) {
                Ok(candidate) => push(candidate),
                Err(e) => {
                    tracing::warn!(base_url, error = %e, "ignoring unparseable saved endpoint");
                }
            }
        }

        for host in ["localhost", "127.0.0.1"] {
            push(self.local_candidate(host));
        }

        for address in discovered {
            match Candidate::parse(&format!("http://{}:{}", address, self.backend_port)) {
                Ok(candidate) => push(candidate),
                Err(e) => {
                    tracing::debug!(address = %address, error = %e, "skipping unusable discovered address");
                }
            }
        }

        if let Some(origin) = origin {
            if let Some(mapping) = self.lookup_mapping(&origin.host) {
                match Candidate::parse(&mapping.backend_base_url) {
                    Ok(candidate) => push(candidate),
                    Err(e) => {
                        tracing::warn!(
                            frontend_host = %mapping.frontend_host,
                            error = %e,
                            "ignoring unparseable production mapping"
                        );
                    }
                }
            }
        }

        CandidatePlan::Probe(candidates)
    }

    fn local_candidate(&self, host: &str) -> Candidate {
        // Constructed from a fixed template; cannot fail to parse.
        Candidate::parse(&format!("http://{}:{}", host, self.backend_port)).unwrap()
    }

    fn lookup_mapping(&self, frontend_host: &str) -> Option<&HostMapping> {
        self.production_map
            .iter()
            .find(|m| m.frontend_host.eq_ignore_ascii_case(frontend_host))
    }
}

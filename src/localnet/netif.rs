//! Interface-enumeration discoverer.
//!
//! # Responsibilities
//! - Enumerate AF_INET interfaces for locally-routable addresses
//! - Enforce the discovery ceiling even if enumeration hangs
//! - Filter loopback and link-local addresses, dedup in order
//!
//! # Design Decisions
//! - Enumeration runs on a blocking thread; the async side only waits up
//!   to the ceiling and then walks away, dropping any late result
//! - Failure of the underlying capability yields an empty list, never an
//!   error

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::LocalNetConfig;
use crate::localnet::discoverer::{AddressDiscoverer, DiscoveredAddress};

/// Discovers local addresses by enumerating network interfaces.
#[derive(Debug, Clone)]
pub struct NetifDiscoverer {
    enabled: bool,
    ceiling: Duration,
}

impl NetifDiscoverer {
    pub fn new(ceiling: Duration) -> Self {
        Self {
            enabled: true,
            ceiling,
        }
    }

    pub fn from_config(config: &LocalNetConfig) -> Self {
        Self {
            enabled: config.enabled,
            ceiling: Duration::from_millis(config.timeout_ms),
        }
    }
}

#[async_trait]
impl AddressDiscoverer for NetifDiscoverer {
    async fn discover(&self) -> Vec<DiscoveredAddress> {
        if !self.enabled {
            return Vec::new();
        }

        let scan = tokio::task::spawn_blocking(collect_host_addresses);
        match tokio::time::timeout(self.ceiling, scan).await {
            Ok(Ok(addresses)) => {
                tracing::debug!(count = addresses.len(), "local interface scan finished");
                addresses
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "interface scan task failed");
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    ceiling_ms = self.ceiling.as_millis() as u64,
                    "interface scan exceeded its ceiling"
                );
                Vec::new()
            }
        }
    }
}

fn collect_host_addresses() -> Vec<DiscoveredAddress> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut addresses = Vec::new();

    match local_ip_address::list_afinet_netifas() {
        Ok(interfaces) => {
            for (_name, ip) in interfaces {
                let IpAddr::V4(v4) = ip else { continue };
                if !usable_v4(v4) {
                    continue;
                }
                let host = v4.to_string();
                if seen.insert(host.clone()) {
                    addresses.push(DiscoveredAddress::new(host));
                }
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "no local interfaces visible");
        }
    }

    addresses
}

/// An address worth advertising as a candidate host.
fn usable_v4(addr: Ipv4Addr) -> bool {
    !addr.is_loopback() && !addr.is_link_local() && !addr.is_broadcast() && !addr.is_unspecified()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_and_link_local_excluded() {
        assert!(!usable_v4(Ipv4Addr::new(127, 0, 0, 1)));
        assert!(!usable_v4(Ipv4Addr::new(169, 254, 10, 1)));
        assert!(!usable_v4(Ipv4Addr::new(0, 0, 0, 0)));
        assert!(!usable_v4(Ipv4Addr::new(255, 255, 255, 255)));
        assert!(usable_v4(Ipv4Addr::new(192, 168, 1, 20)));
        assert!(usable_v4(Ipv4Addr::new(10, 0, 0, 7)));
    }

    #[tokio::test]
    async fn test_disabled_discoverer_is_empty() {
        let discoverer = NetifDiscoverer::from_config(&LocalNetConfig {
            enabled: false,
            timeout_ms: 3000,
        });
        assert!(discoverer.discover().await.is_empty());
    }

    #[tokio::test]
    async fn test_scan_never_yields_loopback() {
        let discoverer = NetifDiscoverer::new(Duration::from_millis(3000));
        let addresses = discoverer.discover().await;
        assert!(addresses.iter().all(|a| a.as_str() != "127.0.0.1"));
    }
}

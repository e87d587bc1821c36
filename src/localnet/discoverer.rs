//! Local-address discovery contract.

use async_trait::async_trait;

/// A bare host believed reachable on the local network segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveredAddress(String);

impl DiscoveredAddress {
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DiscoveredAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Best-effort discovery of locally-routable addresses.
///
/// Implementations must return within their configured ceiling, must not
/// error past this boundary, and must exclude loopback addresses. An empty
/// list is a valid result.
#[async_trait]
pub trait AddressDiscoverer: Send + Sync {
    async fn discover(&self) -> Vec<DiscoveredAddress>;
}

/// Discoverer for runtimes without the capability; always yields nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiscoverer;

#[async_trait]
impl AddressDiscoverer for NoopDiscoverer {
    async fn discover(&self) -> Vec<DiscoveredAddress> {
        Vec::new()
    }
}

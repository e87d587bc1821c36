//! Live connection status over the discovery pipeline.
//!
//! # Responsibilities
//! - Track the connection state across refreshes
//! - Expose a read-only snapshot for UIs
//! - Drive periodic re-checks and the manual-endpoint override
//!
//! # Design Decisions
//! - The reporter never probes without an explicit trigger: a manual
//!   refresh, the optional timer, or a manual endpoint entry
//! - A failed manual entry leaves both the store and the snapshot alone

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time;

use crate::candidates::{Candidate, InvalidEndpoint};
use crate::config::{DiscoveryConfig, RefreshConfig};
use crate::localnet::AddressDiscoverer;
use crate::probe::Prober;
use crate::selector::{DiscoveryOutcome, Selector};
use crate::status::state::ConnectionState;
use crate::store::{now_unix, EndpointRecord, EndpointStore, StoreError};

/// Read-only view of the current endpoint status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub state: ConnectionState,
    /// Active base URL; `None` means same-origin relative paths.
    pub current_endpoint: Option<String>,
    /// Addresses found by the last local-network scan.
    pub discovered_addresses: Vec<String>,
    /// Unix seconds of the last completed check in this process.
    pub last_checked_at: Option<u64>,
}

/// Errors from the manual-endpoint override.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error(transparent)]
    Invalid(#[from] InvalidEndpoint),

    #[error("endpoint {0} failed its health check")]
    Unreachable(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Surfaces endpoint status and drives re-checks.
pub struct StatusReporter<P, D> {
    selector: Selector<P, D>,
    store: EndpointStore,
    snapshot: ArcSwap<StatusSnapshot>,
    refresh: RefreshConfig,
    auto_discover: bool,
}

impl<P: Prober, D: AddressDiscoverer> StatusReporter<P, D> {
    pub fn new(config: &DiscoveryConfig, selector: Selector<P, D>) -> Self {
        let store = selector.store().clone();
        let initial = StatusSnapshot {
            state: ConnectionState::Unknown,
            current_endpoint: non_empty(store.base_url()),
            discovered_addresses: Vec::new(),
            last_checked_at: None,
        };

        Self {
            selector,
            store,
            snapshot: ArcSwap::from_pointee(initial),
            refresh: config.refresh.clone(),
            auto_discover: config.auto_discover,
        }
    }

    /// The current status snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        (**self.snapshot.load()).clone()
    }

    /// Run a full discovery cycle and report the resulting state.
    pub async fn refresh(&self) -> ConnectionState {
        self.set_state(ConnectionState::Checking);

        let report = self.selector.run_cycle().await;
        let state = match report.outcome {
            DiscoveryOutcome::Connected { .. } | DiscoveryOutcome::SameOrigin => {
                ConnectionState::Connected
            }
            DiscoveryOutcome::Exhausted => ConnectionState::Disconnected,
        };

        self.snapshot.store(Arc::new(StatusSnapshot {
            state,
            current_endpoint: non_empty(self.store.base_url()),
            discovered_addresses: report
                .discovered
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
            last_checked_at: Some(now_unix()),
        }));

        state
    }

    /// Startup fast path: adopt a persisted record without probing; run a
    /// full discovery cycle only when none is saved.
    pub async fn ensure_endpoint(&self) -> ConnectionState {
        if let Some(record) = self.store.get() {
            if record.base_url.is_some() {
                let state = if record.reachable {
                    ConnectionState::Connected
                } else {
                    ConnectionState::Disconnected
                };

                let mut snapshot = self.snapshot();
                snapshot.state = state;
                snapshot.current_endpoint = record.base_url.clone();
                snapshot.last_checked_at = Some(record.last_verified_at);
                self.snapshot.store(Arc::new(snapshot));

                tracing::info!(
                    base_url = record.base_url.as_deref().unwrap_or_default(),
                    reachable = record.reachable,
                    "adopted persisted endpoint"
                );
                return state;
            }
        }

        self.refresh().await
    }

    /// Probe an operator-supplied endpoint once; store it only on success.
    pub async fn set_manual_endpoint(&self, raw: &str) -> Result<(), EndpointError> {
        let candidate = Candidate::parse(raw)?;

        let result = self.selector.verify(&candidate).await;
        if !result.success {
            return Err(EndpointError::Unreachable(candidate.to_string()));
        }

        let now = now_unix();
        self.store
            .set(EndpointRecord::verified(candidate.as_str(), now))?;

        let mut snapshot = self.snapshot();
        snapshot.state = ConnectionState::Connected;
        snapshot.current_endpoint = Some(candidate.as_str().to_string());
        snapshot.last_checked_at = Some(now);
        self.snapshot.store(Arc::new(snapshot));

        tracing::info!(base_url = %candidate, "manual endpoint verified and stored");
        Ok(())
    }

    /// Drive periodic re-checks until shutdown. With the timer disabled
    /// this only waits for the shutdown signal; manual refreshes keep
    /// working either way.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        self.ensure_endpoint().await;

        if !self.refresh.enabled || !self.auto_discover {
            tracing::info!("periodic refresh disabled");
            let _ = shutdown.recv().await;
            return;
        }

        tracing::info!(interval_secs = self.refresh.interval_secs, "status reporter starting");
        let mut ticker = time::interval(Duration::from_secs(self.refresh.interval_secs));
        // The interval's immediate first tick is the startup check above.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let state = self.refresh().await;
                    tracing::debug!(state = %state, "periodic check finished");
                }
                _ = shutdown.recv() => {
                    tracing::info!("status reporter received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    fn set_state(&self, state: ConnectionState) {
        let mut snapshot = self.snapshot();
        snapshot.state = state;
        self.snapshot.store(Arc::new(snapshot));
    }
}

fn non_empty(base_url: String) -> Option<String> {
    if base_url.is_empty() {
        None
    } else {
        Some(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::localnet::NoopDiscoverer;
    use crate::probe::ProbeResult;

    #[derive(Clone)]
    struct SwitchProber {
        reachable: Arc<Mutex<HashSet<String>>>,
    }

    impl SwitchProber {
        fn new(reachable: &[&str]) -> Self {
            Self {
                reachable: Arc::new(Mutex::new(
                    reachable.iter().map(|s| s.to_string()).collect(),
                )),
            }
        }

        fn set_reachable(&self, reachable: &[&str]) {
            *self.reachable.lock().unwrap() = reachable.iter().map(|s| s.to_string()).collect();
        }
    }

    #[async_trait]
    impl Prober for SwitchProber {
        async fn probe(&self, candidate: &Candidate) -> ProbeResult {
            ProbeResult {
                candidate: candidate.clone(),
                success: self.reachable.lock().unwrap().contains(candidate.as_str()),
                latency_ms: 1,
            }
        }
    }

    fn reporter(
        prober: &SwitchProber,
        store: EndpointStore,
    ) -> StatusReporter<SwitchProber, NoopDiscoverer> {
        let config = DiscoveryConfig::default();
        let selector = Selector::new(&config, prober.clone(), NoopDiscoverer, store);
        StatusReporter::new(&config, selector)
    }

    fn store_in(dir: &tempfile::TempDir) -> EndpointStore {
        EndpointStore::open(dir.path().join("endpoint.json"))
    }

    #[tokio::test]
    async fn test_initial_state_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let prober = SwitchProber::new(&[]);
        let reporter = reporter(&prober, store_in(&dir));

        let snapshot = reporter.snapshot();
        assert_eq!(snapshot.state, ConnectionState::Unknown);
        assert_eq!(snapshot.current_endpoint, None);
        assert_eq!(snapshot.last_checked_at, None);
    }

    #[tokio::test]
    async fn test_refresh_connects_and_disconnects() {
        let dir = tempfile::tempdir().unwrap();
        let prober = SwitchProber::new(&["http://localhost:8000"]);
        let reporter = reporter(&prober, store_in(&dir));

        assert_eq!(reporter.refresh().await, ConnectionState::Connected);
        let snapshot = reporter.snapshot();
        assert_eq!(snapshot.current_endpoint.as_deref(), Some("http://localhost:8000"));
        assert!(snapshot.last_checked_at.is_some());

        prober.set_reachable(&[]);
        assert_eq!(reporter.refresh().await, ConnectionState::Disconnected);
        // The endpoint survives the outage; only the state flips.
        let snapshot = reporter.snapshot();
        assert_eq!(snapshot.state, ConnectionState::Disconnected);
        assert_eq!(snapshot.current_endpoint.as_deref(), Some("http://localhost:8000"));

        prober.set_reachable(&["http://localhost:8000"]);
        assert_eq!(reporter.refresh().await, ConnectionState::Connected);
    }

    #[tokio::test]
    async fn test_ensure_trusts_persisted_record_without_probing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .set(EndpointRecord::verified("http://192.168.1.5:8000", 1700000000))
            .unwrap();

        // Nothing is reachable; a probe would report Disconnected.
        let prober = SwitchProber::new(&[]);
        let reporter = reporter(&prober, store.clone());

        assert_eq!(reporter.ensure_endpoint().await, ConnectionState::Connected);
        let snapshot = reporter.snapshot();
        assert_eq!(snapshot.current_endpoint.as_deref(), Some("http://192.168.1.5:8000"));
        assert_eq!(snapshot.last_checked_at, Some(1700000000));
    }

    #[tokio::test]
    async fn test_ensure_discovers_when_nothing_saved() {
        let dir = tempfile::tempdir().unwrap();
        let prober = SwitchProber::new(&["http://localhost:8000"]);
        let reporter = reporter(&prober, store_in(&dir));

        assert_eq!(reporter.ensure_endpoint().await, ConnectionState::Connected);
        assert_eq!(
            reporter.snapshot().current_endpoint.as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[tokio::test]
    async fn test_manual_endpoint_rejected_before_probe() {
        let dir = tempfile::tempdir().unwrap();
        let prober = SwitchProber::new(&[]);
        let store = store_in(&dir);
        let reporter = reporter(&prober, store.clone());

        let err = reporter.set_manual_endpoint("not a url").await.unwrap_err();
        assert!(matches!(err, EndpointError::Invalid(_)));
        assert_eq!(store.get(), None);
        assert_eq!(reporter.snapshot().state, ConnectionState::Unknown);
    }

    #[tokio::test]
    async fn test_manual_endpoint_unreachable_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let prober = SwitchProber::new(&[]);
        let store = store_in(&dir);
        let reporter = reporter(&prober, store.clone());

        let err = reporter
            .set_manual_endpoint("http://192.168.1.40:8000")
            .await
            .unwrap_err();
        assert!(matches!(err, EndpointError::Unreachable(_)));
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn test_manual_endpoint_stored_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let prober = SwitchProber::new(&["http://192.168.1.40:9000"]);
        let store = store_in(&dir);
        let reporter = reporter(&prober, store.clone());

        reporter
            .set_manual_endpoint("http://192.168.1.40:9000/")
            .await
            .unwrap();

        let record = store.get().unwrap();
        assert_eq!(record.base_url.as_deref(), Some("http://192.168.1.40:9000"));
        assert!(record.reachable);

        let snapshot = reporter.snapshot();
        assert_eq!(snapshot.state, ConnectionState::Connected);
        assert_eq!(snapshot.current_endpoint.as_deref(), Some("http://192.168.1.40:9000"));
    }
}

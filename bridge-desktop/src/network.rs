//! Network Monitoring Implementation

use bridge_traits::network::{NetworkInfo, NetworkMonitor, NetworkStatus, NetworkType};
use core_async::time::{timeout, Duration, Instant};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Public DNS resolver used as the default reachability probe.
pub const DEFAULT_PROBE_TARGET: &str = "8.8.8.8:53";
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

struct ProbeState {
    info: NetworkInfo,
    last_probe: Option<Instant>,
    probing: bool,
}

/// Desktop network monitor implementation
///
/// Answers `network_info` from a cached result and refreshes that result in
/// the background with a TCP connect probe once it is older than the refresh
/// interval. Until the first probe completes the monitor reports connected;
/// an optimistic guess only costs one failed request, which the core already
/// recovers from.
///
/// Note: Platform-specific implementations (Linux netlink, macOS
/// SystemConfiguration, Windows Network List Manager) would be more accurate
/// but require additional dependencies.
pub struct DesktopNetworkMonitor {
    state: Arc<Mutex<ProbeState>>,
    probe_target: String,
    refresh_interval: Duration,
}

impl DesktopNetworkMonitor {
    /// Create a new network monitor
    pub fn new() -> Self {
        Self::with_probe(DEFAULT_PROBE_TARGET, DEFAULT_REFRESH_INTERVAL)
    }

    /// Create a monitor probing `target` (`host:port`) every `refresh_interval`
    pub fn with_probe(target: impl Into<String>, refresh_interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ProbeState {
                info: NetworkInfo::connected(NetworkType::Other),
                last_probe: None,
                probing: false,
            })),
            probe_target: target.into(),
            refresh_interval,
        }
    }

    /// Probe connectivity now and update the cached state.
    pub async fn refresh(&self) -> NetworkInfo {
        Self::probe_and_store(Arc::clone(&self.state), self.probe_target.clone()).await
    }

    fn lock(state: &Mutex<ProbeState>) -> MutexGuard<'_, ProbeState> {
        state.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn check_connectivity(target: &str) -> NetworkStatus {
        match timeout(PROBE_TIMEOUT, tokio::net::TcpStream::connect(target)).await {
            Ok(Ok(_)) => NetworkStatus::Connected,
            Ok(Err(_)) | Err(_) => NetworkStatus::Disconnected,
        }
    }

    async fn probe_and_store(state: Arc<Mutex<ProbeState>>, target: String) -> NetworkInfo {
        let status = Self::check_connectivity(&target).await;
        let info = match status {
            // Desktop cannot tell WiFi from Ethernet without platform APIs.
            NetworkStatus::Connected => NetworkInfo::connected(NetworkType::Other),
            _ => NetworkInfo::disconnected(),
        };

        let mut guard = Self::lock(&state);
        guard.info = info.clone();
        guard.last_probe = Some(Instant::now());
        guard.probing = false;
        debug!(status = ?status, target = %target, "Network info updated");

        info
    }

    fn is_stale(&self, state: &ProbeState) -> bool {
        state
            .last_probe
            .map_or(true, |at| at.elapsed() >= self.refresh_interval)
    }
}

impl Default for DesktopNetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkMonitor for DesktopNetworkMonitor {
    fn network_info(&self) -> NetworkInfo {
        let mut guard = Self::lock(&self.state);
        let cached = guard.info.clone();

        if !guard.probing && self.is_stale(&guard) && core_async::runtime::in_runtime() {
            guard.probing = true;
            drop(guard);

            let state = Arc::clone(&self.state);
            let target = self.probe_target.clone();
            core_async::task::spawn(async move {
                Self::probe_and_store(state, target).await;
            });
        }

        cached
    }
}

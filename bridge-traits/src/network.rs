//! Network Monitoring Abstraction
//!
//! Provides network connectivity and status information. The query is
//! synchronous: implementations answer from state they already hold (an OS
//! callback, a background probe) and never block on I/O.

use std::sync::RwLock;

/// Network connection type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkType {
    /// Cellular/mobile data connection
    Cellular,
    /// WiFi connection
    WiFi,
    /// Ethernet connection
    Ethernet,
    /// Other or unknown connection type
    Other,
}

/// Network connection status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    /// Connected to network
    Connected,
    /// Not connected to any network
    Disconnected,
    /// Connection status unknown or indeterminate
    Indeterminate,
}

/// Network information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub status: NetworkStatus,
    pub network_type: Option<NetworkType>,
    /// Whether the connection is metered (has data limits/costs)
    pub is_metered: bool,
}

impl NetworkInfo {
    pub fn connected(network_type: NetworkType) -> Self {
        Self {
            status: NetworkStatus::Connected,
            network_type: Some(network_type),
            is_metered: matches!(network_type, NetworkType::Cellular),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            status: NetworkStatus::Disconnected,
            network_type: None,
            is_metered: false,
        }
    }
}

/// Network monitor trait
///
/// The core consults this before deciding between the remote catalog and the
/// local cache.
///
/// # Platform Support
///
/// - **Desktop**: background TCP probe (`bridge-desktop`)
/// - **iOS**: NWPathMonitor pushing into [`HostNetworkMonitor`]
/// - **Android**: ConnectivityManager callback pushing into [`HostNetworkMonitor`]
///
/// # Example
///
/// ```ignore
/// use bridge_traits::network::NetworkMonitor;
///
/// fn pick_source(monitor: &dyn NetworkMonitor) -> &'static str {
///     if monitor.is_online() { "remote" } else { "cache" }
/// }
/// ```
pub trait NetworkMonitor: Send + Sync {
    /// Get current network information
    fn network_info(&self) -> NetworkInfo;

    /// Check if currently connected to any network
    fn is_online(&self) -> bool {
        self.network_info().status == NetworkStatus::Connected
    }

    /// Check if connected via WiFi
    fn is_wifi(&self) -> bool {
        matches!(
            self.network_info(),
            NetworkInfo {
                status: NetworkStatus::Connected,
                network_type: Some(NetworkType::WiFi),
                ..
            }
        )
    }

    /// Check if connection is metered
    fn is_metered(&self) -> bool {
        self.network_info().is_metered
    }
}

/// Network monitor whose state is pushed by the host.
///
/// Mobile hosts register an OS connectivity callback and forward every change
/// through [`HostNetworkMonitor::update`]. The `Default` instance starts out
/// connected.
#[derive(Debug)]
pub struct HostNetworkMonitor {
    info: RwLock<NetworkInfo>,
}

impl HostNetworkMonitor {
    pub fn new(initial: NetworkInfo) -> Self {
        Self {
            info: RwLock::new(initial),
        }
    }

    pub fn online() -> Self {
        Self::new(NetworkInfo::connected(NetworkType::Other))
    }

    pub fn offline() -> Self {
        Self::new(NetworkInfo::disconnected())
    }

    /// Replace the current network information.
    pub fn update(&self, info: NetworkInfo) {
        // A poisoned lock still holds a valid NetworkInfo.
        let mut guard = self.info.write().unwrap_or_else(|e| e.into_inner());
        *guard = info;
    }

    /// Shorthand for hosts that only know online/offline.
    pub fn set_online(&self, online: bool) {
        self.update(if online {
            NetworkInfo::connected(NetworkType::Other)
        } else {
            NetworkInfo::disconnected()
        });
    }
}

impl Default for HostNetworkMonitor {
    fn default() -> Self {
        Self::online()
    }
}

impl NetworkMonitor for HostNetworkMonitor {
    fn network_info(&self) -> NetworkInfo {
        self.info.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_info() {
        let info = NetworkInfo::connected(NetworkType::WiFi);

        assert_eq!(info.status, NetworkStatus::Connected);
        assert_eq!(info.network_type, Some(NetworkType::WiFi));
        assert!(!info.is_metered);

        assert!(NetworkInfo::connected(NetworkType::Cellular).is_metered);
    }

    #[test]
    fn test_host_monitor_updates() {
        let monitor = HostNetworkMonitor::default();
        assert!(monitor.is_online());

        monitor.set_online(false);
        assert!(!monitor.is_online());
        assert_eq!(monitor.network_info(), NetworkInfo::disconnected());

        monitor.update(NetworkInfo::connected(NetworkType::WiFi));
        assert!(monitor.is_online());
        assert!(monitor.is_wifi());
        assert!(!monitor.is_metered());
    }

    #[test]
    fn test_indeterminate_is_not_online() {
        let monitor = HostNetworkMonitor::new(NetworkInfo {
            status: NetworkStatus::Indeterminate,
            network_type: None,
            is_metered: false,
        });
        assert!(!monitor.is_online());
    }
}

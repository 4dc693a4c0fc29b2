//! # Core Configuration Module
//!
//! Configuration for the catalog cache core.
//!
//! ## Overview
//!
//! A builder produces a [`CatalogConfig`] holding the database location, the
//! search API parameters and the two bridges the core cannot run without
//! (`HttpClient`, `NetworkMonitor`). Validation is fail-fast: a config that
//! builds is a config the core can start with.
//!
//! When the `desktop-shims` feature is enabled, desktop defaults for both
//! bridges are injected if the host does not provide them. Without the
//! feature a missing bridge is a [`Error::CapabilityMissing`].
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{CatalogConfig, SearchApiConfig};
//! use std::sync::Arc;
//!
//! let config = CatalogConfig::builder()
//!     .database_path("/data/user/0/app/databases/catalog.db")
//!     .search_api(SearchApiConfig::default().with_term("star").with_country("au"))
//!     .http_client(Arc::new(OkHttpBridge::new()))
//!     .network_monitor(Arc::new(HostNetworkMonitor::online()))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, NetworkMonitor};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default catalog host.
pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Upper bound the iTunes Search API accepts for `limit`.
pub const MAX_SEARCH_LIMIT: u32 = 200;

/// How often the default desktop network monitor re-probes connectivity.
pub const DEFAULT_CONNECTIVITY_REFRESH: Duration = Duration::from_secs(15);

/// Parameters of the remote catalog search.
///
/// The defaults reproduce the one query the app ships with:
/// `https://itunes.apple.com/search?term=star&country=au&media=movie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchApiConfig {
    /// Scheme and host of the catalog API, without a trailing slash
    pub base_url: String,
    /// Search term
    pub term: String,
    /// Two-letter store country code
    pub country: String,
    /// Media type (`movie`, `music`, `podcast`, ...)
    pub media: String,
    /// Optional entity filter within the media type
    pub entity: Option<String>,
    /// Optional result limit (1..=200)
    pub limit: Option<u32>,
    /// User agent sent with every request
    pub user_agent: String,
    /// Per-request timeout handed to the transport
    pub request_timeout: Duration,
}

impl Default for SearchApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            term: "star".to_string(),
            country: "au".to_string(),
            media: "movie".to_string(),
            entity: None,
            limit: None,
            user_agent: concat!("CatalogCacheCore/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SearchApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validates the search parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(Error::Config(format!(
                "Search API base URL must be http(s), got '{}'",
                self.base_url
            )));
        }

        if self.term.trim().is_empty() {
            return Err(Error::Config("Search term cannot be empty".to_string()));
        }

        if self.country.trim().is_empty() || self.media.trim().is_empty() {
            return Err(Error::Config(
                "Search country and media cannot be empty".to_string(),
            ));
        }

        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_SEARCH_LIMIT {
                return Err(Error::Config(format!(
                    "Search limit must be between 1 and {}, got {}",
                    MAX_SEARCH_LIMIT, limit
                )));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Catalog core configuration.
///
/// Use [`CatalogConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Path to the SQLite cache database
    pub database_path: PathBuf,

    /// Remote search parameters
    pub search_api: SearchApiConfig,

    /// HTTP transport used by the remote source
    pub http_client: Arc<dyn HttpClient>,

    /// Connectivity gate consulted before every remote fetch
    pub network_monitor: Arc<dyn NetworkMonitor>,

    /// Re-probe interval for the default desktop network monitor
    pub connectivity_refresh: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("database_path", &self.database_path)
            .field("search_api", &self.search_api)
            .field("http_client", &"HttpClient { ... }")
            .field("network_monitor", &"NetworkMonitor { ... }")
            .field("connectivity_refresh", &self.connectivity_refresh)
            .finish()
    }
}

impl CatalogConfig {
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        if self.connectivity_refresh.is_zero() {
            return Err(Error::Config(
                "Connectivity refresh interval must be greater than zero".to_string(),
            ));
        }

        self.search_api.validate()
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(search_api: &SearchApiConfig) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_timeout(search_api.request_timeout)
        .map_err(|e| Error::Internal(format!("Failed to create default HttpClient: {}", e)))?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_search_api: &SearchApiConfig) -> Result<Arc<dyn HttpClient>> {
    Err(Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                  Desktop: enable the 'desktop-shims' feature. \
                  Mobile: inject the platform-native adapter (OkHttp/URLSession)."
            .to_string(),
    })
}

#[cfg(feature = "desktop-shims")]
fn provide_default_network_monitor(refresh: Duration) -> Result<Arc<dyn NetworkMonitor>> {
    use bridge_desktop::DesktopNetworkMonitor;

    Ok(Arc::new(DesktopNetworkMonitor::with_probe(
        bridge_desktop::DEFAULT_PROBE_TARGET,
        refresh,
    )))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_network_monitor(_refresh: Duration) -> Result<Arc<dyn NetworkMonitor>> {
    Err(Error::CapabilityMissing {
        capability: "NetworkMonitor".to_string(),
        message: "No network monitor provided. \
                  Desktop: enable the 'desktop-shims' feature. \
                  Mobile: forward OS connectivity callbacks into a HostNetworkMonitor."
            .to_string(),
    })
}

/// Builder for constructing [`CatalogConfig`] instances.
#[derive(Default)]
pub struct CatalogConfigBuilder {
    database_path: Option<PathBuf>,
    search_api: Option<SearchApiConfig>,
    http_client: Option<Arc<dyn HttpClient>>,
    network_monitor: Option<Arc<dyn NetworkMonitor>>,
    connectivity_refresh: Option<Duration>,
}

impl CatalogConfigBuilder {
    /// Sets the path of the SQLite cache database (required).
    pub fn database_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Sets the remote search parameters. Defaults to [`SearchApiConfig::default`].
    pub fn search_api(mut self, config: SearchApiConfig) -> Self {
        self.search_api = Some(config);
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the reqwest-based desktop client is used when the
    /// `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the network monitor implementation.
    ///
    /// If not provided, the probing desktop monitor is used when the
    /// `desktop-shims` feature is enabled.
    pub fn network_monitor(mut self, monitor: Arc<dyn NetworkMonitor>) -> Self {
        self.network_monitor = Some(monitor);
        self
    }

    /// Sets how often the default desktop network monitor re-probes.
    ///
    /// Ignored when a network monitor is injected.
    pub fn connectivity_refresh(mut self, interval: Duration) -> Self {
        self.connectivity_refresh = Some(interval);
        self
    }

    /// Builds the configuration, injecting defaults and validating.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the database path is missing or a value is invalid
    /// - [`Error::CapabilityMissing`] if a bridge is missing and no default exists
    pub fn build(self) -> Result<CatalogConfig> {
        let database_path = self.database_path.ok_or_else(|| {
            Error::Config("Database path is required. Use .database_path() to set it.".to_string())
        })?;

        let search_api = self.search_api.unwrap_or_default();
        search_api.validate()?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(&search_api)?,
        };

        let connectivity_refresh = self
            .connectivity_refresh
            .unwrap_or(DEFAULT_CONNECTIVITY_REFRESH);
        if connectivity_refresh.is_zero() {
            return Err(Error::Config(
                "Connectivity refresh interval must be greater than zero".to_string(),
            ));
        }

        let network_monitor = match self.network_monitor {
            Some(monitor) => monitor,
            None => provide_default_network_monitor(connectivity_refresh)?,
        };

        let config = CatalogConfig {
            database_path,
            search_api,
            http_client,
            network_monitor,
            connectivity_refresh,
        };

        config.validate()?;

        Ok(config)
    }
}

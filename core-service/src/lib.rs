//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridges (HTTP, connectivity) and the SQLite
//! track cache into a [`TrackCatalogRepository`]. Desktop apps and tests
//! typically enable the `desktop-shims` feature, which lets
//! [`CatalogService::bootstrap`] fill in the reqwest client and the probing
//! network monitor; mobile hosts inject their own adapters through
//! [`CatalogConfig`].
//!
//! ```ignore
//! use core_service::CatalogRegistry;
//! use core_runtime::config::CatalogConfig;
//!
//! let config = CatalogConfig::builder().database_path("catalog.db").build()?;
//! let service = CatalogRegistry::global().initialize_from_config(config).await?;
//! let tracks = service.track_list().wait().await;
//!
//! // Anywhere else in the host, after startup:
//! let details = CatalogRegistry::global().get().track_details_by_id("1440857781")?;
//! ```

pub mod error;
pub mod registry;

pub use error::{CoreError, Result};
pub use registry::CatalogRegistry;

use std::sync::Arc;

use bridge_traits::NetworkMonitor;
use core_catalog::{
    create_pool, DatabaseConfig, ItunesClient, Observable, SqliteTrackStore, Track,
    TrackCatalogRepository, TrackMinimal, TrackSource, TrackStore,
};
use core_runtime::config::CatalogConfig;
use core_runtime::logging::strip_path;
use tracing::info;

/// Aggregated handle to the collaborators the catalog repository requires.
pub struct CatalogDependencies {
    pub network_monitor: Arc<dyn NetworkMonitor>,
    pub track_source: Arc<dyn TrackSource>,
    pub track_store: Arc<dyn TrackStore>,
}

impl CatalogDependencies {
    /// Construct a dependency bundle from explicit handles.
    pub fn new(
        network_monitor: Arc<dyn NetworkMonitor>,
        track_source: Arc<dyn TrackSource>,
        track_store: Arc<dyn TrackStore>,
    ) -> Self {
        Self {
            network_monitor,
            track_source,
            track_store,
        }
    }

    /// Open the cache database and build the iTunes client from `config`.
    pub async fn from_config(config: &CatalogConfig) -> Result<Self> {
        let pool = create_pool(DatabaseConfig::new(&config.database_path)).await?;

        let track_source = ItunesClient::new(
            Arc::clone(&config.http_client),
            config.search_api.clone(),
        );

        Ok(Self::new(
            Arc::clone(&config.network_monitor),
            Arc::new(track_source),
            Arc::new(SqliteTrackStore::new(pool)),
        ))
    }
}

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<TrackCatalogRepository>,
    deps: Arc<CatalogDependencies>,
}

impl CatalogService {
    /// Create a new service from the provided dependencies.
    ///
    /// Starts the cache writer, so this must run inside a runtime.
    pub fn new(deps: CatalogDependencies) -> Self {
        let repository = TrackCatalogRepository::new(
            Arc::clone(&deps.network_monitor),
            Arc::clone(&deps.track_source),
            Arc::clone(&deps.track_store),
        );

        Self {
            repository: Arc::new(repository),
            deps: Arc::new(deps),
        }
    }

    /// Build every collaborator described by `config` and wire the service.
    pub async fn bootstrap(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let deps = CatalogDependencies::from_config(&config).await?;
        info!(
            database = %strip_path(&config.database_path.to_string_lossy()),
            base_url = %config.search_api.base_url,
            "Catalog service bootstrapped"
        );

        Ok(Self::new(deps))
    }

    /// Bootstrap with desktop bridges and default search parameters.
    #[cfg(feature = "desktop-shims")]
    pub async fn bootstrap_desktop(
        database_path: impl Into<std::path::PathBuf>,
    ) -> Result<Self> {
        let config = CatalogConfig::builder()
            .database_path(database_path)
            .build()?;
        Self::bootstrap(config).await
    }

    /// The shared repository instance.
    pub fn repository(&self) -> Arc<TrackCatalogRepository> {
        Arc::clone(&self.repository)
    }

    /// Access the collaborators being used by the service.
    pub fn dependencies(&self) -> Arc<CatalogDependencies> {
        Arc::clone(&self.deps)
    }

    /// See [`TrackCatalogRepository::track_list`].
    pub fn track_list(&self) -> Observable<Vec<TrackMinimal>> {
        self.repository.track_list()
    }

    /// See [`TrackCatalogRepository::track_details_by_id`].
    pub fn track_details_by_id(&self, id: &str) -> Result<Observable<Option<Track>>> {
        Ok(self.repository.track_details_by_id(id)?)
    }
}

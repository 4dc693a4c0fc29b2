//! Process-wide holder for the catalog service.
//!
//! Hosts that cannot thread a [`CatalogService`] through their own DI
//! initialise it once at startup and fetch it from anywhere afterwards. The
//! first initialisation wins: later calls return the original service and
//! their collaborators are dropped unused.

use crate::{CatalogDependencies, CatalogService, Result};
use core_runtime::config::CatalogConfig;
use std::sync::OnceLock;
use tracing::debug;

/// Once-only holder for a [`CatalogService`].
pub struct CatalogRegistry {
    service: OnceLock<CatalogService>,
}

static GLOBAL: CatalogRegistry = CatalogRegistry::new();

impl CatalogRegistry {
    pub const fn new() -> Self {
        Self {
            service: OnceLock::new(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static CatalogRegistry {
        &GLOBAL
    }

    /// Build the service from `deps` unless one already exists, and return
    /// the registered service.
    ///
    /// Must be called inside a runtime the first time.
    pub fn initialize(&self, deps: CatalogDependencies) -> CatalogService {
        if let Some(existing) = self.service.get() {
            debug!("Catalog service already initialised; ignoring new dependencies");
            return existing.clone();
        }

        self.service
            .get_or_init(|| CatalogService::new(deps))
            .clone()
    }

    /// Bootstrap from `config` unless a service already exists, and return
    /// the registered service.
    ///
    /// When two callers race, both bootstraps may run; only the first one to
    /// register is kept.
    pub async fn initialize_from_config(&self, config: CatalogConfig) -> Result<CatalogService> {
        if let Some(existing) = self.service.get() {
            debug!("Catalog service already initialised; ignoring new configuration");
            return Ok(existing.clone());
        }

        let service = CatalogService::bootstrap(config).await?;
        Ok(self.service.get_or_init(|| service).clone())
    }

    /// The registered service.
    ///
    /// # Panics
    ///
    /// Panics if called before [`initialize`](Self::initialize). Reaching for
    /// the catalog before startup wiring ran is a programming error.
    pub fn get(&self) -> CatalogService {
        match self.service.get() {
            Some(service) => service.clone(),
            None => panic!("CatalogRegistry::get called before initialize"),
        }
    }

    /// The registered service, if any.
    pub fn try_get(&self) -> Option<CatalogService> {
        self.service.get().cloned()
    }

    /// Whether a service has been registered.
    pub fn is_initialized(&self) -> bool {
        self.service.get().is_some()
    }
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

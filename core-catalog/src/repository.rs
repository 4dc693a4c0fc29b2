//! # Track Catalog Repository
//!
//! Decides where the track list comes from.
//!
//! - **Offline**: the cached list, live, straight from the store.
//! - **Online**: one remote request. Non-empty results are published
//!   projected to [`TrackMinimal`] and queued to replace the cache. Any failure
//!   (transport, status, unreadable or empty body) publishes a snapshot of
//!   the cache instead.
//!
//! Details are served from the cache only.

use crate::cache_writer::CacheWriter;
use crate::error::{CatalogError, Result};
use crate::models::{Track, TrackMinimal};
use crate::observable::{Observable, Publisher};
use crate::remote::TrackSource;
use crate::repositories::TrackStore;
use bridge_traits::NetworkMonitor;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Orchestrates remote fetches, cache fallback and cache refresh.
pub struct TrackCatalogRepository {
    network: Arc<dyn NetworkMonitor>,
    remote: Arc<dyn TrackSource>,
    store: Arc<dyn TrackStore>,
    cache_writer: CacheWriter,
}

impl TrackCatalogRepository {
    /// Create the repository and start its cache writer.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a runtime context.
    pub fn new(
        network: Arc<dyn NetworkMonitor>,
        remote: Arc<dyn TrackSource>,
        store: Arc<dyn TrackStore>,
    ) -> Self {
        let cache_writer = CacheWriter::spawn(Arc::clone(&store));

        Self {
            network,
            remote,
            store,
            cache_writer,
        }
    }

    /// Track list for the list screen.
    ///
    /// Returns immediately. When offline the observable is the store's live
    /// query; when online it is filled once by the background fetch. If both
    /// the fetch and the cache read fail it is closed without a value.
    pub fn track_list(&self) -> Observable<Vec<TrackMinimal>> {
        if !self.network.is_online() {
            debug!("Offline; serving track list from cache");
            return self.store.observe_minimal_tracks();
        }

        let (publisher, observable) = Observable::pending();
        let remote = Arc::clone(&self.remote);
        let store = Arc::clone(&self.store);
        let cache_writer = self.cache_writer.clone();

        core_async::task::spawn(async move {
            match remote.fetch_tracks().await.map(dedupe_by_id) {
                Ok(tracks) if !tracks.is_empty() => {
                    let minimal: Vec<TrackMinimal> =
                        tracks.iter().map(TrackMinimal::from).collect();
                    info!(count = minimal.len(), "Serving track list from remote");

                    publisher.resolve(minimal);
                    cache_writer.replace_all(tracks);
                }
                Ok(_) => {
                    warn!("Remote catalog returned no tracks; falling back to cache");
                    resolve_from_cache(store.as_ref(), publisher).await;
                }
                Err(e) => {
                    warn!(error = %e, "Remote fetch failed; falling back to cache");
                    resolve_from_cache(store.as_ref(), publisher).await;
                }
            }
        });

        observable
    }

    /// Cached details for one track; `None` once resolved means not cached.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidInput`] for an empty id.
    pub fn track_details_by_id(&self, id: &str) -> Result<Observable<Option<Track>>> {
        if id.trim().is_empty() {
            return Err(CatalogError::InvalidInput {
                field: "id".to_string(),
                message: "Track id cannot be empty".to_string(),
            });
        }

        Ok(self.store.observe_track(id))
    }
}

/// Drop repeated ids, keeping the first occurrence, so the published list
/// matches what the cache ends up holding.
fn dedupe_by_id(tracks: Vec<Track>) -> Vec<Track> {
    let mut seen = HashSet::with_capacity(tracks.len());
    let before = tracks.len();
    let unique: Vec<Track> = tracks
        .into_iter()
        .filter(|track| seen.insert(track.id.clone()))
        .collect();

    if unique.len() < before {
        warn!(dropped = before - unique.len(), "Remote track list had duplicate ids");
    }
    unique
}

async fn resolve_from_cache(store: &dyn TrackStore, publisher: Publisher<Vec<TrackMinimal>>) {
    match store.minimal_tracks().await {
        Ok(cached) => {
            info!(count = cached.len(), "Serving track list from cache");
            publisher.resolve(cached);
        }
        Err(e) => {
            error!(error = %e, "Cache fallback failed; track list left unresolved");
        }
    }
}

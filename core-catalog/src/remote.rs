//! iTunes Search API client
//!
//! Fetches the catalog track list from the iTunes Search API.
//!
//! ## API Endpoint
//!
//! - **Search**: `{base_url}/search?term={term}&country={country}&media={media}[&entity=..][&limit=..]`
//!
//! The response is `{ "resultCount": n, "results": [...] }`. Each result is
//! either a track or a collection; collection-level fields fill in whatever
//! the track-level ones leave empty.
//!
//! ## Usage
//!
//! ```ignore
//! use core_catalog::remote::{ItunesClient, TrackSource};
//! use core_runtime::config::SearchApiConfig;
//!
//! let client = ItunesClient::new(http_client, SearchApiConfig::default());
//! let tracks = client.fetch_tracks().await?;
//! ```

use crate::error::{CatalogError, Result};
use crate::models::Track;
use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use core_runtime::config::SearchApiConfig;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Source of the remote track list.
#[async_trait]
pub trait TrackSource: Send + Sync {
    /// Fetch the current track list with a single request.
    ///
    /// Ids are expected to be unique; callers keep the first of any repeats.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Network`] on transport failure or timeout
    /// - [`CatalogError::HttpStatus`] on a non-2xx response
    /// - [`CatalogError::EmptyResponse`] / [`CatalogError::JsonParse`] on a
    ///   body that cannot be read as a search response
    async fn fetch_tracks(&self) -> Result<Vec<Track>>;
}

/// iTunes search response wrapper
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    result_count: Option<u32>,
    results: Vec<RemoteTrack>,
}

/// One search result as the API returns it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RemoteTrack {
    track_id: Option<i64>,
    collection_id: Option<i64>,
    track_name: Option<String>,
    collection_name: Option<String>,
    artist_name: Option<String>,
    artwork_url100: Option<String>,
    primary_genre_name: Option<String>,
    track_price: Option<f64>,
    collection_price: Option<f64>,
    currency: Option<String>,
    kind: Option<String>,
    long_description: Option<String>,
    short_description: Option<String>,
    release_date: Option<String>,
    preview_url: Option<String>,
    track_view_url: Option<String>,
}

impl RemoteTrack {
    /// Results without any id cannot be cached and are skipped.
    fn into_track(self) -> Option<Track> {
        let id = self.track_id.or(self.collection_id)?;

        Some(Track {
            id: id.to_string(),
            name: self
                .track_name
                .or_else(|| self.collection_name.clone())
                .unwrap_or_default(),
            album: self.collection_name,
            artwork: self.artwork_url100,
            genre: self.primary_genre_name,
            price: self.track_price.or(self.collection_price),
            artist: self.artist_name,
            kind: self.kind,
            currency: self.currency,
            description: self.long_description.or(self.short_description),
            release_date: self.release_date,
            preview_url: self.preview_url,
            track_view_url: self.track_view_url,
        })
    }
}

/// Parse a search response body into tracks.
///
/// Results without an id are dropped, and a repeated id keeps its first
/// occurrence so the list matches what the cache will hold.
pub fn parse_search_response(body: &[u8]) -> Result<Vec<Track>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CatalogError::EmptyResponse);
    }

    let response: SearchResponse = serde_json::from_slice(body)
        .map_err(|e| CatalogError::JsonParse(format!("Invalid search response: {}", e)))?;

    let reported = response.result_count;
    let received = response.results.len();

    let mut seen = HashSet::with_capacity(received);
    let tracks: Vec<Track> = response
        .results
        .into_iter()
        .filter_map(RemoteTrack::into_track)
        .filter(|track| seen.insert(track.id.clone()))
        .collect();

    if tracks.len() != received {
        debug!(
            received,
            kept = tracks.len(),
            "Dropped search results without a usable id"
        );
    }
    if let Some(reported) = reported {
        if reported as usize != received {
            debug!(reported, received, "Result count differs from results");
        }
    }

    Ok(tracks)
}

/// iTunes Search API client
pub struct ItunesClient {
    http_client: Arc<dyn HttpClient>,
    config: SearchApiConfig,
}

impl ItunesClient {
    pub fn new(http_client: Arc<dyn HttpClient>, config: SearchApiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Full search URL for the configured query
    pub fn search_url(&self) -> String {
        let mut url = format!(
            "{}/search?term={}&country={}&media={}",
            self.config.base_url,
            urlencoding::encode(&self.config.term),
            urlencoding::encode(&self.config.country),
            urlencoding::encode(&self.config.media)
        );

        if let Some(entity) = &self.config.entity {
            url.push_str("&entity=");
            url.push_str(&urlencoding::encode(entity));
        }

        if let Some(limit) = self.config.limit {
            url.push_str(&format!("&limit={}", limit));
        }

        url
    }
}

#[async_trait]
impl TrackSource for ItunesClient {
    async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        let url = self.search_url();
        debug!(url = %url, "Searching remote catalog");

        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("User-Agent", self.config.user_agent.as_str())
            .header("Accept", "application/json")
            .timeout(self.config.request_timeout);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| CatalogError::Network(format!("Catalog search failed: {}", e)))?;

        if !response.is_success() {
            warn!(status = response.status, "Catalog search returned an error status");
            return Err(CatalogError::HttpStatus {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        let tracks = parse_search_response(&response.body)?;
        info!(count = tracks.len(), "Fetched tracks from remote catalog");

        Ok(tracks)
    }
}

//! Domain models for the track catalog
//!
//! [`Track`] is the full record kept in the cache; [`TrackMinimal`] is the
//! list-row projection handed to list screens.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog track with every field the remote search carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Track {
    /// Unique identifier (stringified remote track or collection id)
    pub id: String,
    /// Display name
    pub name: String,
    /// Collection (album) name
    pub album: Option<String>,
    /// Artwork URL
    pub artwork: Option<String>,
    /// Primary genre
    pub genre: Option<String>,
    /// Price in `currency`
    pub price: Option<f64>,

    // Detail fields
    /// Artist name
    pub artist: Option<String>,
    /// Remote media kind (`feature-movie`, `song`, ...)
    pub kind: Option<String>,
    /// ISO currency code of `price`
    pub currency: Option<String>,
    /// Long description, or the short one when that is all there is
    pub description: Option<String>,
    /// Release date as reported by the remote (ISO 8601)
    pub release_date: Option<String>,
    /// Preview media URL
    pub preview_url: Option<String>,
    /// Store page URL
    pub track_view_url: Option<String>,
}

impl Track {
    /// Create a track with only an id and a name set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            album: None,
            artwork: None,
            genre: None,
            price: None,
            artist: None,
            kind: None,
            currency: None,
            description: None,
            release_date: None,
            preview_url: None,
            track_view_url: None,
        }
    }

    /// Validate track data before it is written to the cache
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Track id cannot be empty".to_string());
        }

        if let Some(price) = self.price {
            if !price.is_finite() {
                return Err(format!("Track {} has a non-finite price", self.id));
            }
        }

        Ok(())
    }
}

/// Projection of [`Track`] used by list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TrackMinimal {
    pub id: String,
    pub name: String,
    pub album: Option<String>,
    pub artwork: Option<String>,
    pub genre: Option<String>,
    pub price: Option<f64>,
}

impl From<&Track> for TrackMinimal {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            name: track.name.clone(),
            album: track.album.clone(),
            artwork: track.artwork.clone(),
            genre: track.genre.clone(),
            price: track.price,
        }
    }
}

impl From<Track> for TrackMinimal {
    fn from(track: Track) -> Self {
        Self {
            id: track.id,
            name: track.name,
            album: track.album,
            artwork: track.artwork,
            genre: track.genre,
            price: track.price,
        }
    }
}

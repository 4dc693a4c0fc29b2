//! Track store trait and implementation

use crate::error::{CatalogError, Result};
use crate::models::{Track, TrackMinimal};
use crate::observable::{wait_for_revision, Observable};
use async_trait::async_trait;
use core_async::sync::watch;
use sqlx::{query_as, SqlitePool};
use std::future::Future;
use tracing::{debug, info, warn};

const SELECT_TRACK_BY_ID: &str = "SELECT id, name, album, artwork, genre, price, artist, kind, \
                                  currency, description, release_date, preview_url, track_view_url \
                                  FROM tracks WHERE id = ?";

/// Local cache of catalog tracks
///
/// Live reads (`observe_*`) publish the current result and publish again
/// after every replacement until all observers are dropped. They spawn their
/// query task on the current runtime and must be called from inside one.
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Live list of every cached track, projected to [`TrackMinimal`]
    fn observe_minimal_tracks(&self) -> Observable<Vec<TrackMinimal>>;

    /// Live lookup of one cached track
    fn observe_track(&self, id: &str) -> Observable<Option<Track>>;

    /// Snapshot of every cached track, projected to [`TrackMinimal`]
    async fn minimal_tracks(&self) -> Result<Vec<TrackMinimal>>;

    /// Find a track by its ID
    ///
    /// # Returns
    /// - `Ok(Some(track))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: &str) -> Result<Option<Track>>;

    /// Replace the whole cache with `tracks`, keeping their order
    ///
    /// Runs in a single transaction: readers see either the old set or the
    /// new one. Returns the number of rows written.
    ///
    /// # Errors
    /// Returns error if:
    /// - A track fails validation (nothing is written)
    /// - Database error occurs (the old set is kept)
    async fn replace_all(&self, tracks: &[Track]) -> Result<u64>;

    /// Count cached tracks
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of TrackStore
pub struct SqliteTrackStore {
    pool: SqlitePool,
    revision: watch::Sender<u64>,
}

impl SqliteTrackStore {
    /// Create a new SQLite track store
    pub fn new(pool: SqlitePool) -> Self {
        let (revision, _) = watch::channel(0);
        Self { pool, revision }
    }

    /// Number of committed replacements since this store was created
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Run `query` now and again after every replacement, publishing each
    /// successful result.
    fn live_query<T, F, Fut>(&self, query: F) -> Observable<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(SqlitePool) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (publisher, observable) = Observable::pending();
        let mut revision = self.revision.subscribe();
        let pool = self.pool.clone();

        core_async::task::spawn(async move {
            loop {
                revision.borrow_and_update();

                match query(pool.clone()).await {
                    Ok(value) => publisher.set(value),
                    Err(e) => warn!(error = %e, "Live track query failed"),
                }

                if !wait_for_revision(&publisher, &mut revision).await {
                    break;
                }
            }
            debug!("Live track query stopped");
        });

        observable
    }
}

async fn fetch_minimal_tracks(pool: &SqlitePool) -> Result<Vec<TrackMinimal>> {
    let tracks = query_as::<_, TrackMinimal>(
        "SELECT id, name, album, artwork, genre, price FROM tracks ORDER BY position",
    )
    .fetch_all(pool)
    .await?;

    Ok(tracks)
}

async fn fetch_track(pool: &SqlitePool, id: &str) -> Result<Option<Track>> {
    let track = query_as::<_, Track>(SELECT_TRACK_BY_ID)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(track)
}

#[async_trait]
impl TrackStore for SqliteTrackStore {
    fn observe_minimal_tracks(&self) -> Observable<Vec<TrackMinimal>> {
        self.live_query(|pool| async move { fetch_minimal_tracks(&pool).await })
    }

    fn observe_track(&self, id: &str) -> Observable<Option<Track>> {
        let id = id.to_string();
        self.live_query(move |pool| {
            let id = id.clone();
            async move { fetch_track(&pool, &id).await }
        })
    }

    async fn minimal_tracks(&self) -> Result<Vec<TrackMinimal>> {
        fetch_minimal_tracks(&self.pool).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Track>> {
        fetch_track(&self.pool, id).await
    }

    async fn replace_all(&self, tracks: &[Track]) -> Result<u64> {
        for track in tracks {
            track.validate().map_err(|msg| CatalogError::InvalidInput {
                field: "track".to_string(),
                message: msg,
            })?;
        }

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM tracks")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut written = 0;
        for (position, track) in tracks.iter().enumerate() {
            let result = sqlx::query(
                r#"
                INSERT INTO tracks (
                    id, position, name, album, artwork, genre, price,
                    artist, kind, currency, description, release_date,
                    preview_url, track_view_url
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO NOTHING
                "#,
            )
            .bind(&track.id)
            .bind(position as i64)
            .bind(&track.name)
            .bind(&track.album)
            .bind(&track.artwork)
            .bind(&track.genre)
            .bind(track.price)
            .bind(&track.artist)
            .bind(&track.kind)
            .bind(&track.currency)
            .bind(&track.description)
            .bind(&track.release_date)
            .bind(&track.preview_url)
            .bind(&track.track_view_url)
            .execute(&mut *tx)
            .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        self.revision.send_modify(|revision| *revision += 1);

        info!(removed, written, "Replaced cached tracks");
        Ok(written)
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tracks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

//! Background cache writer
//!
//! A single worker task owns every cache replacement. Callers enqueue and
//! move on; jobs run one at a time in submission order. There is no
//! completion signal: failures are logged and the previous cache stays in
//! place.

use crate::models::Track;
use crate::repositories::TrackStore;
use core_async::sync::mpsc;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Handle to the cache-write worker.
///
/// Cloning shares the same worker. The worker stops once every handle is
/// dropped and the queue is drained.
#[derive(Clone)]
pub struct CacheWriter {
    tx: mpsc::UnboundedSender<Vec<Track>>,
}

impl CacheWriter {
    /// Start the worker on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a runtime context.
    pub fn spawn(store: Arc<dyn TrackStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Track>>();

        core_async::task::spawn(async move {
            debug!("Cache writer started");

            while let Some(tracks) = rx.recv().await {
                match store.replace_all(&tracks).await {
                    Ok(written) => info!(written, "Cache replacement committed"),
                    Err(e) => error!(
                        error = %e,
                        count = tracks.len(),
                        "Cache replacement failed; keeping previous cache"
                    ),
                }
            }

            debug!("Cache writer stopped");
        });

        Self { tx }
    }

    /// Queue a full replacement of the cache with `tracks`.
    pub fn replace_all(&self, tracks: Vec<Track>) {
        let count = tracks.len();
        if self.tx.send(tracks).is_err() {
            error!(count, "Cache writer is not running; replacement dropped");
        } else {
            debug!(count, "Cache replacement queued");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::repositories::SqliteTrackStore;
    use core_async::time::{sleep, timeout, Duration};

    async fn wait_for_count(store: &SqliteTrackStore, expected: i64) {
        timeout(Duration::from_secs(5), async {
            while store.count().await.unwrap_or(-1) != expected {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("cache writer should reach the expected count");
    }

    #[tokio::test]
    async fn test_jobs_apply_in_submission_order() {
        let store = Arc::new(SqliteTrackStore::new(create_test_pool().await.unwrap()));
        let writer = CacheWriter::spawn(store.clone());

        writer.replace_all(vec![Track::new("1", "A"), Track::new("2", "B")]);
        writer.replace_all(vec![Track::new("3", "C")]);

        timeout(Duration::from_secs(5), async {
            while store.revision() < 2 {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("both replacements should commit");

        wait_for_count(&store, 1).await;
        assert!(store.find_by_id("3").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_job_keeps_cache_and_worker_alive() {
        let store = Arc::new(SqliteTrackStore::new(create_test_pool().await.unwrap()));
        let writer = CacheWriter::spawn(store.clone());

        writer.replace_all(vec![Track::new("1", "A")]);
        wait_for_count(&store, 1).await;

        writer.replace_all(vec![Track::new("", "Invalid")]);
        writer.replace_all(vec![Track::new("2", "B"), Track::new("3", "C")]);
        wait_for_count(&store, 2).await;
    }
}

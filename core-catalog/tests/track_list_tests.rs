//! Track list and details behaviour across connectivity states

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::HostNetworkMonitor;
use core_catalog::{
    create_test_pool, CatalogError, ItunesClient, Observable, Result, SqliteTrackStore, Track,
    TrackCatalogRepository, TrackMinimal, TrackSource, TrackStore,
};
use core_runtime::config::SearchApiConfig;
use mockall::mock;
use std::sync::Arc;
use std::time::Duration;

mock! {
    Source {}

    #[async_trait]
    impl TrackSource for Source {
        async fn fetch_tracks(&self) -> Result<Vec<Track>>;
    }
}

mock! {
    Http {}

    #[async_trait]
    impl HttpClient for Http {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
    }
}

fn track(id: &str, name: &str) -> Track {
    Track {
        album: Some(format!("{} album", name)),
        genre: Some("Drama".to_string()),
        price: Some(4.99),
        artist: Some("Someone".to_string()),
        ..Track::new(id, name)
    }
}

async fn seeded_store(tracks: &[Track]) -> Arc<SqliteTrackStore> {
    let store = SqliteTrackStore::new(create_test_pool().await.unwrap());
    store.replace_all(tracks).await.unwrap();
    Arc::new(store)
}

/// Store whose replacements never finish; reads go to a real cache.
struct StalledWriteStore {
    inner: Arc<SqliteTrackStore>,
}

#[async_trait]
impl TrackStore for StalledWriteStore {
    fn observe_minimal_tracks(&self) -> Observable<Vec<TrackMinimal>> {
        self.inner.observe_minimal_tracks()
    }

    fn observe_track(&self, id: &str) -> Observable<Option<Track>> {
        self.inner.observe_track(id)
    }

    async fn minimal_tracks(&self) -> Result<Vec<TrackMinimal>> {
        self.inner.minimal_tracks().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Track>> {
        self.inner.find_by_id(id).await
    }

    async fn replace_all(&self, _tracks: &[Track]) -> Result<u64> {
        std::future::pending().await
    }

    async fn count(&self) -> Result<i64> {
        self.inner.count().await
    }
}

fn source_returning(result: Result<Vec<Track>>) -> MockSource {
    let mut source = MockSource::new();
    let mut result = Some(result);
    source
        .expect_fetch_tracks()
        .times(1)
        .returning(move || result.take().unwrap());
    source
}

fn unused_source() -> MockSource {
    let mut source = MockSource::new();
    source.expect_fetch_tracks().times(0);
    source
}

async fn wait_until<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition().await {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not met in time");
}

#[tokio::test]
async fn offline_serves_cache_without_network() {
    let store = seeded_store(&[track("1", "A")]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::offline()),
        Arc::new(unused_source()),
        store.clone(),
    );

    let tracks = repository.track_list().wait().await.unwrap();

    assert_eq!(tracks, store.minimal_tracks().await.unwrap());
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, "1");
    assert_eq!(tracks[0].name, "A");
    assert_eq!(tracks[0].album.as_deref(), Some("A album"));
}

#[tokio::test]
async fn offline_list_stays_live() {
    let store = seeded_store(&[track("1", "A")]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::offline()),
        Arc::new(unused_source()),
        store.clone(),
    );

    let mut observable = repository.track_list();
    assert_eq!(observable.wait().await.unwrap().len(), 1);

    store
        .replace_all(&[track("2", "B"), track("3", "C")])
        .await
        .unwrap();

    let updated = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let value = observable.changed().await.unwrap();
            if value.len() == 2 {
                return value;
            }
        }
    })
    .await
    .unwrap();
    assert_eq!(updated[0].id, "2");
}

#[tokio::test]
async fn online_success_publishes_projection_and_refreshes_cache() {
    let remote = vec![
        Track {
            album: Some("X".to_string()),
            artwork: Some("u".to_string()),
            genre: Some("Pop".to_string()),
            price: Some(0.99),
            description: Some("Detail only".to_string()),
            ..Track::new("2", "B")
        },
        track("5", "E"),
    ];
    let store = seeded_store(&[track("1", "A")]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::online()),
        Arc::new(source_returning(Ok(remote.clone()))),
        store.clone(),
    );

    let tracks = repository.track_list().wait().await.unwrap();

    let expected: Vec<TrackMinimal> = remote.iter().map(TrackMinimal::from).collect();
    assert_eq!(tracks, expected);
    assert_eq!(
        tracks[0],
        TrackMinimal {
            id: "2".to_string(),
            name: "B".to_string(),
            album: Some("X".to_string()),
            artwork: Some("u".to_string()),
            genre: Some("Pop".to_string()),
            price: Some(0.99),
        }
    );

    wait_until(|| {
        let store = store.clone();
        async move { store.revision() >= 2 }
    })
    .await;

    assert_eq!(store.count().await.unwrap(), 2);
    assert!(store.find_by_id("1").await.unwrap().is_none());
    assert_eq!(store.find_by_id("2").await.unwrap(), Some(remote[0].clone()));
}

#[tokio::test]
async fn online_single_track_replaces_cache() {
    let remote = Track {
        album: Some("X".to_string()),
        artwork: Some("u".to_string()),
        genre: Some("Pop".to_string()),
        price: Some(0.99),
        ..Track::new("2", "B")
    };
    let store = seeded_store(&[track("1", "A"), track("7", "G")]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::online()),
        Arc::new(source_returning(Ok(vec![remote.clone()]))),
        store.clone(),
    );

    let tracks = repository.track_list().wait().await.unwrap();
    assert_eq!(tracks, vec![TrackMinimal::from(&remote)]);

    wait_until(|| {
        let store = store.clone();
        async move { store.revision() >= 2 }
    })
    .await;

    let cached = store.minimal_tracks().await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, "2");
}

#[tokio::test]
async fn online_failure_falls_back_to_cache_snapshot() {
    let seeded = [track("1", "A"), track("2", "B")];
    let store = seeded_store(&seeded).await;
    let before = store.minimal_tracks().await.unwrap();

    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::online()),
        Arc::new(source_returning(Err(CatalogError::HttpStatus {
            status: 500,
            body: "boom".to_string(),
        }))),
        store.clone(),
    );

    let tracks = repository.track_list().wait().await.unwrap();

    assert_eq!(tracks, before);
    assert_eq!(store.minimal_tracks().await.unwrap(), before);
    assert_eq!(store.revision(), 1);
}

#[tokio::test]
async fn online_empty_result_falls_back_to_cache() {
    let store = seeded_store(&[track("1", "A")]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::online()),
        Arc::new(source_returning(Ok(Vec::new()))),
        store.clone(),
    );

    let tracks = repository.track_list().wait().await.unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, "1");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_body_falls_back_to_cache() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(1)
        .returning(|_| Ok(HttpResponse::new(200, "<html>maintenance</html>")));

    let store = seeded_store(&[track("1", "A")]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::online()),
        Arc::new(ItunesClient::new(
            Arc::new(http),
            SearchApiConfig::default(),
        )),
        store.clone(),
    );

    let tracks = repository.track_list().wait().await.unwrap();
    assert_eq!(tracks, store.minimal_tracks().await.unwrap());
}

#[tokio::test]
async fn transport_error_falls_back_to_cache() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(1)
        .returning(|_| Err(BridgeError::OperationFailed("connection reset".to_string())));

    let store = seeded_store(&[track("9", "I")]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::online()),
        Arc::new(ItunesClient::new(
            Arc::new(http),
            SearchApiConfig::default(),
        )),
        store,
    );

    let tracks = repository.track_list().wait().await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, "9");
}

#[tokio::test]
async fn itunes_response_flows_into_cache() {
    let body = r#"{"resultCount": 1, "results": [{
        "trackId": 42,
        "trackName": "B",
        "collectionName": "X",
        "artworkUrl100": "u",
        "primaryGenreName": "Pop",
        "trackPrice": 0.99,
        "currency": "AUD",
        "longDescription": "Full text"
    }]}"#;
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(1)
        .returning(move |_| Ok(HttpResponse::new(200, body)));

    let store = seeded_store(&[]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::online()),
        Arc::new(ItunesClient::new(
            Arc::new(http),
            SearchApiConfig::default(),
        )),
        store.clone(),
    );

    let tracks = repository.track_list().wait().await.unwrap();
    assert_eq!(tracks[0].id, "42");
    assert_eq!(tracks[0].price, Some(0.99));

    wait_until(|| {
        let store = store.clone();
        async move { store.count().await.unwrap_or(0) == 1 }
    })
    .await;

    let details = repository
        .track_details_by_id("42")
        .unwrap()
        .wait()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(details.currency.as_deref(), Some("AUD"));
    assert_eq!(details.description.as_deref(), Some("Full text"));
}

#[tokio::test]
async fn details_come_from_cache_regardless_of_connectivity() {
    let stored = track("1", "A");
    let store = seeded_store(std::slice::from_ref(&stored)).await;

    for network in [HostNetworkMonitor::online(), HostNetworkMonitor::offline()] {
        let repository = TrackCatalogRepository::new(
            Arc::new(network),
            Arc::new(unused_source()),
            store.clone(),
        );

        let found = repository
            .track_details_by_id("1")
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert_eq!(found, Some(stored.clone()));

        let missing = repository
            .track_details_by_id("404")
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert_eq!(missing, None);
    }
}

#[tokio::test]
async fn empty_id_is_rejected() {
    let store = seeded_store(&[]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::offline()),
        Arc::new(unused_source()),
        store,
    );

    match repository.track_details_by_id("") {
        Err(CatalogError::InvalidInput { field, .. }) => assert_eq!(field, "id"),
        Err(other) => panic!("expected InvalidInput, got {}", other),
        Ok(_) => panic!("expected InvalidInput, got an observable"),
    }
}

#[tokio::test]
async fn connectivity_is_checked_per_call() {
    let network = Arc::new(HostNetworkMonitor::offline());
    let store = seeded_store(&[track("1", "A")]).await;
    let repository = TrackCatalogRepository::new(
        network.clone(),
        Arc::new(source_returning(Ok(vec![track("2", "B")]))),
        store,
    );

    let offline = repository.track_list().wait().await.unwrap();
    assert_eq!(offline[0].id, "1");

    network.set_online(true);
    let online = repository.track_list().wait().await.unwrap();
    assert_eq!(online[0].id, "2");
}

#[tokio::test]
async fn stalled_cache_write_does_not_hold_back_track_lists() {
    let network = Arc::new(HostNetworkMonitor::online());
    let inner = seeded_store(&[track("1", "A")]).await;
    let mut source = MockSource::new();
    source
        .expect_fetch_tracks()
        .times(2)
        .returning(|| Ok(vec![track("2", "B")]));

    let repository = TrackCatalogRepository::new(
        network.clone(),
        Arc::new(source),
        Arc::new(StalledWriteStore {
            inner: inner.clone(),
        }),
    );

    let first = repository.track_list();
    let second = repository.track_list();
    let (first, second) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(first.wait(), second.wait())
    })
    .await
    .expect("track lists should resolve while the cache write is stuck");

    assert_eq!(first.unwrap()[0].id, "2");
    assert_eq!(second.unwrap()[0].id, "2");

    // Neither replacement landed, so the cache still holds the old list.
    network.set_online(false);
    let cached = repository.track_list().wait().await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, "1");
    assert_eq!(inner.revision(), 1);
}

#[tokio::test]
async fn duplicate_remote_ids_publish_what_the_cache_keeps() {
    let store = seeded_store(&[]).await;
    let repository = TrackCatalogRepository::new(
        Arc::new(HostNetworkMonitor::online()),
        Arc::new(source_returning(Ok(vec![
            track("1", "First"),
            track("2", "B"),
            track("1", "Second"),
        ]))),
        store.clone(),
    );

    let tracks = repository.track_list().wait().await.unwrap();
    let ids: Vec<_> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(tracks[0].name, "First");

    wait_until(|| {
        let store = store.clone();
        async move { store.revision() >= 2 }
    })
    .await;

    assert_eq!(store.minimal_tracks().await.unwrap(), tracks);
}

//! End-to-end album backup tests over a real filesystem store.

use async_trait::async_trait;
use backend_local::LocalStore;
use bridge_traits::backup::BackupStore;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::media::{Album, MediaItem, MediaKind, MediaSource};
use bytes::Bytes;
use core_runtime::events::EventBus;
use core_sync::SyncOrchestrator;
use mockall::mock;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

mock! {
    Source {}

    #[async_trait]
    impl MediaSource for Source {
        async fn list_albums(&self) -> BridgeResult<Vec<Album>>;
        async fn list_album_items(&self, album: &Album) -> BridgeResult<Vec<MediaItem>>;
        fn source_url(&self, item: &MediaItem) -> String;
    }
}

mock! {
    Http {}

    #[async_trait]
    impl HttpClient for Http {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        async fn fetch_bytes(&self, url: &str) -> BridgeResult<Bytes>;
    }
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("album-sync-test-{}", Uuid::new_v4()))
}

fn trip_album() -> Vec<Album> {
    vec![Album {
        id: "a1".to_string(),
        title: "Trip".to_string(),
    }]
}

/// One titled photo and one untitled video mis-tagged as jpg.
fn trip_items() -> Vec<MediaItem> {
    vec![
        MediaItem {
            id: "1".to_string(),
            title: "sunset".to_string(),
            kind: MediaKind::Photo,
            format: "jpg".to_string(),
            server: "65535".to_string(),
            secret: "s1".to_string(),
        },
        MediaItem {
            id: "2".to_string(),
            title: String::new(),
            kind: MediaKind::Video,
            format: "jpg".to_string(),
            server: "65535".to_string(),
            secret: "s2".to_string(),
        },
    ]
}

fn source_with_trip() -> MockSource {
    let mut source = MockSource::new();
    source.expect_list_albums().returning(|| Ok(trip_album()));
    source
        .expect_list_album_items()
        .returning(|_| Ok(trip_items()));
    source
        .expect_source_url()
        .returning(|item| format!("https://origin.test/{}", item.id));
    source
}

fn orchestrator(root: &PathBuf, http: MockHttp) -> SyncOrchestrator {
    SyncOrchestrator::new(
        Arc::new(source_with_trip()),
        Arc::new(LocalStore::new(root)),
        Arc::new(http),
        EventBus::new(64),
        "alias",
        None,
    )
}

#[tokio::test]
async fn test_first_run_backs_up_album_with_resolved_names() {
    let root = scratch_dir();

    let mut http = MockHttp::new();
    http.expect_fetch_bytes()
        .times(2)
        .returning(|url| Ok(Bytes::from(format!("payload of {}", url))));

    let stats = orchestrator(&root, http).run().await.unwrap();

    assert_eq!(stats.albums_processed, 1);
    assert_eq!(stats.items_written, 2);

    // Title stem for the photo; id stem and mov correction for the video
    let photo = tokio::fs::read(root.join("Trip/sunset.jpg")).await.unwrap();
    assert_eq!(photo, b"payload of https://origin.test/1");
    assert!(root.join("Trip/2.mov").exists());

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn test_second_run_is_idempotent_with_zero_transfers() {
    let root = scratch_dir();

    let mut http = MockHttp::new();
    http.expect_fetch_bytes()
        .times(2)
        .returning(|_| Ok(Bytes::from_static(b"payload")));
    orchestrator(&root, http).run().await.unwrap();

    // Counts now match, so the album short-circuits: no fetch at all
    let mut quiet_http = MockHttp::new();
    quiet_http.expect_fetch_bytes().times(0);
    let stats = orchestrator(&root, quiet_http).run().await.unwrap();

    assert_eq!(stats.albums_skipped, 1);
    assert_eq!(stats.items_written, 0);

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn test_partial_backup_transfers_only_missing_items() {
    let root = scratch_dir();

    // Seed the store with one of the two items
    let store = LocalStore::new(&root);
    store
        .write("Trip/sunset.jpg", Bytes::from_static(b"seeded"))
        .await
        .unwrap();

    let mut http = MockHttp::new();
    http.expect_fetch_bytes()
        .withf(|url| url == "https://origin.test/2")
        .times(1)
        .returning(|_| Ok(Bytes::from_static(b"video payload")));

    let stats = orchestrator(&root, http).run().await.unwrap();

    assert_eq!(stats.items_written, 1);
    assert_eq!(stats.items_skipped, 1);
    // The seeded object was left untouched
    let seeded = tokio::fs::read(root.join("Trip/sunset.jpg")).await.unwrap();
    assert_eq!(seeded, b"seeded");

    let _ = tokio::fs::remove_dir_all(&root).await;
}

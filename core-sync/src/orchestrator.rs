//! # Sync Orchestrator
//!
//! Drives one full backup run: album enumeration, optional title filtering,
//! per-album reconciliation, and the final summary event. Strictly
//! sequential, no cancellation; a failed run is resumed by running again.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use bridge_traits::backup::BackupStore;
use bridge_traits::http::HttpClient;
use bridge_traits::media::MediaSource;
use core_runtime::events::{EventBus, SyncEvent};

use crate::error::{Result, SyncError};
use crate::reconciler::AlbumReconciler;

/// Aggregate counters of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub albums_processed: usize,
    pub albums_skipped: usize,
    pub items_written: usize,
    pub items_skipped: usize,
}

/// Orchestrates a backup run across all (or the filtered set of) albums.
pub struct SyncOrchestrator {
    source: Arc<dyn MediaSource>,
    events: EventBus,
    reconciler: AlbumReconciler,
    /// When present, only albums whose title is in the set are processed.
    album_filter: Option<HashSet<String>>,
}

impl SyncOrchestrator {
    pub fn new(
        source: Arc<dyn MediaSource>,
        store: Arc<dyn BackupStore>,
        http: Arc<dyn HttpClient>,
        events: EventBus,
        path_alias: impl Into<String>,
        album_filter: Option<HashSet<String>>,
    ) -> Self {
        let reconciler = AlbumReconciler::new(
            Arc::clone(&source),
            store,
            http,
            events.clone(),
            path_alias,
        );
        Self {
            source,
            events,
            reconciler,
            album_filter,
        }
    }

    /// Run one full backup pass over the library.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RunStats> {
        let albums = self
            .source
            .list_albums()
            .await
            .map_err(|source| SyncError::Albums { source })?;
        info!(count = albums.len(), "Enumerated albums");

        let mut stats = RunStats::default();
        for album in &albums {
            if let Some(filter) = &self.album_filter {
                if !filter.contains(&album.title) {
                    debug!(album = %album.title, "Album not in filter, ignoring");
                    continue;
                }
            }

            let report = self.reconciler.reconcile(album).await?;
            if report.skipped {
                stats.albums_skipped += 1;
            } else {
                stats.albums_processed += 1;
            }
            stats.items_written += report.items_written;
            stats.items_skipped += report.items_skipped;
        }

        self.events.emit(SyncEvent::RunCompleted {
            albums_processed: stats.albums_processed,
            albums_skipped: stats.albums_skipped,
            items_written: stats.items_written,
            items_skipped: stats.items_skipped,
        });
        info!(?stats, "Run completed");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::{HttpRequest, HttpResponse};
    use bridge_traits::media::{Album, MediaItem};
    use bytes::Bytes;
    use mockall::mock;

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
        Store {}

        #[async_trait]
        impl BackupStore for Store {
            async fn exists(&self, key: &str) -> BridgeResult<bool>;
            async fn list(&self, prefix: &str) -> BridgeResult<Vec<String>>;
            async fn write(&self, key: &str, data: Bytes) -> BridgeResult<()>;
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

    fn albums(titles: &[&str]) -> Vec<Album> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| Album {
                id: format!("a{}", i),
                title: title.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_filter_restricts_processed_albums() {
        let mut source = MockSource::new();
        source
            .expect_list_albums()
            .times(1)
            .returning(|| Ok(albums(&["Trip", "Winter", "Misc"])));
        // Only the filtered album gets its items listed
        source
            .expect_list_album_items()
            .withf(|album| album.title == "Winter")
            .times(1)
            .returning(|_| Ok(vec![]));

        let mut store = MockStore::new();
        store.expect_list().returning(|_| Ok(vec![]));

        let filter = Some(["Winter".to_string()].into_iter().collect());
        let orchestrator = SyncOrchestrator::new(
            Arc::new(source),
            Arc::new(store),
            Arc::new(MockHttp::new()),
            EventBus::new(16),
            "alias",
            filter,
        );

        let stats = orchestrator.run().await.unwrap();
        // Empty album: zero remote items equals zero backed up, so it skips
        assert_eq!(stats.albums_skipped, 1);
        assert_eq!(stats.albums_processed, 0);
    }

    #[tokio::test]
    async fn test_run_completed_carries_aggregate_counts() {
        let mut source = MockSource::new();
        source
            .expect_list_albums()
            .returning(|| Ok(albums(&["Trip"])));
        source.expect_list_album_items().returning(|_| Ok(vec![]));

        let mut store = MockStore::new();
        store.expect_list().returning(|_| Ok(vec![]));

        let events = EventBus::new(16);
        let mut rx = events.subscribe();

        let orchestrator = SyncOrchestrator::new(
            Arc::new(source),
            Arc::new(store),
            Arc::new(MockHttp::new()),
            events,
            "alias",
            None,
        );
        orchestrator.run().await.unwrap();

        // Skip the album-level events, keep the summary
        let mut last = rx.recv().await.unwrap();
        while let Ok(event) = rx.try_recv() {
            last = event;
        }
        assert_eq!(
            last,
            SyncEvent::RunCompleted {
                albums_processed: 0,
                albums_skipped: 1,
                items_written: 0,
                items_skipped: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_album_listing_failure_aborts_run() {
        let mut source = MockSource::new();
        source.expect_list_albums().returning(|| {
            Err(bridge_traits::error::BridgeError::Transport(
                "connection refused".to_string(),
            ))
        });

        let orchestrator = SyncOrchestrator::new(
            Arc::new(source),
            Arc::new(MockStore::new()),
            Arc::new(MockHttp::new()),
            EventBus::new(16),
            "alias",
            None,
        );

        assert!(matches!(
            orchestrator.run().await,
            Err(SyncError::Albums { .. })
        ));
    }
}

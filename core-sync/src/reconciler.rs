//! # Album Reconciler
//!
//! Brings one album's backup in line with its remote state.
//!
//! ## Overview
//!
//! Reconciliation runs in two phases:
//! 1. **Plan** ([`plan`]): compare the remote item count against the number
//!    of objects already under the album prefix. Equal counts short-circuit
//!    the whole album with zero per-item probes.
//! 2. **Scan**: report duplicate titles, then walk the items in enumeration
//!    order and sync each one (existence probe, fetch, write).
//!
//! The decision is a pure function so the short-circuit rule stays testable
//! without any collaborator in play. Count equality is an accepted
//! approximation: a renamed-plus-deleted pair that leaves the count intact
//! goes unnoticed until the count diverges again.
//!
//! Item sync is check-then-act over the store; nothing else writes to the
//! backup while a run is in flight.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use bridge_traits::backup::BackupStore;
use bridge_traits::http::HttpClient;
use bridge_traits::media::{Album, MediaSource};
use core_runtime::events::{EventBus, SyncEvent};

use crate::duplicates::find_duplicates;
use crate::error::{Result, SyncError};
use crate::naming::object_key;

/// Outcome of the count comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumPlan {
    /// Counts match; skip the album without touching a single item.
    ShortCircuitSkip,
    /// Counts diverge; scan every item.
    Scan,
}

/// Decide whether an album needs a scan.
pub fn plan(remote_count: usize, backed_up_count: usize) -> AlbumPlan {
    if remote_count == backed_up_count {
        AlbumPlan::ShortCircuitSkip
    } else {
        AlbumPlan::Scan
    }
}

/// Per-album reconciliation report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlbumReport {
    /// Whether the album was short-circuit skipped.
    pub skipped: bool,
    pub items_written: usize,
    pub items_skipped: usize,
}

/// Reconciles a single album against the backup store.
pub struct AlbumReconciler {
    source: Arc<dyn MediaSource>,
    store: Arc<dyn BackupStore>,
    http: Arc<dyn HttpClient>,
    events: EventBus,
    path_alias: String,
}

impl AlbumReconciler {
    pub fn new(
        source: Arc<dyn MediaSource>,
        store: Arc<dyn BackupStore>,
        http: Arc<dyn HttpClient>,
        events: EventBus,
        path_alias: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            http,
            events,
            path_alias: path_alias.into(),
        }
    }

    /// Reconcile one album. Sequential; the first failure aborts with the
    /// album and item context attached.
    #[instrument(skip(self, album), fields(album = %album.title))]
    pub async fn reconcile(&self, album: &Album) -> Result<AlbumReport> {
        let items = self
            .source
            .list_album_items(album)
            .await
            .map_err(|source| SyncError::Listing {
                album: album.title.clone(),
                source,
            })?;

        self.events.emit(SyncEvent::AlbumStarted {
            title: album.title.clone(),
            item_count: items.len(),
        });

        let backed_up = self
            .store
            .list(&album.title)
            .await
            .map_err(|source| SyncError::Store {
                op: "list",
                key: album.title.clone(),
                source,
            })?;

        if plan(items.len(), backed_up.len()) == AlbumPlan::ShortCircuitSkip {
            debug!(count = items.len(), "Album counts match, skipping");
            self.events.emit(SyncEvent::AlbumSkipped {
                title: album.title.clone(),
                backed_up: backed_up.len(),
            });
            return Ok(AlbumReport {
                skipped: true,
                ..AlbumReport::default()
            });
        }

        for group in find_duplicates(&items, &self.path_alias) {
            self.events.emit(SyncEvent::DuplicateTitles {
                album: album.title.clone(),
                title: group.title,
                locators: group.locators,
            });
        }

        let mut report = AlbumReport::default();
        for item in &items {
            let key = object_key(&album.title, item);

            let exists =
                self.store
                    .exists(key.as_str())
                    .await
                    .map_err(|source| SyncError::Store {
                        op: "exists",
                        key: key.to_string(),
                        source,
                    })?;

            if exists {
                self.events.emit(SyncEvent::ItemSkipped {
                    key: key.to_string(),
                });
                report.items_skipped += 1;
                continue;
            }

            self.events.emit(SyncEvent::ItemLoading {
                key: key.to_string(),
            });

            let url = self.source.source_url(item);
            let payload =
                self.http
                    .fetch_bytes(&url)
                    .await
                    .map_err(|source| SyncError::Transfer {
                        key: key.to_string(),
                        url: url.clone(),
                        source,
                    })?;

            self.store
                .write(key.as_str(), payload)
                .await
                .map_err(|source| SyncError::Store {
                    op: "write",
                    key: key.to_string(),
                    source,
                })?;

            self.events.emit(SyncEvent::ItemDone {
                key: key.to_string(),
            });
            report.items_written += 1;
        }

        info!(
            written = report.items_written,
            skipped = report.items_skipped,
            "Album reconciled"
        );
        self.events.emit(SyncEvent::AlbumCompleted {
            title: album.title.clone(),
        });
        Ok(report)
    }
}

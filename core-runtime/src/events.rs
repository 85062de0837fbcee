//! # Event Bus
//!
//! Progress and outcome reporting over `tokio::sync::broadcast`. The sync
//! engine emits typed [`SyncEvent`]s; presentation (console rendering in the
//! binary) subscribes and renders them. The events are purely observational:
//! nothing in the engine consumes a subscriber's reaction, which keeps the
//! reconciliation algorithm testable without capturing console output.
//!
//! ## Error Handling
//!
//! `broadcast` can produce two receive errors:
//!
//! - **`RecvError::Lagged(n)`**: the subscriber missed `n` events. Non-fatal;
//!   keep receiving.
//! - **`RecvError::Closed`**: all senders dropped. Treat as shutdown.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::events::{EventBus, SyncEvent};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bus = EventBus::new(100);
//! let mut stream = bus.subscribe();
//!
//! bus.emit(SyncEvent::ItemSkipped { key: "Trip/sunset.jpg".to_string() });
//!
//! let event = stream.recv().await.unwrap();
//! assert!(matches!(event, SyncEvent::ItemSkipped { .. }));
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::RecvError;
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Events emitted during a backup run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SyncEvent {
    /// An album's reconciliation began.
    AlbumStarted {
        /// Album title (also the backup namespace).
        title: String,
        /// Number of remote items enumerated.
        item_count: usize,
    },
    /// An album was short-circuit skipped: the backed-up object count
    /// already matches the remote item count.
    AlbumSkipped {
        title: String,
        /// Number of objects found under the album prefix.
        backed_up: usize,
    },
    /// All items of an album were processed.
    AlbumCompleted { title: String },
    /// A duplicate title was found within an album. One event per
    /// duplicated title; diagnostic only, sync proceeds regardless.
    DuplicateTitles {
        album: String,
        title: String,
        /// Human-followable page URLs of every item carrying the title.
        locators: Vec<String>,
    },
    /// An item transfer is starting (it was absent from the backup).
    ItemLoading { key: String },
    /// An item was already backed up; no transfer performed.
    ItemSkipped { key: String },
    /// An item was fetched and written to the backup.
    ItemDone { key: String },
    /// The whole run finished.
    RunCompleted {
        albums_processed: usize,
        albums_skipped: usize,
        items_written: usize,
        items_skipped: usize,
    },
}

impl SyncEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            SyncEvent::AlbumStarted { .. } => "Album reconciliation started",
            SyncEvent::AlbumSkipped { .. } => "Album already complete",
            SyncEvent::AlbumCompleted { .. } => "Album reconciliation completed",
            SyncEvent::DuplicateTitles { .. } => "Duplicate titles detected",
            SyncEvent::ItemLoading { .. } => "Item transfer starting",
            SyncEvent::ItemSkipped { .. } => "Item already backed up",
            SyncEvent::ItemDone { .. } => "Item backed up",
            SyncEvent::RunCompleted { .. } => "Run completed",
        }
    }
}

/// Central broadcast channel for sync events.
///
/// Cloning is cheap; clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SyncEvent>,
}

impl EventBus {
    /// Create an event bus with the given buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// An event emitted while no subscriber exists is simply dropped; the
    /// engine never treats that as an error.
    pub fn emit(&self, event: SyncEvent) {
        let _ = self.sender.send(event);
    }

    /// Create a new independent subscription.
    pub fn subscribe(&self) -> Receiver<SyncEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

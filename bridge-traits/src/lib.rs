//! # Collaborator Bridge Traits
//!
//! Abstractions over the external collaborators of the sync engine.
//!
//! ## Overview
//!
//! The sync engine in `core-sync` only ever talks to three capabilities,
//! each expressed as an async trait here:
//!
//! - [`HttpClient`](http::HttpClient) — raw HTTP transport, including the
//!   full-body transfer fetch of item payloads
//! - [`MediaSource`](media::MediaSource) — album/item enumeration from the
//!   remote photo library's metadata API
//! - [`BackupStore`](backup::BackupStore) — the backup target
//!   (exists/list/write over a shared key space)
//!
//! Concrete implementations live in `bridge-desktop`, `provider-flickr`,
//! `backend-local` and `backend-object`.

pub mod backup;
pub mod error;
pub mod http;
pub mod media;

pub use backup::BackupStore;
pub use error::{BridgeError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use media::{Album, MediaItem, MediaKind, MediaSource};

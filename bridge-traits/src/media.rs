//! Remote Library Abstractions
//!
//! Data model and trait for the remote photo library's metadata API. The
//! engine treats the library as an ordered collection of albums, each an
//! ordered collection of items; it never mutates either.

use async_trait::async_trait;

use crate::error::Result;

/// Kind of a remote media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Parse the wire string. The upstream API only emits `"photo"` and
    /// `"video"`; anything else is treated as a photo.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "video" => MediaKind::Video,
            _ => MediaKind::Photo,
        }
    }
}

/// A single remote photo or video, fully typed at the API boundary.
///
/// Immutable once fetched. `title` is a human string and not guaranteed
/// unique within an album; `id` is unique within the remote system.
/// `server` and `secret` are the locator material needed to derive the
/// original-payload download URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub kind: MediaKind,
    /// File-extension-like original format reported by the API (e.g. "jpg").
    pub format: String,
    pub server: String,
    pub secret: String,
}

/// A named grouping of items; its title doubles as the backup namespace.
///
/// The title is used directly as a storage path segment and is assumed
/// pre-sanitized by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub title: String,
}

/// Metadata source for the remote photo library.
///
/// Pagination is transparent: both listing operations follow the API's
/// paging until exhausted and return the full ordered collection.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// List every album of the configured user, in API order.
    async fn list_albums(&self) -> Result<Vec<Album>>;

    /// List every item of an album, in API order.
    async fn list_album_items(&self, album: &Album) -> Result<Vec<MediaItem>>;

    /// Derive the transferable source locator for an item's original payload.
    fn source_url(&self, item: &MediaItem) -> String;
}

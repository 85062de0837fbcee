//! # Naming Resolver
//!
//! Derives the canonical backup key of a media item. The key is the single
//! identity shared by the remote library and the backup store; the duplicate
//! detector and the existence checks both depend on it being derived the
//! same way every run.

use bridge_traits::media::{MediaItem, MediaKind};
use std::fmt;

/// Canonical backup key: `"{album title}/{stem}.{extension}"`.
///
/// Only [`object_key`] produces these, so a key in hand is always
/// well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the backup key of an item within an album.
///
/// The stem is the item's title, falling back to its id for untitled items.
/// The extension is the reported original format, with one correction: the
/// upstream tags video originals with an image format, so a video claiming
/// `jpg` is stored as `mov`.
pub fn object_key(album_title: &str, item: &MediaItem) -> ObjectKey {
    let stem = if item.title.is_empty() {
        item.id.as_str()
    } else {
        item.title.as_str()
    };

    let extension = if item.kind == MediaKind::Video && item.format == "jpg" {
        "mov"
    } else {
        item.format.as_str()
    };

    ObjectKey(format!("{}/{}.{}", album_title, stem, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, kind: MediaKind, format: &str) -> MediaItem {
        MediaItem {
            id: "42".to_string(),
            title: title.to_string(),
            kind,
            format: format.to_string(),
            server: "65535".to_string(),
            secret: "s".to_string(),
        }
    }

    #[test]
    fn test_titled_photo() {
        let key = object_key("Trip", &item("sunset", MediaKind::Photo, "jpg"));
        assert_eq!(key.as_str(), "Trip/sunset.jpg");
    }

    #[test]
    fn test_untitled_item_uses_id() {
        let key = object_key("Trip", &item("", MediaKind::Photo, "png"));
        assert_eq!(key.as_str(), "Trip/42.png");
    }

    #[test]
    fn test_video_mistagged_as_jpg_becomes_mov() {
        let key = object_key("Trip", &item("clip", MediaKind::Video, "jpg"));
        assert_eq!(key.as_str(), "Trip/clip.mov");
    }

    #[test]
    fn test_video_with_real_format_is_kept() {
        let key = object_key("Trip", &item("clip", MediaKind::Video, "mp4"));
        assert_eq!(key.as_str(), "Trip/clip.mp4");
    }

    #[test]
    fn test_photo_jpg_is_not_rewritten() {
        let key = object_key("Trip", &item("sunset", MediaKind::Photo, "jpg"));
        assert!(key.as_str().ends_with(".jpg"));
    }
}

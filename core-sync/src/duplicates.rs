//! # Duplicate Detector
//!
//! Finds titles shared by more than one item within an album. Duplicate
//! titles collapse to the same backup key, so only one of the items survives
//! the backup; the detector surfaces them for the user to retitle upstream.
//! Detection is diagnostic only and never blocks the sync.

use bridge_traits::media::MediaItem;
use std::collections::BTreeMap;

/// A title carried by two or more items of one album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub title: String,
    /// Page URL of every item carrying the title, in enumeration order.
    pub locators: Vec<String>,
}

/// Human-followable page URL of an item, built from the account's path alias.
pub fn page_url(path_alias: &str, item_id: &str) -> String {
    format!("https://www.flickr.com/photos/{}/{}", path_alias, item_id)
}

/// Report every title occurring at least twice, in lexicographic title
/// order. Untitled items are excluded: their keys derive from the unique id
/// and cannot collide.
pub fn find_duplicates(items: &[MediaItem], path_alias: &str) -> Vec<DuplicateGroup> {
    let mut by_title: BTreeMap<&str, Vec<&MediaItem>> = BTreeMap::new();
    for item in items {
        if item.title.is_empty() {
            continue;
        }
        by_title.entry(item.title.as_str()).or_default().push(item);
    }

    by_title
        .into_iter()
        .filter(|(_, carriers)| carriers.len() >= 2)
        .map(|(title, carriers)| DuplicateGroup {
            title: title.to_string(),
            locators: carriers
                .iter()
                .map(|item| page_url(path_alias, &item.id))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::media::MediaKind;

    fn item(id: &str, title: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            title: title.to_string(),
            kind: MediaKind::Photo,
            format: "jpg".to_string(),
            server: "65535".to_string(),
            secret: "s".to_string(),
        }
    }

    #[test]
    fn test_no_duplicates_yields_empty() {
        let items = [item("1", "a"), item("2", "b")];
        assert!(find_duplicates(&items, "alias").is_empty());
    }

    #[test]
    fn test_groups_are_title_sorted_with_page_urls() {
        let items = [
            item("1", "zebra"),
            item("2", "apple"),
            item("3", "zebra"),
            item("4", "apple"),
            item("5", "apple"),
        ];

        let groups = find_duplicates(&items, "alias");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "apple");
        assert_eq!(groups[0].locators.len(), 3);
        assert_eq!(
            groups[0].locators[0],
            "https://www.flickr.com/photos/alias/2"
        );
        assert_eq!(groups[1].title, "zebra");
    }

    #[test]
    fn test_untitled_items_are_ignored() {
        let items = [item("1", ""), item("2", ""), item("3", "")];
        assert!(find_duplicates(&items, "alias").is_empty());
    }
}

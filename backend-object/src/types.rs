//! Object store gateway response types
//!
//! Data structures for deserializing the gateway's JSON listing responses.

use serde::Deserialize;

/// One entry of a listing page
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntry {
    /// Full object key inside the bucket
    pub key: String,
}

/// A listing page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsResponse {
    /// Objects on this page
    #[serde(default)]
    pub objects: Vec<ObjectEntry>,

    /// Token for the next page; absent on the last page
    pub next_continuation_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing_page() {
        let json = r#"{
            "objects": [
                {"key": "photos/Trip/sunset.jpg"},
                {"key": "photos/Trip/2.mov"}
            ],
            "nextContinuationToken": "token123"
        }"#;

        let page: ListObjectsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.objects.len(), 2);
        assert_eq!(page.objects[0].key, "photos/Trip/sunset.jpg");
        assert_eq!(page.next_continuation_token, Some("token123".to_string()));
    }

    #[test]
    fn test_deserialize_last_page_without_token() {
        let json = r#"{"objects": []}"#;

        let page: ListObjectsResponse = serde_json::from_str(json).unwrap();
        assert!(page.objects.is_empty());
        assert!(page.next_continuation_token.is_none());
    }
}

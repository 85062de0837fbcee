//! Flickr API response types
//!
//! Data structures for deserializing Flickr REST responses
//! (`format=json&nojsoncallback=1`). Every response carries a `stat` field;
//! the connector checks it once, immediately after the call, so the rest of
//! the engine only ever sees typed values.

use serde::Deserialize;

/// Envelope checked on every response before the typed parse
#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    pub stat: String,

    /// Error code, present when `stat == "fail"`
    #[serde(default)]
    pub code: Option<i64>,

    /// Error message, present when `stat == "fail"`
    #[serde(default)]
    pub message: Option<String>,
}

/// Flickr wraps several title-like strings as `{"_content": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentField {
    #[serde(rename = "_content")]
    pub content: String,
}

/// One photoset of a `flickr.photosets.getList` page
#[derive(Debug, Clone, Deserialize)]
pub struct PhotosetSummary {
    pub id: String,
    pub title: ContentField,
}

/// Body of `flickr.photosets.getList`
#[derive(Debug, Deserialize)]
pub struct PhotosetsBody {
    pub page: u32,
    pub pages: u32,
    #[serde(default)]
    pub photoset: Vec<PhotosetSummary>,
}

/// `flickr.photosets.getList` response
#[derive(Debug, Deserialize)]
pub struct PhotosetsGetListResponse {
    pub photosets: PhotosetsBody,
}

/// One photo of a `flickr.photosets.getPhotos` page
///
/// `originalformat` and `originalsecret` come from the
/// `extras=media,original_format` request parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotosetPhoto {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// `"photo"` or `"video"`
    #[serde(default)]
    pub media: String,
    #[serde(default)]
    pub originalformat: Option<String>,
    #[serde(default)]
    pub originalsecret: Option<String>,
    #[serde(default)]
    pub server: String,
}

/// Body of `flickr.photosets.getPhotos`
#[derive(Debug, Deserialize)]
pub struct PhotosetPhotosBody {
    pub page: u32,
    pub pages: u32,
    #[serde(default)]
    pub photo: Vec<PhotosetPhoto>,
}

/// `flickr.photosets.getPhotos` response
#[derive(Debug, Deserialize)]
pub struct PhotosetGetPhotosResponse {
    pub photoset: PhotosetPhotosBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_photosets_page() {
        let json = r#"{
            "photosets": {
                "page": 1,
                "pages": 2,
                "photoset": [
                    {"id": "72157626216528324", "title": {"_content": "Trip"}}
                ]
            },
            "stat": "ok"
        }"#;

        let response: PhotosetsGetListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.photosets.pages, 2);
        assert_eq!(response.photosets.photoset[0].title.content, "Trip");
    }

    #[test]
    fn test_deserialize_photoset_photos() {
        let json = r#"{
            "photoset": {
                "id": "72157626216528324",
                "page": 1,
                "pages": 1,
                "photo": [
                    {
                        "id": "123",
                        "title": "sunset",
                        "media": "video",
                        "originalformat": "jpg",
                        "originalsecret": "abc",
                        "server": "65535"
                    }
                ]
            },
            "stat": "ok"
        }"#;

        let response: PhotosetGetPhotosResponse = serde_json::from_str(json).unwrap();
        let photo = &response.photoset.photo[0];
        assert_eq!(photo.media, "video");
        assert_eq!(photo.originalformat.as_deref(), Some("jpg"));
    }

    #[test]
    fn test_deserialize_failure_envelope() {
        let json = r#"{"stat": "fail", "code": 100, "message": "Invalid API Key"}"#;

        let status: ApiStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.stat, "fail");
        assert_eq!(status.code, Some(100));
    }
}

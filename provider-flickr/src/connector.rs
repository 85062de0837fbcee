//! Flickr REST Connector
//!
//! ## Overview
//!
//! Implements [`MediaSource`] against the Flickr REST endpoint. All calls use
//! the `format=json&nojsoncallback=1` convention and are validated once at the
//! boundary: HTTP status first, then the `stat` envelope, then the typed
//! parse. Pagination is followed transparently; callers always receive the
//! full collection.
//!
//! Metadata responses can optionally be cached through [`ResponseCache`].
//! Only successful responses are cached, so a failed run never poisons a
//! later one.

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::media::{Album, MediaItem, MediaKind, MediaSource};

use crate::cache::ResponseCache;
use crate::error::{FlickrError, Result};
use crate::types::{ApiStatus, PhotosetGetPhotosResponse, PhotosetsGetListResponse};

/// Flickr REST endpoint
pub const REST_ENDPOINT: &str = "https://api.flickr.com/services/rest/";

/// Page size for listing calls (the API maximum)
const PER_PAGE: u32 = 500;

/// `MediaSource` implementation over the Flickr REST API.
pub struct FlickrConnector {
    http: Arc<dyn HttpClient>,
    api_key: String,
    user_id: String,
    cache: Option<ResponseCache>,
}

impl FlickrConnector {
    pub fn new(
        http: Arc<dyn HttpClient>,
        api_key: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            user_id: user_id.into(),
            cache: None,
        }
    }

    /// Enable the write-once response cache for metadata calls.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn build_url(&self, method: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}?method={}&api_key={}&format=json&nojsoncallback=1",
            REST_ENDPOINT,
            urlencoding::encode(method),
            urlencoding::encode(&self.api_key)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// Execute one API call and return the validated response body.
    ///
    /// The cache key covers the method and its parameters but not the API
    /// key, so cached entries survive a credential rotation.
    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Bytes> {
        let cache_key = ResponseCache::cache_key(method, params);

        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&cache_key).await {
                return Ok(body);
            }
        }

        let url = self.build_url(method, params);
        debug!(method, "Calling Flickr API");

        let response = self.http.execute(HttpRequest::new(HttpMethod::Get, url)).await?;
        if !response.is_success() {
            return Err(FlickrError::Http {
                status: response.status,
            });
        }

        let status: ApiStatus = serde_json::from_slice(&response.body)
            .map_err(|e| FlickrError::Parse(e.to_string()))?;
        if status.stat != "ok" {
            return Err(FlickrError::Api {
                code: status.code.unwrap_or(0),
                message: status
                    .message
                    .unwrap_or_else(|| "unknown API failure".to_string()),
            });
        }

        if let Some(cache) = &self.cache {
            cache.put(&cache_key, &response.body).await;
        }

        Ok(response.body)
    }

    fn parse<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
        serde_json::from_slice(body).map_err(|e| FlickrError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MediaSource for FlickrConnector {
    #[instrument(skip(self))]
    async fn list_albums(&self) -> bridge_traits::error::Result<Vec<Album>> {
        let mut albums = Vec::new();
        let mut page = 1u32;

        loop {
            let params = [
                ("user_id", self.user_id.clone()),
                ("page", page.to_string()),
                ("per_page", PER_PAGE.to_string()),
            ];
            let body = self.call("flickr.photosets.getList", &params).await?;
            let response: PhotosetsGetListResponse = Self::parse(&body)?;

            albums.extend(response.photosets.photoset.into_iter().map(|set| Album {
                id: set.id,
                title: set.title.content,
            }));

            if response.photosets.page >= response.photosets.pages {
                break;
            }
            page += 1;
        }

        debug!(count = albums.len(), "Listed albums");
        Ok(albums)
    }

    #[instrument(skip(self, album), fields(album = %album.title))]
    async fn list_album_items(
        &self,
        album: &Album,
    ) -> bridge_traits::error::Result<Vec<MediaItem>> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let params = [
                ("photoset_id", album.id.clone()),
                ("user_id", self.user_id.clone()),
                ("extras", "media,original_format".to_string()),
                ("page", page.to_string()),
                ("per_page", PER_PAGE.to_string()),
            ];
            let body = self.call("flickr.photosets.getPhotos", &params).await?;
            let response: PhotosetGetPhotosResponse = Self::parse(&body)?;

            items.extend(response.photoset.photo.into_iter().map(|photo| MediaItem {
                id: photo.id,
                title: photo.title,
                kind: MediaKind::from_wire(&photo.media),
                format: photo.originalformat.unwrap_or_else(|| "jpg".to_string()),
                server: photo.server,
                secret: photo.originalsecret.unwrap_or_default(),
            }));

            if response.photoset.page >= response.photoset.pages {
                break;
            }
            page += 1;
        }

        debug!(count = items.len(), "Listed album items");
        Ok(items)
    }

    fn source_url(&self, item: &MediaItem) -> String {
        match item.kind {
            MediaKind::Photo => format!(
                "https://live.staticflickr.com/{}/{}_{}_o.{}",
                item.server, item.id, item.secret, item.format
            ),
            // Original video payloads are only served through the site URL,
            // not the static CDN.
            MediaKind::Video => format!(
                "https://www.flickr.com/photos/{}/{}/play/orig/{}/",
                self.user_id, item.id, item.secret
            ),
        }
    }
}

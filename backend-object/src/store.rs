//! Object store gateway client implementation

use async_trait::async_trait;
use bridge_traits::backup::BackupStore;
use bridge_traits::error::Result;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::ObjectStoreError;
use crate::types::ListObjectsResponse;

/// Object store backup target: a bucket plus key prefix.
///
/// All three operations address the same key space: the caller's object key
/// with the configured prefix prepended. Listing strips the prefix again so
/// callers only ever see their own keys.
pub struct ObjectStore {
    http: Arc<dyn HttpClient>,
    endpoint: String,
    bucket: String,
    prefix: String,
}

impl ObjectStore {
    /// Create a store against `endpoint`, writing into `bucket` under
    /// `prefix` (pass an empty prefix to use the bucket root).
    pub fn new(
        http: Arc<dyn HttpClient>,
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Caller key -> full key inside the bucket.
    fn full_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.prefix, key)
        }
    }

    /// Full key -> URL, encoding each path segment.
    fn object_url(&self, full_key: &str) -> String {
        let encoded: Vec<String> = full_key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}/{}", self.endpoint, self.bucket, encoded.join("/"))
    }

    fn list_url(&self, full_prefix: &str, token: Option<&str>) -> String {
        let mut url = format!(
            "{}/{}?list-type=2&prefix={}",
            self.endpoint,
            self.bucket,
            urlencoding::encode(full_prefix)
        );
        if let Some(token) = token {
            url.push_str(&format!(
                "&continuation-token={}",
                urlencoding::encode(token)
            ));
        }
        url
    }
}

#[async_trait]
impl BackupStore for ObjectStore {
    /// Metadata-only lookup. A 404 answer means the object is absent; any
    /// other non-2xx answer propagates as an error, never as absence.
    #[instrument(skip(self))]
    async fn exists(&self, key: &str) -> Result<bool> {
        let url = self.object_url(&self.full_key(key));
        let response = self
            .http
            .execute(HttpRequest::new(HttpMethod::Head, url))
            .await?;

        if response.is_success() {
            debug!(key, "Object present");
            Ok(true)
        } else if response.status == 404 {
            debug!(key, "Object absent");
            Ok(false)
        } else {
            Err(ObjectStoreError::Api {
                status: response.status,
                message: format!("Existence check failed for {}", key),
            }
            .into())
        }
    }

    /// Follows continuation tokens until exhausted and returns the union of
    /// all pages, with the store prefix stripped.
    #[instrument(skip(self))]
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        // Trailing slash keeps "Trip" from matching "Trip 2/..".
        let full_prefix = format!("{}/", self.full_key(prefix));
        let strip = if self.prefix.is_empty() {
            String::new()
        } else {
            format!("{}/", self.prefix)
        };

        let mut keys = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let url = self.list_url(&full_prefix, token.as_deref());
            let response = self
                .http
                .execute(HttpRequest::new(HttpMethod::Get, url))
                .await?;

            if !response.is_success() {
                return Err(ObjectStoreError::Api {
                    status: response.status,
                    message: format!("Listing failed for prefix {}", prefix),
                }
                .into());
            }

            let page: ListObjectsResponse = serde_json::from_slice(&response.body)
                .map_err(|e| ObjectStoreError::Parse(e.to_string()))?;

            for entry in page.objects {
                let key = entry
                    .key
                    .strip_prefix(&strip)
                    .unwrap_or(&entry.key)
                    .to_string();
                keys.push(key);
            }

            match page.next_continuation_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!(prefix, count = keys.len(), "Listed object prefix");
        Ok(keys)
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn write(&self, key: &str, data: Bytes) -> Result<()> {
        let url = self.object_url(&self.full_key(key));
        let request = HttpRequest::new(HttpMethod::Put, url)
            .header("Content-Type", "application/octet-stream")
            .body(data);

        let response = self.http.execute(request).await?;

        if !response.is_success() {
            return Err(ObjectStoreError::Api {
                status: response.status,
                message: format!("Write failed for {}", key),
            }
            .into());
        }

        debug!(key, "Wrote backup object");
        Ok(())
    }
}

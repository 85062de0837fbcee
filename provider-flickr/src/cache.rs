//! Write-once response cache for metadata calls
//!
//! Entries are keyed by a SHA-256 hash of the method name and its
//! parameters and never expire or get invalidated, within or across runs.
//! The cache is read-through: a miss falls through to the network and the
//! response is stored on the way back.

use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Filesystem-backed write-once cache.
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache key for a call: SHA-256 over the method name and its sorted
    /// `key=value` parameters, hex-encoded. Parameter order does not matter.
    pub fn cache_key(method: &str, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        sorted.sort();

        let mut hasher = Sha256::new();
        hasher.update(method.as_bytes());
        for param in &sorted {
            hasher.update(param.as_bytes());
        }

        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Look up a cached response. Any read failure is a miss.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        match fs::read(self.entry_path(key)).await {
            Ok(data) => {
                debug!(key, "Response cache hit");
                Some(Bytes::from(data))
            }
            Err(_) => None,
        }
    }

    /// Store a response. Entries are write-once: an existing entry is left
    /// untouched. A failed write is logged and ignored; caching is an
    /// optimization, never a correctness requirement.
    pub async fn put(&self, key: &str, body: &Bytes) {
        let path = self.entry_path(key);

        if fs::try_exists(&path).await.unwrap_or(false) {
            return;
        }

        if let Err(e) = fs::create_dir_all(&self.dir).await {
            debug!(key, error = %e, "Response cache directory creation failed");
            return;
        }

        if let Err(e) = fs::write(&path, body.as_ref()).await {
            debug!(key, error = %e, "Response cache write failed");
        }
    }
}

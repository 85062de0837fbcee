//! # Local Filesystem Backend
//!
//! Implements [`BackupStore`] over a directory subtree. Object keys map
//! directly onto paths under the configured root, so the album title becomes
//! a directory and the file stem a file inside it.

use async_trait::async_trait;
use bridge_traits::backup::BackupStore;
use bridge_traits::error::Result;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

/// Filesystem-backed backup store rooted at a directory.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root`. The directory does not have to
    /// exist yet; it is created on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl BackupStore for LocalStore {
    #[instrument(skip(self))]
    async fn exists(&self, key: &str) -> Result<bool> {
        let present = fs::try_exists(self.resolve(key)).await?;
        debug!(key, present, "Probed backup path");
        Ok(present)
    }

    #[instrument(skip(self))]
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = self.resolve(prefix);

        // An absent directory is the correct "nothing backed up yet" state.
        let mut read_dir = match fs::read_dir(&dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            keys.push(format!("{}/{}", prefix, name));
        }

        debug!(prefix, count = keys.len(), "Listed backup prefix");
        Ok(keys)
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn write(&self, key: &str, data: Bytes) -> Result<()> {
        let path = self.resolve(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data.as_ref()).await?;
        debug!(key, "Wrote backup object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use uuid::Uuid;

    fn scratch_store() -> (PathBuf, LocalStore) {
        let root = env::temp_dir().join(format!("backend-local-test-{}", Uuid::new_v4()));
        (root.clone(), LocalStore::new(root))
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let (root, store) = scratch_store();

        let keys = store.list("Trip").await.unwrap();
        assert!(keys.is_empty());

        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn test_write_then_exists_and_list() {
        let (root, store) = scratch_store();

        assert!(!store.exists("Trip/sunset.jpg").await.unwrap());

        store
            .write("Trip/sunset.jpg", Bytes::from_static(b"pixels"))
            .await
            .unwrap();

        assert!(store.exists("Trip/sunset.jpg").await.unwrap());

        let keys = store.list("Trip").await.unwrap();
        assert_eq!(keys, vec!["Trip/sunset.jpg".to_string()]);

        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let (root, store) = scratch_store();

        store
            .write("Trip/a.jpg", Bytes::from_static(b"old"))
            .await
            .unwrap();
        store
            .write("Trip/a.jpg", Bytes::from_static(b"new"))
            .await
            .unwrap();

        let written = fs::read(root.join("Trip/a.jpg")).await.unwrap();
        assert_eq!(written, b"new");

        let _ = fs::remove_dir_all(&root).await;
    }
}

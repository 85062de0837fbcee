//! # Sync Run Configuration
//!
//! Holds everything one backup run depends on: the selected backend, the
//! remote-library credentials and identity, the optional album-title filter
//! and the optional metadata response cache. Built once in the entry point
//! via [`SyncConfig::builder()`] with fail-fast validation, then threaded
//! explicitly into the orchestrator — there is no process-wide state.
//!
//! ## Backend selection
//!
//! The backend is a closed enum, [`BackendChoice`]. Adding a backend means
//! adding a variant and satisfying the exhaustive match in the entry point,
//! a compile-time-checked exercise rather than stringly-typed dispatch.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::{BackendChoice, SyncConfig};
//!
//! let config = SyncConfig::builder()
//!     .backend(BackendChoice::Local { root: "/backups/photos".into() })
//!     .api_key("key")
//!     .user_id("12345678@N00")
//!     .build()
//!     .expect("Failed to build config");
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// The selected backup target, one variant per supported backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    /// A directory subtree on the local filesystem.
    Local { root: PathBuf },
    /// A namespace in a remote object store.
    ObjectStore {
        endpoint: String,
        bucket: String,
        /// Key prefix inside the bucket; may be empty.
        prefix: String,
    },
}

/// Configuration for one sync run.
///
/// Use [`SyncConfigBuilder`] to construct instances.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Selected backup backend.
    pub backend: BackendChoice,

    /// Remote metadata API key.
    pub api_key: String,

    /// Remote user identity (opaque user id).
    pub user_id: String,

    /// URL path alias of the user, used to build human-followable item
    /// locators in duplicate reports. Defaults to `user_id`.
    pub path_alias: String,

    /// When present, only albums whose title is a member are processed.
    pub album_filter: Option<HashSet<String>>,

    /// Directory for the write-once metadata response cache; `None`
    /// disables caching.
    pub cache_dir: Option<PathBuf>,
}

impl SyncConfig {
    /// Creates a new builder for constructing a `SyncConfig`.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key cannot be empty".to_string()));
        }

        if self.user_id.is_empty() {
            return Err(Error::Config("User id cannot be empty".to_string()));
        }

        match &self.backend {
            BackendChoice::Local { root } => {
                if root.as_os_str().is_empty() {
                    return Err(Error::Config(
                        "Local backend root cannot be empty".to_string(),
                    ));
                }
            }
            BackendChoice::ObjectStore {
                endpoint, bucket, ..
            } => {
                if endpoint.is_empty() {
                    return Err(Error::Config(
                        "Object store endpoint cannot be empty".to_string(),
                    ));
                }
                if bucket.is_empty() {
                    return Err(Error::Config(
                        "Object store bucket cannot be empty".to_string(),
                    ));
                }
            }
        }

        if let Some(filter) = &self.album_filter {
            if filter.is_empty() {
                return Err(Error::Config(
                    "Album filter, when set, must name at least one album".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for [`SyncConfig`] instances.
#[derive(Default)]
pub struct SyncConfigBuilder {
    backend: Option<BackendChoice>,
    api_key: Option<String>,
    user_id: Option<String>,
    path_alias: Option<String>,
    album_filter: Option<HashSet<String>>,
    cache_dir: Option<PathBuf>,
}

impl SyncConfigBuilder {
    /// Sets the backup backend (required).
    pub fn backend(mut self, backend: BackendChoice) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the metadata API key (required).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the remote user id (required).
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Sets the URL path alias used in duplicate-report locators.
    ///
    /// Defaults to the user id when not set.
    pub fn path_alias(mut self, alias: impl Into<String>) -> Self {
        self.path_alias = Some(alias.into());
        self
    }

    /// Restricts the run to albums whose title is in `titles`.
    pub fn album_filter(mut self, titles: HashSet<String>) -> Self {
        self.album_filter = Some(titles);
        self
    }

    /// Enables the metadata response cache under `dir`.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Builds the final `SyncConfig`, validating required fields.
    pub fn build(self) -> Result<SyncConfig> {
        let backend = self.backend.ok_or_else(|| {
            Error::Config("Backend is required. Use .backend() to select one.".to_string())
        })?;

        let api_key = self.api_key.ok_or_else(|| {
            Error::Config("API key is required. Use .api_key() to set it.".to_string())
        })?;

        let user_id = self.user_id.ok_or_else(|| {
            Error::Config("User id is required. Use .user_id() to set it.".to_string())
        })?;

        let path_alias = self.path_alias.unwrap_or_else(|| user_id.clone());

        let config = SyncConfig {
            backend,
            api_key,
            user_id,
            path_alias,
            album_filter: self.album_filter,
            cache_dir: self.cache_dir,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_backend() -> BackendChoice {
        BackendChoice::Local {
            root: PathBuf::from("/backups"),
        }
    }

    #[test]
    fn test_builder_with_all_required_fields() {
        let config = SyncConfig::builder()
            .backend(local_backend())
            .api_key("key")
            .user_id("12345678@N00")
            .build()
            .unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.path_alias, "12345678@N00"); // Defaulted
        assert!(config.album_filter.is_none());
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_builder_requires_backend() {
        let result = SyncConfig::builder()
            .api_key("key")
            .user_id("user")
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Backend is required"));
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = SyncConfig::builder()
            .backend(local_backend())
            .user_id("user")
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("API key is required"));
    }

    #[test]
    fn test_validate_rejects_empty_object_store_bucket() {
        let result = SyncConfig::builder()
            .backend(BackendChoice::ObjectStore {
                endpoint: "https://store.example.com".to_string(),
                bucket: String::new(),
                prefix: String::new(),
            })
            .api_key("key")
            .user_id("user")
            .build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("bucket"));
    }

    #[test]
    fn test_validate_rejects_empty_filter_set() {
        let result = SyncConfig::builder()
            .backend(local_backend())
            .api_key("key")
            .user_id("user")
            .album_filter(HashSet::new())
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_path_alias_override() {
        let config = SyncConfig::builder()
            .backend(local_backend())
            .api_key("key")
            .user_id("12345678@N00")
            .path_alias("holidaysnaps")
            .build()
            .unwrap();

        assert_eq!(config.path_alias, "holidaysnaps");
    }
}

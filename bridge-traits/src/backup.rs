//! Backup Store Abstraction
//!
//! The three-operation contract every backup target satisfies. The album
//! reconciler is written against this trait only; no variant may require
//! special-casing in the caller.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// A backup storage target.
///
/// Invariant: `exists` and `write` operate on the same key space that
/// `list` enumerates. Keys are `/`-separated object keys of the form
/// `"<album title>/<file name>"`.
#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Check whether an object exists under `key`.
    ///
    /// A "not found" outcome maps to `Ok(false)`; any other failure
    /// propagates as an error and is never silently treated as absence.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// List the keys directly under `prefix`.
    ///
    /// A prefix with nothing backed up yet yields `Ok(vec![])`, not an
    /// error. Order is not significant.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Write the full payload under `key`, creating any missing namespace
    /// structure. Overwrite semantics are last-write-wins, but the engine
    /// only writes after `exists` returned `false`.
    async fn write(&self, key: &str, data: Bytes) -> Result<()>;
}

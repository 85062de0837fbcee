use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Errors of a backup run.
///
/// Every variant carries the album or item identifiers needed to locate the
/// failure by hand; a re-run after fixing the cause picks up where the
/// backup is incomplete.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to list albums: {source}")]
    Albums { source: BridgeError },

    #[error("Failed to list items of album '{album}': {source}")]
    Listing { album: String, source: BridgeError },

    #[error("Store operation '{op}' failed for '{key}': {source}")]
    Store {
        op: &'static str,
        key: String,
        source: BridgeError,
    },

    #[error("Transfer of '{key}' from {url} failed: {source}")]
    Transfer {
        key: String,
        url: String,
        source: BridgeError,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;

//! # Object Store Backend
//!
//! Implements [`BackupStore`](bridge_traits::backup::BackupStore) against a
//! remote object store's HTTP gateway: a bucket plus key prefix forms the
//! backup namespace.
//!
//! ## Overview
//!
//! - Existence checks are metadata-only `HEAD` lookups; a 404 maps to
//!   "absent", anything else fails loudly
//! - Listing paginates transparently via continuation tokens
//! - Writes are full-body `PUT`s

pub mod error;
pub mod store;
pub mod types;

pub use error::{ObjectStoreError, Result};
pub use store::ObjectStore;

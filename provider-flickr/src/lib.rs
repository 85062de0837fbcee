//! # Flickr Provider
//!
//! Implements the `MediaSource` trait for the Flickr REST API.
//!
//! ## Overview
//!
//! This module provides:
//! - Paginated photoset (album) listing
//! - Paginated photoset photo listing with media kind and original format
//! - Original-payload URL construction for photos and videos
//! - Optional write-once response caching keyed by (method, parameters)

pub mod cache;
pub mod connector;
pub mod error;
pub mod types;

pub use cache::ResponseCache;
pub use connector::FlickrConnector;
pub use error::{FlickrError, Result};

//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits for desktop platforms
//! (macOS, Windows, Linux). Currently this is the reqwest-backed
//! [`HttpClient`](bridge_traits::http::HttpClient).

pub mod http;

pub use http::ReqwestHttpClient;

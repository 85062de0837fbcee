//! Error types for the Flickr provider

use thiserror::Error;

/// Flickr provider errors
#[derive(Error, Debug)]
pub enum FlickrError {
    /// The API answered `stat=fail` (bad key, unknown user, ...)
    #[error("Flickr API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// The transport answered with an unexpected HTTP status
    #[error("Flickr HTTP error (status {status})")]
    Http { status: u16 },

    /// Failed to parse an API response
    #[error("Failed to parse Flickr response: {0}")]
    Parse(String),

    /// Bridge error
    #[error(transparent)]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

/// Result type for Flickr operations
pub type Result<T> = std::result::Result<T, FlickrError>;

impl From<FlickrError> for bridge_traits::error::BridgeError {
    fn from(error: FlickrError) -> Self {
        match error {
            FlickrError::Api { code, message } => {
                bridge_traits::error::BridgeError::OperationFailed(format!(
                    "Flickr API error (code {}): {}",
                    code, message
                ))
            }
            FlickrError::Http { status } => bridge_traits::error::BridgeError::Status {
                status,
                message: "Flickr request failed".to_string(),
            },
            FlickrError::Parse(msg) => {
                bridge_traits::error::BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            FlickrError::Bridge(e) => e,
        }
    }
}

//! Error types for the object store backend

use thiserror::Error;

/// Object store backend errors
#[derive(Error, Debug)]
pub enum ObjectStoreError {
    /// The gateway answered with an unexpected status
    #[error("Object store error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a listing response
    #[error("Failed to parse object store response: {0}")]
    Parse(String),

    /// Bridge error
    #[error(transparent)]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

/// Result type for object store operations
pub type Result<T> = std::result::Result<T, ObjectStoreError>;

impl From<ObjectStoreError> for bridge_traits::error::BridgeError {
    fn from(error: ObjectStoreError) -> Self {
        match error {
            ObjectStoreError::Api { status, message } => {
                bridge_traits::error::BridgeError::Status { status, message }
            }
            ObjectStoreError::Parse(msg) => {
                bridge_traits::error::BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            ObjectStoreError::Bridge(e) => e,
        }
    }
}

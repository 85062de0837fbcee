use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Unexpected response status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

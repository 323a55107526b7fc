//! Error types for the DevBytes provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// DevBytes provider errors
#[derive(Error, Debug)]
pub enum DevBytesError {
    /// Server answered with a non-success status
    #[error("DevBytes API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Feed entry without a usable key
    #[error("Playlist entry {index} has neither id nor url")]
    MissingKey { index: usize },

    /// Transport error from the HTTP bridge
    #[error(transparent)]
    BridgeError(#[from] BridgeError),
}

/// Result type for DevBytes operations
pub type Result<T> = std::result::Result<T, DevBytesError>;

impl From<DevBytesError> for BridgeError {
    fn from(error: DevBytesError) -> Self {
        match error {
            DevBytesError::ApiError {
                status_code,
                message,
            } => BridgeError::Network(format!("API error (status {}): {}", status_code, message)),
            err @ DevBytesError::MissingKey { .. } => BridgeError::Decode(err.to_string()),
            DevBytesError::BridgeError(e) => e,
        }
    }
}

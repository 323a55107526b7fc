use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Remote payload could not be decoded: {0}")]
    Decode(String),
}

impl BridgeError {
    /// Whether the failure happened on the wire rather than in the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, BridgeError::Network(_))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

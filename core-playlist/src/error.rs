use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaylistError {
    /// The remote playlist could not be fetched or decoded
    #[error("Fetch error: {0}")]
    Fetch(#[from] BridgeError),

    /// The store could not commit or read a batch
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    /// A background refresh or write task was torn down before it finished
    #[error("Background task cancelled")]
    Cancelled,
}

impl PlaylistError {
    /// Whether the failure happened before anything reached the store.
    pub fn is_fetch(&self) -> bool {
        matches!(self, PlaylistError::Fetch(_))
    }
}

pub type Result<T> = std::result::Result<T, PlaylistError>;

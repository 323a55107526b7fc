use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("Playlist error: {0}")]
    Playlist(#[from] core_playlist::PlaylistError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

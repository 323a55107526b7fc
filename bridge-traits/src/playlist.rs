//! Playlist Fetcher Abstraction
//!
//! The playlist cache consumes exactly one remote capability: "give me the
//! current playlist". Concrete providers (see `provider-devbytes`) decide the
//! endpoint and wire format and hand back [`RemotePlaylistEntry`] values.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One video as returned by a remote playlist provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePlaylistEntry {
    /// Natural key of the video
    pub id: String,
    pub title: String,
    pub description: String,
    /// Playback URL
    pub url: String,
    pub thumbnail_url: String,
    /// Provider-side last-modified marker, if any (not persisted)
    pub updated: Option<String>,
}

impl RemotePlaylistEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            url: url.into(),
            thumbnail_url: String::new(),
            updated: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = thumbnail_url.into();
        self
    }
}

/// Remote source of the current playlist.
///
/// # Errors
///
/// Implementations report transport failures as `BridgeError::Network` and
/// undecodable payloads as `BridgeError::Decode`. They must not retry on
/// behalf of the caller beyond what the injected transport already does.
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    /// Fetch the full current playlist.
    async fn get_playlist(&self) -> Result<Vec<RemotePlaylistEntry>>;
}

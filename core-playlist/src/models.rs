//! Playlist data model
//!
//! [`StoredVideo`] is the row shape of the `videos` table; [`Video`] is what
//! consumers see. The two are kept apart so a schema change never ripples
//! into observers.

use bridge_traits::error::BridgeError;
use bridge_traits::playlist::RemotePlaylistEntry;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One cached video, keyed by `id`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredVideo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl StoredVideo {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            url: url.into(),
            thumbnail_url: String::new(),
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

    /// Validate video data
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Video id cannot be empty".to_string());
        }

        if self.url.trim().is_empty() {
            return Err(format!("Video '{}' has no url", self.id));
        }

        Ok(())
    }
}

impl TryFrom<RemotePlaylistEntry> for StoredVideo {
    type Error = BridgeError;

    fn try_from(entry: RemotePlaylistEntry) -> Result<Self, Self::Error> {
        let video = StoredVideo {
            id: entry.id,
            title: entry.title,
            description: entry.description,
            url: entry.url,
            thumbnail_url: entry.thumbnail_url,
        };

        video
            .validate()
            .map_err(|msg| BridgeError::Decode(format!("Malformed playlist entry: {}", msg)))?;

        Ok(video)
    }
}

/// Read-only video as handed to observers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl From<&StoredVideo> for Video {
    fn from(stored: &StoredVideo) -> Self {
        Self {
            id: stored.id.clone(),
            title: stored.title.clone(),
            description: stored.description.clone(),
            url: stored.url.clone(),
            thumbnail_url: stored.thumbnail_url.clone(),
        }
    }
}

impl From<StoredVideo> for Video {
    fn from(stored: StoredVideo) -> Self {
        Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            url: stored.url,
            thumbnail_url: stored.thumbnail_url,
        }
    }
}

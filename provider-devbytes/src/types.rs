//! DevBytes feed response types
//!
//! The feed is a single JSON document:
//!
//! ```json
//! {
//!   "videos": [
//!     {
//!       "title": "Android Jetpack: EmojiCompat",
//!       "description": "...",
//!       "url": "https://www.youtube.com/watch?v=sYGKUtM2ga8",
//!       "updated": "2018-06-07T17:09:43+00:00",
//!       "thumbnail": "https://i4.ytimg.com/vi/sYGKUtM2ga8/hqdefault.jpg",
//!       "closedCaptions": null
//!     }
//!   ]
//! }
//! ```

use bridge_traits::playlist::RemotePlaylistEntry;
use serde::{Deserialize, Serialize};

use crate::error::{DevBytesError, Result};

/// Top-level feed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkVideoContainer {
    pub videos: Vec<NetworkVideo>,
}

/// One video in the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkVideo {
    /// Explicit key. The public feed omits it and is keyed by `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub url: String,

    #[serde(default)]
    pub updated: Option<String>,

    #[serde(default)]
    pub thumbnail: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_captions: Option<String>,
}

impl NetworkVideo {
    /// Key used for the cache: the explicit id, falling back to the url.
    pub fn key(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| Some(self.url.as_str()).filter(|url| !url.trim().is_empty()))
    }
}

impl NetworkVideoContainer {
    /// Convert the whole feed, failing on the first entry without a key.
    pub fn into_entries(self) -> Result<Vec<RemotePlaylistEntry>> {
        self.videos
            .into_iter()
            .enumerate()
            .map(|(index, video)| {
                let id = video
                    .key()
                    .map(str::to_string)
                    .ok_or(DevBytesError::MissingKey { index })?;

                Ok(RemotePlaylistEntry {
                    id,
                    title: video.title,
                    description: video.description,
                    url: video.url,
                    thumbnail_url: video.thumbnail,
                    updated: video.updated,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_public_feed_shape() {
        let json = r#"{
            "videos": [
                {
                    "title": "Intro",
                    "description": "Getting started",
                    "url": "http://a",
                    "updated": "2018-06-07T17:09:43+00:00",
                    "thumbnail": "http://a/thumb.jpg",
                    "closedCaptions": null
                }
            ]
        }"#;

        let container: NetworkVideoContainer = serde_json::from_str(json).unwrap();
        let entries = container.into_entries().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "http://a");
        assert_eq!(entries[0].thumbnail_url, "http://a/thumb.jpg");
        assert_eq!(
            entries[0].updated.as_deref(),
            Some("2018-06-07T17:09:43+00:00")
        );
    }

    #[test]
    fn test_explicit_id_wins_over_url() {
        let json = r#"{"videos":[{"id":"1","title":"Intro","url":"http://a"}]}"#;

        let container: NetworkVideoContainer = serde_json::from_str(json).unwrap();
        let entries = container.into_entries().unwrap();

        assert_eq!(entries[0].id, "1");
        assert_eq!(entries[0].description, "");
    }

    #[test]
    fn test_entry_without_key_is_rejected() {
        let json = r#"{"videos":[
            {"id":"1","title":"Intro","url":"http://a"},
            {"title":"Broken","url":"  "}
        ]}"#;

        let container: NetworkVideoContainer = serde_json::from_str(json).unwrap();
        let result = container.into_entries();

        assert!(matches!(result, Err(DevBytesError::MissingKey { index: 1 })));
    }

    #[test]
    fn test_missing_videos_field_fails_to_decode() {
        let result: std::result::Result<NetworkVideoContainer, _> =
            serde_json::from_str(r#"{"items":[]}"#);
        assert!(result.is_err());
    }
}

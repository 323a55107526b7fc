//! DevBytes feed connector
//!
//! Implements the `PlaylistFetcher` trait over an injected `HttpClient`.

use async_trait::async_trait;
use bridge_traits::error::Result;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::playlist::{PlaylistFetcher, RemotePlaylistEntry};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::DevBytesError;
use crate::types::NetworkVideoContainer;

/// Public DevBytes feed host
pub const DEFAULT_BASE_URL: &str = "https://devbytes.udacity.com/";

/// Path of the playlist document, relative to the base URL
const PLAYLIST_PATH: &str = "devbytes.json";

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// DevBytes playlist connector
///
/// # Example
///
/// ```ignore
/// use provider_devbytes::DevBytesConnector;
/// use bridge_traits::playlist::PlaylistFetcher;
///
/// let connector = DevBytesConnector::new(http_client, provider_devbytes::DEFAULT_BASE_URL);
/// let entries = connector.get_playlist().await?;
/// ```
pub struct DevBytesConnector {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout: Duration,
}

impl DevBytesConnector {
    /// Create a connector for the feed hosted at `base_url`
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the playlist document
    pub fn playlist_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), PLAYLIST_PATH)
    }

    fn check_status(response: &HttpResponse) -> crate::Result<()> {
        if response.is_success() {
            return Ok(());
        }

        warn!(status = response.status, "Playlist request failed");
        Err(DevBytesError::ApiError {
            status_code: response.status,
            message: response.text_lossy(),
        })
    }

    fn decode(response: &HttpResponse) -> crate::Result<Vec<RemotePlaylistEntry>> {
        let container: NetworkVideoContainer = response.json()?;
        container.into_entries()
    }
}

#[async_trait]
impl PlaylistFetcher for DevBytesConnector {
    #[instrument(skip(self))]
    async fn get_playlist(&self) -> Result<Vec<RemotePlaylistEntry>> {
        let url = self.playlist_url();
        debug!(url = %url, "Fetching DevBytes playlist");

        let request = HttpRequest::get(url)
            .accept_json()
            .timeout(self.timeout);

        let response = self.http_client.execute(request).await?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "Playlist response received"
        );

        Self::check_status(&response)?;
        let entries = Self::decode(&response)?;

        info!("Retrieved {} videos from DevBytes", entries.len());
        Ok(entries)
    }
}

//! # Core Configuration Module
//!
//! The configuration system uses a builder to construct a [`CoreConfig`]
//! holding every dependency and setting the playlist core needs. `build()`
//! validates fail-fast so a misconfigured host learns about it at startup,
//! not on the first refresh.
//!
//! ## Required Dependencies
//!
//! One of:
//! - `HttpClient` - used by the default DevBytes connector
//! - `PlaylistFetcher` - replaces the default connector entirely
//!
//! When the `desktop-shims` feature is enabled and neither is provided, a
//! `bridge_desktop::ReqwestHttpClient` is injected automatically.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .database_path("/data/user/0/app/databases/videos.db")
//!     .http_client(Arc::new(MyHttpClient))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HttpClient, PlaylistFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Host serving the DevBytes playlist document
pub const DEFAULT_PLAYLIST_BASE_URL: &str = "https://devbytes.udacity.com/";

/// Default timeout for a single playlist request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default upper bound for pooled database connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Core configuration for the playlist cache.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// SQLite database file; `None` keeps the cache in memory
    pub database_path: Option<PathBuf>,

    /// Maximum pooled database connections (file-backed databases only)
    pub max_connections: u32,

    /// Base URL of the playlist feed
    pub playlist_base_url: String,

    /// Timeout for a single playlist request
    pub request_timeout: Duration,

    /// HTTP transport for the default connector
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Custom playlist source; takes precedence over `http_client`
    pub playlist_fetcher: Option<Arc<dyn PlaylistFetcher>>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("database_path", &self.database_path)
            .field("max_connections", &self.max_connections)
            .field("playlist_base_url", &self.playlist_base_url)
            .field("request_timeout", &self.request_timeout)
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field(
                "playlist_fetcher",
                &self
                    .playlist_fetcher
                    .as_ref()
                    .map(|_| "PlaylistFetcher { ... }"),
            )
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Whether the cache lives only as long as the process.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.is_none()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Database path, when given, is not empty
    /// - Base URL is an http(s) URL
    /// - Timeout and connection count are positive
    /// - A playlist source can be built
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::Config("Database path cannot be empty".to_string()));
            }
        }

        if self.max_connections == 0 {
            return Err(Error::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        let url = self.playlist_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Playlist base URL must start with http:// or https://, got '{}'",
                self.playlist_base_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.http_client.is_none() && self.playlist_fetcher.is_none() {
            return Err(playlist_source_missing_error());
        }

        Ok(())
    }
}

fn playlist_source_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client or playlist fetcher provided. \
                 Desktop: enable the 'desktop-shims' feature to use ReqwestHttpClient. \
                 Mobile: inject a platform-native HttpClient adapter."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(timeout));
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    Err(playlist_source_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    database_path: Option<PathBuf>,
    max_connections: Option<u32>,
    playlist_base_url: Option<String>,
    request_timeout: Option<Duration>,
    http_client: Option<Arc<dyn HttpClient>>,
    playlist_fetcher: Option<Arc<dyn PlaylistFetcher>>,
}

impl CoreConfigBuilder {
    /// Persist the cache in the SQLite file at `path`.
    ///
    /// Without this the cache is in-memory and starts empty on every launch.
    pub fn database_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Sets the maximum number of pooled database connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Sets the base URL of the playlist feed.
    pub fn playlist_base_url(mut self, url: impl Into<String>) -> Self {
        self.playlist_base_url = Some(url.into());
        self
    }

    /// Sets the timeout for a single playlist request.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the HTTP client used by the default connector.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the default connector with a custom playlist source.
    pub fn playlist_fetcher(mut self, fetcher: Arc<dyn PlaylistFetcher>) -> Self {
        self.playlist_fetcher = Some(fetcher);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] if no playlist source can be built
    /// - [`Error::Config`] if any value is out of range
    pub fn build(self) -> Result<CoreConfig> {
        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let http_client = match (self.http_client, &self.playlist_fetcher) {
            (Some(client), _) => Some(client),
            (None, Some(_)) => None,
            (None, None) => Some(provide_default_http_client(request_timeout)?),
        };

        let config = CoreConfig {
            database_path: self.database_path,
            max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
            playlist_base_url: self
                .playlist_base_url
                .unwrap_or_else(|| DEFAULT_PLAYLIST_BASE_URL.to_string()),
            request_timeout,
            http_client,
            playlist_fetcher: self.playlist_fetcher,
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::{HttpRequest, HttpResponse, RemotePlaylistEntry};

    struct StubHttpClient;

    #[async_trait]
    impl HttpClient for StubHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Err(bridge_traits::BridgeError::Network("stub".to_string()))
        }
    }

    struct StubFetcher;

    #[async_trait]
    impl PlaylistFetcher for StubFetcher {
        async fn get_playlist(&self) -> BridgeResult<Vec<RemotePlaylistEntry>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_defaults_with_http_client() {
        let config = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .build()
            .unwrap();

        assert!(config.is_in_memory());
        assert_eq!(config.playlist_base_url, DEFAULT_PLAYLIST_BASE_URL);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(config.playlist_fetcher.is_none());
    }

    #[test]
    fn test_fetcher_alone_is_enough() {
        let config = CoreConfig::builder()
            .playlist_fetcher(Arc::new(StubFetcher))
            .database_path("/tmp/videos.db")
            .build()
            .unwrap();

        assert!(config.http_client.is_none());
        assert!(config.playlist_fetcher.is_some());
        assert!(!config.is_in_memory());
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_missing_playlist_source() {
        let result = CoreConfig::builder().build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "HttpClient");
            }
            other => panic!("expected CapabilityMissing, got {:?}", other),
        }
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_desktop_default_http_client() {
        let config = CoreConfig::builder().build().unwrap();
        assert!(config.http_client.is_some());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .playlist_base_url("ftp://devbytes")
            .build();

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("ftp://devbytes")));
    }

    #[test]
    fn test_rejects_zero_timeout_and_connections() {
        let zero_timeout = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(zero_timeout, Err(Error::Config(_))));

        let zero_connections = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .max_connections(0)
            .build();
        assert!(matches!(zero_connections, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_empty_database_path() {
        let result = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .database_path("")
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_hides_bridges() {
        let config = CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .build()
            .unwrap();

        let debug = format!("{:?}", config);
        assert!(debug.contains("HttpClient { ... }"));
        assert!(debug.contains("playlist_fetcher: None"));
    }
}

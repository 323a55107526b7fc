//! Core service façade and bootstrap helpers.
//!
//! This crate wires the host-provided bridges from a [`CoreConfig`] into the
//! playlist cache: it opens the database, builds the store, picks the
//! playlist fetcher and hands back a ready [`CoreService`].
//!
//! There is no global instance. Hosts either keep the `CoreService` they
//! bootstrapped, or own a [`CoreHandle`] when several entry points race to
//! initialize the core.

pub mod error;

pub use core_runtime::config::CoreConfig;
pub use error::{CoreError, Result};

use bridge_traits::PlaylistFetcher;
use core_playlist::db::{create_pool, DatabaseConfig};
use core_playlist::{SqliteVideoStore, VideoFeed, VideoStore, VideosRepository};
use provider_devbytes::DevBytesConnector;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    store: Arc<dyn VideoStore>,
    repository: Arc<VideosRepository>,
}

impl CoreService {
    /// Build a service from a validated configuration.
    ///
    /// Opens (or creates) the database, runs migrations, loads the cached
    /// playlist and wires the fetcher. No network traffic happens here.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Runtime`] if the configuration is invalid
    /// - [`CoreError::Playlist`] if the database cannot be opened or migrated
    /// - [`CoreError::CapabilityMissing`] if no playlist source is configured
    #[instrument(skip(config), fields(in_memory = config.is_in_memory()))]
    pub async fn bootstrap(config: CoreConfig) -> Result<Self> {
        config.validate()?;

        let db_config = match &config.database_path {
            Some(path) => DatabaseConfig::new(path).max_connections(config.max_connections),
            None => DatabaseConfig::in_memory(),
        };

        let pool = create_pool(db_config).await?;
        let store: Arc<dyn VideoStore> = Arc::new(SqliteVideoStore::new(pool).await?);
        let fetcher = build_fetcher(&config)?;
        let repository = Arc::new(VideosRepository::new(Arc::clone(&store), fetcher));

        info!("Core service ready");

        Ok(Self { store, repository })
    }

    /// Live playlist; see [`VideosRepository::videos`].
    pub fn videos(&self) -> VideoFeed {
        self.repository.videos()
    }

    /// Refresh the cached playlist from the network.
    ///
    /// Returns the number of videos written.
    pub async fn refresh_videos(&self) -> Result<usize> {
        Ok(self.repository.refresh().await?)
    }

    pub fn repository(&self) -> Arc<VideosRepository> {
        Arc::clone(&self.repository)
    }

    pub fn store(&self) -> Arc<dyn VideoStore> {
        Arc::clone(&self.store)
    }
}

/// Configured fetcher if any, else the DevBytes connector over the
/// configured HTTP client.
fn build_fetcher(config: &CoreConfig) -> Result<Arc<dyn PlaylistFetcher>> {
    if let Some(fetcher) = &config.playlist_fetcher {
        return Ok(Arc::clone(fetcher));
    }

    let http_client = config
        .http_client
        .clone()
        .ok_or_else(|| CoreError::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: "Required by the default DevBytes connector".to_string(),
        })?;

    let connector = DevBytesConnector::new(http_client, config.playlist_base_url.clone())
        .with_timeout(config.request_timeout);

    Ok(Arc::new(connector))
}

/// Host-owned, lazily initialized [`CoreService`].
///
/// Concurrent callers of [`get_or_init`](CoreHandle::get_or_init) await a
/// single bootstrap. A failed bootstrap leaves the handle empty, so the next
/// call tries again.
#[derive(Default)]
pub struct CoreHandle {
    cell: OnceCell<CoreService>,
}

impl CoreHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the service, bootstrapping it from `config` on first use.
    ///
    /// `config` is ignored once the service exists.
    pub async fn get_or_init(&self, config: CoreConfig) -> Result<&CoreService> {
        self.cell
            .get_or_try_init(|| CoreService::bootstrap(config))
            .await
    }

    /// The service, if it has been initialized.
    pub fn get(&self) -> Option<&CoreService> {
        self.cell.get()
    }
}

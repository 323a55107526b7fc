//! Playlist cache repository
//!
//! Owns the refresh workflow (fetch, map, persist) and exposes the cached
//! playlist as a live feed of [`Video`] values.

use crate::error::{PlaylistError, Result};
use crate::models::{StoredVideo, Video};
use crate::query::MappedQuery;
use crate::store::VideoStore;
use bridge_traits::playlist::PlaylistFetcher;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn, Instrument};

/// Live playlist as seen by observers
pub type VideoFeed = MappedQuery<StoredVideo, Video>;

/// Repository over the cached DevBytes playlist
///
/// # Example
///
/// ```ignore
/// let repository = VideosRepository::new(store, fetcher);
/// let mut feed = repository.videos();
///
/// repository.refresh().await?;
/// let videos = feed.next().await;
/// ```
pub struct VideosRepository {
    store: Arc<dyn VideoStore>,
    fetcher: Arc<dyn PlaylistFetcher>,
}

impl VideosRepository {
    pub fn new(store: Arc<dyn VideoStore>, fetcher: Arc<dyn PlaylistFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Live playlist projection.
    ///
    /// Resolves immediately with what is cached, then once per committed
    /// refresh. Each call creates an independent subscriber.
    pub fn videos(&self) -> VideoFeed {
        self.store.get_all().map(|stored| Video::from(stored))
    }

    /// Fetch the remote playlist and write it into the store.
    ///
    /// The work runs as a background task; dropping the returned future
    /// aborts it. Nothing is written unless the whole playlist was fetched
    /// and mapped. No retry is attempted.
    ///
    /// Returns the number of videos written.
    ///
    /// # Errors
    /// - `Fetch` if the fetcher fails or returns a malformed entry
    /// - `Persistence` if the batch could not be committed
    /// - `Cancelled` if the runtime shut the task down
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<usize> {
        let store = Arc::clone(&self.store);
        let fetcher = Arc::clone(&self.fetcher);

        let mut tasks = JoinSet::new();
        tasks.spawn(fetch_and_persist(store, fetcher).in_current_span());

        match tasks.join_next().await {
            Some(Ok(result)) => result,
            Some(Err(err)) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Some(Err(_)) | None => Err(PlaylistError::Cancelled),
        }
    }
}

async fn fetch_and_persist(
    store: Arc<dyn VideoStore>,
    fetcher: Arc<dyn PlaylistFetcher>,
) -> Result<usize> {
    let entries = fetcher.get_playlist().await.map_err(|e| {
        warn!(error = %e, "Playlist fetch failed");
        PlaylistError::Fetch(e)
    })?;

    let videos = entries
        .into_iter()
        .map(StoredVideo::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| {
            warn!(error = %e, "Playlist contained a malformed entry");
            PlaylistError::Fetch(e)
        })?;

    store.replace_all(&videos).await?;

    info!(written = videos.len(), "Playlist refreshed");
    Ok(videos.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::query::LiveQuery;
    use crate::store::SqliteVideoStore;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::playlist::RemotePlaylistEntry;
    use mockall::mock;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    mock! {
        Fetcher {}

        #[async_trait]
        impl PlaylistFetcher for Fetcher {
            async fn get_playlist(&self) -> BridgeResult<Vec<RemotePlaylistEntry>>;
        }
    }

    mock! {
        Store {}

        #[async_trait]
        impl VideoStore for Store {
            fn get_all(&self) -> LiveQuery<StoredVideo>;
            async fn replace_all(&self, videos: &[StoredVideo]) -> Result<()>;
            async fn find_by_id(&self, id: &str) -> Result<Option<StoredVideo>>;
            async fn count(&self) -> Result<i64>;
        }
    }

    async fn sqlite_store() -> Arc<SqliteVideoStore> {
        let pool = create_test_pool().await.unwrap();
        Arc::new(SqliteVideoStore::new(pool).await.unwrap())
    }

    #[tokio::test]
    async fn test_refresh_writes_fetched_playlist() {
        let store = sqlite_store().await;
        let mut fetcher = MockFetcher::new();
        fetcher.expect_get_playlist().times(1).returning(|| {
            Ok(vec![
                RemotePlaylistEntry::new("1", "Intro", "http://a"),
                RemotePlaylistEntry::new("2", "Advanced", "http://b"),
            ])
        });

        let repository = VideosRepository::new(store.clone(), Arc::new(fetcher));
        let written = repository.refresh().await.unwrap();

        assert_eq!(written, 2);
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(repository.videos().current().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_entry_writes_nothing() {
        let store = sqlite_store().await;
        let mut fetcher = MockFetcher::new();
        fetcher.expect_get_playlist().times(1).returning(|| {
            Ok(vec![
                RemotePlaylistEntry::new("1", "Intro", "http://a"),
                RemotePlaylistEntry::new("", "Broken", "http://b"),
            ])
        });

        let repository = VideosRepository::new(store.clone(), Arc::new(fetcher));
        let result = repository.refresh().await;

        assert!(matches!(result, Err(PlaylistError::Fetch(BridgeError::Decode(_)))));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_persistence_error_is_propagated() {
        let mut store = MockStore::new();
        store
            .expect_replace_all()
            .times(1)
            .returning(|_| Err(PlaylistError::Persistence(sqlx::Error::PoolTimedOut)));

        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_get_playlist()
            .returning(|| Ok(vec![RemotePlaylistEntry::new("1", "Intro", "http://a")]));

        let repository = VideosRepository::new(Arc::new(store), Arc::new(fetcher));
        let result = repository.refresh().await;

        assert!(matches!(result, Err(PlaylistError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_fetch_error_skips_store() {
        let mut store = MockStore::new();
        store.expect_replace_all().never();

        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_get_playlist()
            .returning(|| Err(BridgeError::Network("Connection reset".to_string())));

        let repository = VideosRepository::new(Arc::new(store), Arc::new(fetcher));
        let result = repository.refresh().await;

        assert!(matches!(result, Err(ref e) if e.is_fetch()));
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    struct HangingFetcher {
        dropped: Arc<AtomicBool>,
    }

    #[async_trait]
    impl PlaylistFetcher for HangingFetcher {
        async fn get_playlist(&self) -> BridgeResult<Vec<RemotePlaylistEntry>> {
            let _flag = DropFlag(Arc::clone(&self.dropped));
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_dropping_refresh_aborts_background_task() {
        let store = sqlite_store().await;
        let dropped = Arc::new(AtomicBool::new(false));
        let fetcher = HangingFetcher {
            dropped: Arc::clone(&dropped),
        };
        let repository = VideosRepository::new(store.clone(), Arc::new(fetcher));

        let outcome = tokio::time::timeout(Duration::from_millis(50), repository.refresh()).await;
        assert!(outcome.is_err(), "refresh should still be pending");

        tokio::time::timeout(Duration::from_secs(1), async {
            while !dropped.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("background fetch should be aborted");

        assert_eq!(store.count().await.unwrap(), 0);
    }

    struct PanickingFetcher;

    #[async_trait]
    impl PlaylistFetcher for PanickingFetcher {
        async fn get_playlist(&self) -> BridgeResult<Vec<RemotePlaylistEntry>> {
            panic!("feed exploded");
        }
    }

    #[tokio::test]
    #[should_panic(expected = "feed exploded")]
    async fn test_panic_in_refresh_reaches_caller() {
        let store = sqlite_store().await;
        let repository = VideosRepository::new(store, Arc::new(PanickingFetcher));

        let _ = repository.refresh().await;
    }
}

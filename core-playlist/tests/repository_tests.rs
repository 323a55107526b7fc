//! Integration tests for the playlist cache repository

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::playlist::{PlaylistFetcher, RemotePlaylistEntry};
use core_playlist::db::create_test_pool;
use core_playlist::{PlaylistError, SqliteVideoStore, StoredVideo, Video, VideoStore, VideosRepository};
use mockall::{mock, Sequence};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

mock! {
    Fetcher {}

    #[async_trait]
    impl PlaylistFetcher for Fetcher {
        async fn get_playlist(&self) -> BridgeResult<Vec<RemotePlaylistEntry>>;
    }
}

struct Harness {
    pool: SqlitePool,
    store: Arc<SqliteVideoStore>,
}

impl Harness {
    async fn new() -> Self {
        let pool = create_test_pool().await.unwrap();
        let store = Arc::new(SqliteVideoStore::new(pool.clone()).await.unwrap());
        Self { pool, store }
    }

    fn repository(&self, fetcher: MockFetcher) -> VideosRepository {
        VideosRepository::new(self.store.clone(), Arc::new(fetcher))
    }

    /// Raw table contents, independent of the live snapshot
    async fn rows(&self) -> Vec<(String, String, String, String, String)> {
        sqlx::query_as(
            "SELECT id, title, description, url, thumbnail_url FROM videos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap()
    }
}

fn intro_and_advanced() -> Vec<RemotePlaylistEntry> {
    vec![
        RemotePlaylistEntry::new("1", "Intro", "http://a"),
        RemotePlaylistEntry::new("2", "Advanced", "http://b"),
    ]
}

/// `videos` is the field-by-field projection of what the store holds
#[tokio::test]
async fn test_videos_projects_every_stored_field() {
    let harness = Harness::new().await;
    let stored = vec![
        StoredVideo::new("a", "Alpha", "http://a")
            .with_description("First")
            .with_thumbnail("http://a/t.jpg"),
        StoredVideo::new("b", "Beta", "http://b"),
    ];
    harness.store.replace_all(&stored).await.unwrap();

    let repository = harness.repository(MockFetcher::new());
    let videos = repository.videos().next().await.unwrap();

    let expected: Vec<Video> = stored.iter().map(Video::from).collect();
    assert_eq!(videos, expected);
    assert_eq!(videos[0].description, "First");
    assert_eq!(videos[0].thumbnail_url, "http://a/t.jpg");
}

/// A failed fetch leaves the table exactly as it was
#[tokio::test]
async fn test_failed_refresh_leaves_store_unchanged() {
    let harness = Harness::new().await;
    harness
        .store
        .replace_all(&[StoredVideo::new("1", "Intro", "http://a").with_description("kept")])
        .await
        .unwrap();
    let before = harness.rows().await;
    let snapshot_before = harness.store.get_all().current();

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_get_playlist()
        .times(1)
        .returning(|| Err(BridgeError::Network("Connection refused".to_string())));
    let repository = harness.repository(fetcher);

    let result = repository.refresh().await;

    assert!(matches!(result, Err(PlaylistError::Fetch(BridgeError::Network(_)))));
    assert_eq!(harness.rows().await, before);
    assert_eq!(harness.store.get_all().current(), snapshot_before);
}

/// A malformed payload is a fetch failure and writes nothing
#[tokio::test]
async fn test_decode_failure_leaves_store_unchanged() {
    let harness = Harness::new().await;
    let before = harness.rows().await;

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_get_playlist()
        .times(1)
        .returning(|| Err(BridgeError::Decode("expected value at line 1".to_string())));
    let repository = harness.repository(fetcher);

    let result = repository.refresh().await;

    assert!(matches!(result, Err(ref e) if e.is_fetch()));
    assert_eq!(harness.rows().await, before);
}

/// Two refreshes: the second updates id 1 and keeps id 2
#[tokio::test]
async fn test_refresh_end_to_end_upserts() {
    let harness = Harness::new().await;

    let mut seq = Sequence::new();
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_get_playlist()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(intro_and_advanced()));
    fetcher
        .expect_get_playlist()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(vec![RemotePlaylistEntry::new("1", "Intro v2", "http://a")]));
    let repository = harness.repository(fetcher);

    assert_eq!(repository.refresh().await.unwrap(), 2);
    let videos = repository.videos().current();
    assert_eq!(videos.len(), 2);
    assert_eq!((videos[0].id.as_str(), videos[0].title.as_str(), videos[0].url.as_str()), ("1", "Intro", "http://a"));
    assert_eq!((videos[1].id.as_str(), videos[1].title.as_str(), videos[1].url.as_str()), ("2", "Advanced", "http://b"));

    assert_eq!(repository.refresh().await.unwrap(), 1);
    let videos = repository.videos().current();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].title, "Intro v2");
    assert_eq!(videos[1].id, "2");
    assert_eq!(videos[1].title, "Advanced");
}

/// A subscriber attached before refresh gets exactly one more emission
#[tokio::test]
async fn test_subscriber_receives_exactly_one_emission_per_refresh() {
    let harness = Harness::new().await;

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_get_playlist()
        .times(1)
        .returning(|| Ok(intro_and_advanced()));
    let repository = harness.repository(fetcher);

    let mut feed = repository.videos();
    assert!(feed.next().await.unwrap().is_empty());

    repository.refresh().await.unwrap();

    let update = tokio::time::timeout(Duration::from_secs(1), feed.next())
        .await
        .expect("update after commit")
        .unwrap();
    let ids: Vec<_> = update.iter().map(|video| video.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let spurious = tokio::time::timeout(Duration::from_millis(100), feed.next()).await;
    assert!(spurious.is_err(), "no duplicate emission");
}

/// Racing refreshes both land and observers converge
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_refreshes_converge() {
    let harness = Harness::new().await;

    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_get_playlist()
        .times(2)
        .returning(|| Ok(intro_and_advanced()));
    let repository = harness.repository(fetcher);

    let (first, second) = tokio::join!(repository.refresh(), repository.refresh());
    assert_eq!(first.unwrap(), 2);
    assert_eq!(second.unwrap(), 2);

    assert_eq!(harness.store.count().await.unwrap(), 2);
    assert_eq!(repository.videos().current().len(), 2);
}

//! Persisted video store
//!
//! [`VideoStore`] is the durable keyed storage behind the playlist. Reads
//! are served from a live snapshot; writes go through a single transaction
//! per batch and publish the new snapshot only after commit, so observers
//! never see half of a batch.
//!
//! Commit and publish run in a task owned by the store. Dropping a
//! `replace_all` future detaches that task rather than cancelling it, so a
//! batch that reaches the database always reaches observers too.

use crate::error::{PlaylistError, Result};
use crate::models::StoredVideo;
use crate::query::{LiveQuery, Snapshot};
use async_trait::async_trait;
use sqlx::{query_as, Sqlite, SqlitePool};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, instrument, Instrument};

const SELECT_ALL: &str =
    "SELECT id, title, description, url, thumbnail_url FROM videos ORDER BY id ASC";

const UPSERT: &str = r#"
    INSERT OR REPLACE INTO videos (id, title, description, url, thumbnail_url)
    VALUES (?, ?, ?, ?, ?)
"#;

/// Video store interface
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Subscribe to the full contents of the store, ordered by id.
    ///
    /// Every call returns an independent subscriber.
    fn get_all(&self) -> LiveQuery<StoredVideo>;

    /// Insert every record, overwriting any existing record with the same id.
    ///
    /// Records absent from `videos` are left untouched. The batch is applied
    /// atomically and observers are notified once, after commit. An empty
    /// batch does nothing. Once the write has started, dropping the future
    /// does not stop it.
    ///
    /// # Errors
    /// - `InvalidInput` if a record fails validation (nothing is written)
    /// - `Persistence` if the write fails (the transaction is rolled back)
    /// - `Cancelled` if the runtime shut the write task down
    async fn replace_all(&self, videos: &[StoredVideo]) -> Result<()>;

    /// Find a video by its id
    async fn find_by_id(&self, id: &str) -> Result<Option<StoredVideo>>;

    /// Count stored videos
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of [`VideoStore`]
pub struct SqliteVideoStore {
    pool: SqlitePool,
    snapshot: Arc<watch::Sender<Snapshot<StoredVideo>>>,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteVideoStore {
    /// Create a store over a migrated pool, seeding the live snapshot with
    /// whatever the database already holds.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        let initial = load_all(&pool).await?;
        debug!(videos = initial.len(), "Loaded cached playlist");

        let (snapshot, _) = watch::channel(Arc::new(initial));

        Ok(Self {
            pool,
            snapshot: Arc::new(snapshot),
            write_lock: Arc::new(Mutex::new(())),
        })
    }
}

async fn load_all<'e, E>(executor: E) -> Result<Vec<StoredVideo>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let videos = query_as::<_, StoredVideo>(SELECT_ALL)
        .fetch_all(executor)
        .await?;

    Ok(videos)
}

async fn write_batch(
    pool: SqlitePool,
    snapshot: Arc<watch::Sender<Snapshot<StoredVideo>>>,
    write_lock: Arc<Mutex<()>>,
    videos: Vec<StoredVideo>,
) -> Result<()> {
    let _guard = write_lock.lock().await;
    let mut tx = pool.begin().await?;

    for video in &videos {
        sqlx::query(UPSERT)
            .bind(&video.id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.url)
            .bind(&video.thumbnail_url)
            .execute(&mut *tx)
            .await?;
    }

    // Read back inside the transaction so the published snapshot is
    // exactly what this commit produced.
    let contents = load_all(&mut *tx).await?;
    tx.commit().await?;

    debug!(total = contents.len(), "Batch committed");
    snapshot.send_replace(Arc::new(contents));

    Ok(())
}

#[async_trait]
impl VideoStore for SqliteVideoStore {
    fn get_all(&self) -> LiveQuery<StoredVideo> {
        LiveQuery::new(self.snapshot.subscribe())
    }

    #[instrument(skip(self, videos), fields(batch = videos.len()))]
    async fn replace_all(&self, videos: &[StoredVideo]) -> Result<()> {
        if videos.is_empty() {
            debug!("Empty batch, nothing to write");
            return Ok(());
        }

        for video in videos {
            video.validate().map_err(|msg| PlaylistError::InvalidInput {
                field: "video".to_string(),
                message: msg,
            })?;
        }

        let write = write_batch(
            self.pool.clone(),
            Arc::clone(&self.snapshot),
            Arc::clone(&self.write_lock),
            videos.to_vec(),
        );

        match tokio::spawn(write.in_current_span()).await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(PlaylistError::Cancelled),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredVideo>> {
        let video = query_as::<_, StoredVideo>(
            "SELECT id, title, description, url, thumbnail_url FROM videos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

//! # Playlist Cache
//!
//! Local cache of the DevBytes video playlist.
//!
//! ## Overview
//!
//! - [`store`] persists [`StoredVideo`] rows in SQLite and publishes a live
//!   snapshot after every committed batch
//! - [`repository`] refreshes the store from a [`PlaylistFetcher`] and exposes
//!   the cached rows as a live feed of [`Video`] values
//! - [`db`] creates the connection pool and applies migrations
//!
//! Data flows one way: fetcher → [`RemotePlaylistEntry`] → [`StoredVideo`] →
//! store → live query → [`Video`].
//!
//! [`PlaylistFetcher`]: bridge_traits::PlaylistFetcher
//! [`RemotePlaylistEntry`]: bridge_traits::RemotePlaylistEntry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_playlist::{db, SqliteVideoStore, VideosRepository};
//! use std::sync::Arc;
//!
//! let pool = db::create_pool(db::DatabaseConfig::new("videos.db")).await?;
//! let store = Arc::new(SqliteVideoStore::new(pool).await?);
//! let repository = VideosRepository::new(store, fetcher);
//!
//! let mut feed = repository.videos();
//! repository.refresh().await?;
//! while let Some(videos) = feed.next().await {
//!     render(&videos);
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod store;

pub use error::{PlaylistError, Result};
pub use models::{StoredVideo, Video};
pub use query::{LiveQuery, MappedQuery, Snapshot};
pub use repository::{VideoFeed, VideosRepository};
pub use store::{SqliteVideoStore, VideoStore};

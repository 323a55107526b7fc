//! # DevBytes Playlist Provider
//!
//! Implements `PlaylistFetcher` for the DevBytes video feed.
//!
//! ## Overview
//!
//! - Downloads `devbytes.json` through an injected `HttpClient`
//! - Decodes the feed's wire model ([`types`])
//! - Maps every feed entry 1:1 into a `RemotePlaylistEntry`

pub mod connector;
pub mod error;
pub mod types;

pub use connector::{DevBytesConnector, DEFAULT_BASE_URL};
pub use error::{DevBytesError, Result};

//! # Host Bridge Traits
//!
//! Capabilities the playlist core needs from its host, expressed as traits so
//! each platform can plug in its own implementation.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP transport
//! - [`PlaylistFetcher`](playlist::PlaylistFetcher) - Source of the remote playlist
//! - [`LoggerSink`](logger::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Desktop  | `bridge-desktop`    |
//! | Android  | host supplied       |
//! | iOS      | host supplied       |
//!
//! ## Error Handling
//!
//! All bridge traits report failures as [`BridgeError`](error::BridgeError).
//! Implementations should keep transport failures (`Network`) apart from
//! payload failures (`Decode`) so callers can tell them apart in logs.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync`; the core shares them across tasks
//! behind `Arc`.

pub mod error;
pub mod http;
pub mod logger;
pub mod playlist;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use logger::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use playlist::{PlaylistFetcher, RemotePlaylistEntry};

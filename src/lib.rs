//! Workspace façade crate.
//!
//! Host applications can depend on `devbyte-workspace` and pick a feature
//! instead of wiring each crate individually:
//!
//! - `desktop-shims` (default): `core-service` with the reqwest-backed
//!   `HttpClient` injected automatically.
//! - `headless`: the same crates without desktop shims; the host must supply
//!   its own `HttpClient` or `PlaylistFetcher` through `CoreConfig`.

#[cfg(any(feature = "desktop-shims", feature = "headless"))]
pub use core_playlist::{Video, VideoFeed};
#[cfg(any(feature = "desktop-shims", feature = "headless"))]
pub use core_service::{CoreConfig, CoreError, CoreHandle, CoreService};

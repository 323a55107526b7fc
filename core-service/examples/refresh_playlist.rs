//! Fetch the DevBytes playlist once and print it
//!
//! Run with:
//! ```bash
//! cargo run -p core-service --example refresh_playlist
//!
//! # Keep the cache on disk between runs
//! cargo run -p core-service --example refresh_playlist -- videos.db
//! ```

use anyhow::Context;
use bridge_traits::LogLevel;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_service::{CoreConfig, CoreService};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Debug),
    )?;

    let mut builder = CoreConfig::builder();
    if let Some(path) = env::args().nth(1) {
        builder = builder.database_path(path);
    }
    let config = builder.build().context("desktop-shims feature is required")?;

    let service = CoreService::bootstrap(config).await?;

    let cached = service.videos().current();
    println!("{} videos cached before refresh", cached.len());

    let written = service
        .refresh_videos()
        .await
        .context("refreshing the playlist")?;
    println!("{} videos written\n", written);

    for video in service.videos().current() {
        println!("{}\n    {}", video.title, video.url);
    }

    Ok(())
}

//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the playlist core:
//! - Logging and tracing bootstrap
//! - Configuration management with fail-fast validation
//!
//! Nothing in here knows about videos; `core-service` turns a [`CoreConfig`]
//! into a running service.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};

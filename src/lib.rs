//! relay-dl - A library for downloading files through a relay.
//!
//! This library provides core functionality for proxying file downloads
//! through a remote relay, streaming the body with progress and throughput
//! reporting, saving the bytes locally, and keeping cumulative usage
//! statistics across runs, abstracted from any specific UI or display
//! framework.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use relay_dl::{DownloadConfig, Downloader, DownloadProgress, NoProgress, RelayClient, StatsStore};
//!
//! # async fn example() -> relay_dl::Result<()> {
//! let relay = RelayClient::new("https://your-relay.example.workers.dev")?;
//! let store = StatsStore::at_default_path();
//! let mut downloader = Downloader::new(relay, store, DownloadConfig::default());
//!
//! let progress: Arc<dyn DownloadProgress> = Arc::new(NoProgress);
//! let outcome = downloader
//!     .download("https://example.com/files/data.zip", &progress)
//!     .await?;
//! println!("{}", outcome.stats.render());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod download;
pub mod error;
pub mod filename;
pub mod format;
pub mod fs;
pub mod progress;
pub mod relay;
pub mod stats;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types for convenience
pub use config::{AppConfig, DownloadConfig, PathConfig, RelayConfig};
pub use download::{DownloadOutcome, Downloader};
pub use error::{Error, Result};
pub use filename::{FALLBACK_FILENAME, suggested_filename};
pub use format::{format_bytes, format_duration};
pub use fs::{FileSystem, TokioFileSystem};
pub use progress::{DownloadProgress, NoProgress, ThroughputMeter};
pub use relay::{RelayClient, RelayResponse};
pub use stats::{DownloadStats, StatsStore};

//! Core download orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::TryStreamExt;

use crate::config::DownloadConfig;
use crate::error::{Error, Result};
use crate::filename::suggested_filename;
use crate::fs::{FileSystem, TokioFileSystem};
use crate::progress::{DownloadProgress, ThroughputMeter, percent};
use crate::relay::RelayClient;
use crate::stats::{DownloadStats, StatsStore};

/// Result of a completed download attempt.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Filename derived from the source URL.
    pub filename: String,
    /// Path the file was saved to.
    pub path: PathBuf,
    /// Number of bytes transferred.
    pub bytes: u64,
    /// Wall-clock time for the whole attempt.
    pub elapsed: Duration,
    /// Stats snapshot after the attempt was recorded.
    pub stats: DownloadStats,
}

/// Returns the `.part` file path for a given final path.
fn part_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".part");
    PathBuf::from(os)
}

/// Core downloader that drives one attempt at a time through the relay.
pub struct Downloader<F: FileSystem = TokioFileSystem> {
    relay: RelayClient,
    store: StatsStore,
    config: DownloadConfig,
    fs: F,
}

impl Downloader<TokioFileSystem> {
    /// Creates a new downloader with the default file system.
    #[must_use]
    pub const fn new(relay: RelayClient, store: StatsStore, config: DownloadConfig) -> Self {
        Self {
            relay,
            store,
            config,
            fs: TokioFileSystem,
        }
    }
}

impl<F: FileSystem> Downloader<F> {
    /// Creates a new downloader with a custom file system implementation.
    #[must_use]
    pub const fn with_fs(
        relay: RelayClient,
        store: StatsStore,
        config: DownloadConfig,
        fs: F,
    ) -> Self {
        Self {
            relay,
            store,
            config,
            fs,
        }
    }

    /// Returns a reference to the download configuration.
    #[must_use]
    pub const fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Returns a reference to the stats store.
    #[must_use]
    pub const fn store(&self) -> &StatsStore {
        &self.store
    }

    /// Runs one download attempt end to end.
    ///
    /// The attempt counter is incremented before any network activity and is
    /// never rolled back on failure; the success counter and byte total are
    /// only recorded once the file has actually been written. The store is
    /// persisted exactly once per attempt, whatever the outcome.
    ///
    /// Takes `&mut self`: a second attempt cannot start while one is in
    /// flight on the same downloader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyUrl`] for a blank URL (no stats are touched),
    /// or the relay/stream/save error that ended the attempt.
    pub async fn download(
        &mut self,
        url: &str,
        progress: &Arc<dyn DownloadProgress>,
    ) -> Result<DownloadOutcome> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::EmptyUrl);
        }

        let mut stats = self.store.load();
        stats.record_attempt();

        let started = Instant::now();
        let result = self.run_attempt(url, progress).await;

        match &result {
            Ok((_, _, bytes)) => stats.record_success(*bytes),
            Err(e) => progress.on_error(&e.to_string()),
        }
        if let Err(e) = self.store.save(&stats) {
            log::warn!("failed to persist download stats: {e}");
        }

        let (filename, path, bytes) = result?;
        progress.on_complete(&filename, bytes);

        Ok(DownloadOutcome {
            filename,
            path,
            bytes,
            elapsed: started.elapsed(),
            stats,
        })
    }

    /// Streams the relay response into memory, then saves it as a file.
    async fn run_attempt(
        &self,
        url: &str,
        progress: &Arc<dyn DownloadProgress>,
    ) -> Result<(String, PathBuf, u64)> {
        let response = self.relay.fetch(url).await?;
        let total = response.total;
        progress.on_start(url, total);

        let mut stream = response.stream;
        let mut chunks: Vec<Bytes> = Vec::new();
        let mut loaded: u64 = 0;
        let mut meter = ThroughputMeter::new(Instant::now());

        while let Some(chunk) = stream.try_next().await? {
            loaded += chunk.len() as u64;
            chunks.push(chunk);

            progress.on_progress(loaded, total.map(|t| percent(loaded, t)));
            if let Some(speed) = meter.record(loaded, Instant::now()) {
                progress.on_speed(speed);
            }
        }

        // Segments are concatenated exactly once, after the stream is exhausted.
        let payload = chunks.concat();
        let (filename, path) = self.save_payload(url, &payload).await?;
        Ok((filename, path, loaded))
    }

    /// Materializes the payload as a local file named after the source URL.
    async fn save_payload(&self, url: &str, payload: &[u8]) -> Result<(String, PathBuf)> {
        let filename = suggested_filename(url);
        self.fs.create_dir_all(&self.config.download_dir).await?;

        let path = self.config.download_dir.join(&filename);
        if !self.config.force_overwrite && self.fs.file_exists(&path).await {
            return Err(Error::FileExists {
                path: path.display().to_string(),
            });
        }

        // Write to .part, then rename into place.
        let part = part_path(&path);
        if let Err(e) = self.fs.write_file(&part, payload).await {
            let _ = self.fs.remove_file(&part).await;
            return Err(e.into());
        }
        self.fs.rename_file(&part, &path).await?;

        Ok((filename, path))
    }
}

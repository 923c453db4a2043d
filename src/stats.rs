//! Persisted cumulative download statistics.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::format::format_bytes;

/// Aggregate counters persisted across runs.
///
/// Mutated exactly twice per attempt: the attempt counter at start, and the
/// success counter plus byte total once the file has actually been saved.
/// Field names are camelCase on disk; records with missing fields decode
/// with those fields at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadStats {
    /// Number of download attempts, successful or not.
    pub total_downloads: u64,
    /// Number of downloads that completed and were saved.
    pub successful_downloads: u64,
    /// Total bytes transferred across all successful downloads.
    pub total_bytes: u64,
}

impl DownloadStats {
    /// Creates a zeroed record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_downloads: 0,
            successful_downloads: 0,
            total_bytes: 0,
        }
    }

    /// Counts a new download attempt, before its outcome is known.
    pub const fn record_attempt(&mut self) {
        self.total_downloads += 1;
    }

    /// Counts a completed download of `bytes` transferred bytes.
    pub const fn record_success(&mut self, bytes: u64) {
        self.successful_downloads += 1;
        self.total_bytes += bytes;
    }

    /// Returns the success rate as a rounded integer percentage.
    ///
    /// Zero attempts yield `0` rather than a division by zero.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn success_rate(&self) -> u64 {
        if self.total_downloads == 0 {
            return 0;
        }
        ((self.successful_downloads as f64 / self.total_downloads as f64) * 100.0).round() as u64
    }

    /// Renders the record as a display block.
    ///
    /// Pure function of the record: rendering the same stats twice produces
    /// identical output.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "Total Downloads:      {}\n\
             Successful Downloads: {}\n\
             Total Data:           {}\n\
             Success Rate:         {}%",
            self.total_downloads,
            self.successful_downloads,
            format_bytes(self.total_bytes),
            self.success_rate(),
        )
    }
}

/// File-backed store for [`DownloadStats`].
///
/// The record is read once per attempt and overwritten wholesale after the
/// attempt concludes; there is no partial update or reset operation.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default stats file location.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// Returns the default stats file path.
    ///
    /// Uses `STATE_DIRECTORY` (set by systemd when `StateDirectory=` is
    /// configured), falling back to the platform data dir for interactive use.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let dir = if let Ok(state_dir) = std::env::var("STATE_DIRECTORY") {
            PathBuf::from(state_dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("relay-dl")
        };
        dir.join("stats.json")
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted record.
    ///
    /// A missing or unparsable file is treated as "no prior stats" and yields
    /// the zero record; no error is surfaced.
    #[must_use]
    pub fn load(&self) -> DownloadStats {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::debug!("ignoring malformed stats file {}: {e}", self.path.display());
                DownloadStats::default()
            }),
            Err(_) => DownloadStats::default(),
        }
    }

    /// Overwrites the persisted record atomically (write tmp + rename).
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory cannot be created or the file
    /// cannot be written. Callers treat this as best-effort.
    pub fn save(&self, stats: &DownloadStats) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(stats)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_zeroed() {
        let stats = DownloadStats::new();
        assert_eq!(stats.total_downloads, 0);
        assert_eq!(stats.successful_downloads, 0);
        assert_eq!(stats.total_bytes, 0);
    }

    #[test]
    fn record_attempt_and_success() {
        let mut stats = DownloadStats::new();
        stats.record_attempt();
        stats.record_success(1024);
        assert_eq!(stats.total_downloads, 1);
        assert_eq!(stats.successful_downloads, 1);
        assert_eq!(stats.total_bytes, 1024);
    }

    #[test]
    fn success_rate_zero_attempts() {
        assert_eq!(DownloadStats::new().success_rate(), 0);
    }

    #[test]
    fn success_rate_rounds_to_integer() {
        let stats = DownloadStats {
            total_downloads: 4,
            successful_downloads: 3,
            total_bytes: 0,
        };
        assert_eq!(stats.success_rate(), 75);

        let stats = DownloadStats {
            total_downloads: 3,
            successful_downloads: 2,
            total_bytes: 0,
        };
        assert_eq!(stats.success_rate(), 67);
    }

    #[test]
    fn render_is_idempotent() {
        let stats = DownloadStats {
            total_downloads: 4,
            successful_downloads: 3,
            total_bytes: 1536,
        };
        assert_eq!(stats.render(), stats.render());
    }

    #[test]
    fn render_contains_rate_and_size() {
        let stats = DownloadStats {
            total_downloads: 4,
            successful_downloads: 3,
            total_bytes: 1536,
        };
        let rendered = stats.render();
        assert!(rendered.contains("75%"));
        assert!(rendered.contains("1.5 KB"));
    }

    #[test]
    fn stats_serialize_with_camel_case_keys() {
        let stats = DownloadStats {
            total_downloads: 2,
            successful_downloads: 1,
            total_bytes: 10,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"totalDownloads\":2"));
        assert!(json.contains("\"successfulDownloads\":1"));
        assert!(json.contains("\"totalBytes\":10"));
    }

    #[test]
    fn load_missing_file_returns_zero_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        assert_eq!(store.load(), DownloadStats::default());
    }

    #[test]
    fn load_malformed_file_returns_zero_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = StatsStore::new(path);
        assert_eq!(store.load(), DownloadStats::default());
    }

    #[test]
    fn load_partial_record_defaults_missing_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(&path, r#"{"totalDownloads": 7}"#).unwrap();
        let store = StatsStore::new(path);
        let stats = store.load();
        assert_eq!(stats.total_downloads, 7);
        assert_eq!(stats.successful_downloads, 0);
        assert_eq!(stats.total_bytes, 0);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = StatsStore::new(dir.path().join("nested").join("stats.json"));
        let stats = DownloadStats {
            total_downloads: 5,
            successful_downloads: 4,
            total_bytes: 1_048_576,
        };
        store.save(&stats).unwrap();
        assert_eq!(store.load(), stats);
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        let mut stats = DownloadStats::new();
        stats.record_attempt();
        store.save(&stats).unwrap();
        stats.record_attempt();
        stats.record_success(10);
        store.save(&stats).unwrap();
        assert_eq!(store.load(), stats);
    }
}

//! Progress reporting and throughput measurement.

use std::time::{Duration, Instant};

/// Trait for receiving download progress updates.
///
/// Implement this trait to receive callbacks during a download attempt.
/// All methods have default no-op implementations for convenience.
pub trait DownloadProgress: Send + Sync {
    /// Called when the relay response arrives, before streaming begins.
    ///
    /// `total` is the declared body length, when the relay sent one.
    fn on_start(&self, _url: &str, _total: Option<u64>) {}

    /// Called after each received chunk with the cumulative byte count and,
    /// when the total is known, the rounded completion percentage.
    fn on_progress(&self, _loaded: u64, _percent: Option<u64>) {}

    /// Called at each throughput checkpoint (at most once per 500 ms).
    fn on_speed(&self, _bytes_per_sec: u64) {}

    /// Called when the payload has been saved to disk.
    fn on_complete(&self, _filename: &str, _bytes: u64) {}

    /// Called when the attempt fails.
    fn on_error(&self, _message: &str) {}
}

/// A null progress implementation that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl DownloadProgress for NoProgress {}

/// Returns the rounded completion percentage for `loaded` of `total` bytes.
///
/// A zero total yields `0` rather than a division by zero.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percent(loaded: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((loaded as f64 / total as f64) * 100.0).round() as u64
}

/// Instantaneous transfer-rate meter.
///
/// Keeps the most recent checkpoint (timestamp plus cumulative byte count)
/// and reports a new rate only once more than `interval` of wall-clock time
/// has elapsed since it. The rate is computed between the two most recent
/// checkpoints only; there is no smoothing or averaging, and nothing is
/// reported before the first interval boundary passes.
///
/// Timestamps are passed in by the caller, which keeps the math
/// deterministic under test.
#[derive(Debug)]
pub struct ThroughputMeter {
    interval: Duration,
    checkpoint_time: Instant,
    checkpoint_loaded: u64,
}

impl ThroughputMeter {
    /// Default recomputation interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    /// Creates a meter anchored at `start` with the default 500 ms interval.
    #[must_use]
    pub const fn new(start: Instant) -> Self {
        Self::with_interval(start, Self::DEFAULT_INTERVAL)
    }

    /// Creates a meter anchored at `start` with a custom interval.
    #[must_use]
    pub const fn with_interval(start: Instant, interval: Duration) -> Self {
        Self {
            interval,
            checkpoint_time: start,
            checkpoint_loaded: 0,
        }
    }

    /// Records the cumulative byte count at `now`.
    ///
    /// Returns the bytes-per-second rate since the previous checkpoint when
    /// the interval has elapsed, advancing the checkpoint; returns `None`
    /// otherwise.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn record(&mut self, loaded: u64, now: Instant) -> Option<u64> {
        let elapsed = now.saturating_duration_since(self.checkpoint_time);
        if elapsed <= self.interval {
            return None;
        }
        let delta = loaded.saturating_sub(self.checkpoint_loaded);
        let speed = (delta as f64 / elapsed.as_secs_f64()) as u64;
        self.checkpoint_time = now;
        self.checkpoint_loaded = loaded;
        Some(speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_progress_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoProgress>();
    }

    #[test]
    fn percent_of_known_total() {
        assert_eq!(percent(0, 10), 0);
        assert_eq!(percent(5, 10), 50);
        assert_eq!(percent(10, 10), 100);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
    }

    #[test]
    fn percent_zero_total() {
        assert_eq!(percent(5, 0), 0);
    }

    #[test]
    fn meter_silent_before_first_boundary() {
        let start = Instant::now();
        let mut meter = ThroughputMeter::new(start);
        assert_eq!(meter.record(100, start + Duration::from_millis(200)), None);
        assert_eq!(meter.record(400, start + Duration::from_millis(500)), None);
    }

    #[test]
    fn meter_reports_rate_after_boundary() {
        let start = Instant::now();
        let mut meter = ThroughputMeter::new(start);
        // 600 bytes over 600 ms = 1000 bytes/sec
        assert_eq!(
            meter.record(600, start + Duration::from_millis(600)),
            Some(1000)
        );
    }

    #[test]
    fn meter_rate_is_between_checkpoints_only() {
        let start = Instant::now();
        let mut meter = ThroughputMeter::new(start);
        assert_eq!(
            meter.record(600, start + Duration::from_millis(600)),
            Some(1000)
        );
        // 300 ms since the new checkpoint: nothing reported.
        assert_eq!(meter.record(900, start + Duration::from_millis(900)), None);
        // 600 ms and 1000 bytes since the checkpoint at t=600ms.
        assert_eq!(
            meter.record(1600, start + Duration::from_millis(1200)),
            Some(1666)
        );
    }

    #[test]
    fn meter_stalled_stream_reports_zero() {
        let start = Instant::now();
        let mut meter = ThroughputMeter::new(start);
        meter.record(500, start + Duration::from_millis(600));
        assert_eq!(
            meter.record(500, start + Duration::from_millis(1200)),
            Some(0)
        );
    }

    #[test]
    fn meter_custom_interval() {
        let start = Instant::now();
        let mut meter = ThroughputMeter::with_interval(start, Duration::from_millis(100));
        assert_eq!(
            meter.record(300, start + Duration::from_millis(150)),
            Some(2000)
        );
    }
}

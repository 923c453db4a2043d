//! Progress bar and stats reporting for CLI downloads.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{DownloadProgress, DownloadStats, format_bytes};

const SEPARATOR: &str = "────────────────────────────────────────────────────────────";

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} [{bar:40.cyan/blue}] {percent:>3}% {bytes}/{total_bytes} - {msg}",
    )
    .expect("progress template is valid")
    .progress_chars("━━╌")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {bytes} - {msg}")
        .expect("progress template is valid")
}

/// Terminal progress reporter backed by an `indicatif` bar.
///
/// Shows a determinate bar with a percentage when the relay declared a
/// total, and a spinner with a running byte count when it did not. The
/// message slot carries the throughput line, refreshed only at the meter's
/// checkpoints.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a reporter showing the initial "starting" state.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message("Starting download...");
        bar.enable_steady_tick(Duration::from_millis(250));
        Self { bar }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadProgress for CliProgress {
    fn on_start(&self, _url: &str, total: Option<u64>) {
        if let Some(total) = total {
            self.bar.set_style(bar_style());
            self.bar.set_length(total);
        }
        self.bar.set_position(0);
    }

    fn on_progress(&self, loaded: u64, _percent: Option<u64>) {
        self.bar.set_position(loaded);
    }

    fn on_speed(&self, bytes_per_sec: u64) {
        self.bar
            .set_message(format!("Speed: {}/s", format_bytes(bytes_per_sec)));
    }

    fn on_complete(&self, _filename: &str, _bytes: u64) {
        self.bar.finish_and_clear();
    }

    fn on_error(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}

/// Prints the cumulative download statistics block.
pub fn print_stats(stats: &DownloadStats) {
    println!("\n{SEPARATOR}");
    println!("Download Statistics");
    println!("{SEPARATOR}");
    for line in stats.render().lines() {
        println!("  {line}");
    }
    println!("{SEPARATOR}");
}

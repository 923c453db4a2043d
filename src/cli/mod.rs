//! CLI mode for rdl - command-line interface for relay downloads.

mod progress;

use std::path::PathBuf;
use std::sync::Arc;

use console::style;

use crate::{
    AppConfig, DownloadProgress, Downloader, Error, RelayClient, StatsStore, format_bytes,
    format_duration,
};

use progress::{CliProgress, print_stats};

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    url: Option<String>,
    output_dir: Option<PathBuf>,
    relay: Option<String>,
    force: bool,
    stats_only: bool,
}

fn print_usage() {
    eprintln!("Usage: rdl [OPTIONS] <url>");
    eprintln!();
    eprintln!("Downloads a file through the configured relay.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output-dir <DIR>  Directory to save the file into (default: .)");
    eprintln!("  --relay <URL>           Relay endpoint to use");
    eprintln!("  --force                 Overwrite an existing file with the same name");
    eprintln!("  --stats                 Print cumulative download statistics and exit");
    eprintln!("  -h, --help              Show this help");
}

/// Scans the raw arguments into [`CliArgs`].
fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output-dir" => {
                i += 1;
                let dir = args
                    .get(i)
                    .ok_or_else(|| "--output-dir requires a value".to_string())?;
                parsed.output_dir = Some(PathBuf::from(dir));
            }
            "--relay" => {
                i += 1;
                let endpoint = args
                    .get(i)
                    .ok_or_else(|| "--relay requires a value".to_string())?;
                parsed.relay = Some(endpoint.clone());
            }
            "--force" => parsed.force = true,
            "--stats" => parsed.stats_only = true,
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {arg}"));
            }
            arg => {
                if parsed.url.is_some() {
                    return Err("Only one URL may be given".to_string());
                }
                parsed.url = Some(arg.to_string());
            }
        }
        i += 1;
    }
    Ok(parsed)
}

/// Runs the CLI download mode.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the HTTP
/// client cannot be built; download failures are reported to the terminal
/// and end the process with a non-zero status instead.
pub async fn run() -> crate::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {message}");
            std::process::exit(1)
        }
    };

    let mut config = AppConfig::load()?;
    if let Some(dir) = parsed.output_dir {
        config.download.download_dir = dir;
    }
    if let Some(endpoint) = parsed.relay {
        config.relay.endpoint = endpoint;
    }
    if parsed.force {
        config.download.force_overwrite = true;
    }

    let store = StatsStore::new(config.paths.stats_path.clone());

    if parsed.stats_only {
        print_stats(&store.load());
        return Ok(());
    }

    let Some(url) = parsed.url else {
        eprintln!("Please enter a valid file URL");
        std::process::exit(1)
    };

    let relay = RelayClient::new(config.relay.endpoint.clone())?;
    let mut downloader = Downloader::new(relay, store, config.download);

    let progress: Arc<dyn DownloadProgress> = Arc::new(CliProgress::new());

    match downloader.download(&url, &progress).await {
        Ok(outcome) => {
            println!("{}", style("Download completed!").green().bold());
            println!(
                "File saved successfully: {} ({} in {})",
                outcome.path.display(),
                format_bytes(outcome.bytes),
                format_duration(outcome.elapsed),
            );
            print_stats(&outcome.stats);
            Ok(())
        }
        Err(Error::EmptyUrl) => {
            eprintln!("Please enter a valid file URL");
            std::process::exit(1)
        }
        Err(_) => {
            // The reporter already surfaced the error message in place of
            // the throughput line.
            eprintln!("{}", style("Download failed").red().bold());
            print_stats(&downloader.store().load());
            std::process::exit(1)
        }
    }
}

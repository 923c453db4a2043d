//! Error types for the relay-dl library.

use thiserror::Error;

/// Errors that can occur during download operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No URL was provided for the download.
    #[error("Please enter a valid file URL")]
    EmptyUrl,

    /// The relay answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    Status {
        /// The HTTP status code returned by the relay.
        status: u16,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target file already exists and force overwrite is disabled.
    #[error("File already exists: {path}")]
    FileExists {
        /// Path to the existing file.
        path: String,
    },
}

/// A specialized `Result` type for relay-dl operations.
pub type Result<T> = std::result::Result<T, Error>;

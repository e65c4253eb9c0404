//! Error types for stdin acquisition.

use std::io;

/// Errors that can occur while acquiring or reading standard input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The stdin stream could not be opened.
    #[error("Unable to open stdin: {0}")]
    StdinUnavailable(#[source] io::Error),

    /// Reading from an open stdin stream failed.
    #[error("Failed to read stdin: {0}")]
    StdinFailed(#[source] io::Error),
}

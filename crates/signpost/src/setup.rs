//! Error types for setup operations.

use thiserror::Error;

use crate::log::LogError;

/// Error type for [`AppBuilder::build`](crate::AppBuilder::build).
#[derive(Debug, Error)]
pub enum SetupError {
    /// The logger could not be configured from the `log.*` options.
    #[error("logger setup failed: {0}")]
    Log(#[from] LogError),

    /// An option holds a value of the wrong kind.
    #[error("invalid option {key}: {reason}")]
    InvalidOption { key: String, reason: String },
}

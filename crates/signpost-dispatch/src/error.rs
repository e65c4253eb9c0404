//! Error types for route registration and dispatch.

use signpost_input::InputError;

/// Misconfiguration detected while routes are registered or `run` is entered.
///
/// These are always reported at the point of misuse, never deferred to
/// dispatch.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The long option token cannot name a flag.
    #[error("invalid long option {token:?}: {reason}")]
    InvalidLongOption { token: String, reason: &'static str },

    /// The short option token is not a single flag character.
    #[error("invalid short option {token:?}: {reason}")]
    InvalidShortOption { token: String, reason: &'static str },

    /// Short options only apply to option routes.
    #[error("route {0} cannot take a short option")]
    ShortOptionNotAllowed(String),

    /// A stdin route could not acquire standard input.
    #[error(transparent)]
    StdinUnavailable(#[from] InputError),

    /// `run` was entered without a program name in the argument vector.
    #[error("This is a Command Line Application: no program name in the argument vector")]
    NotCommandLine,
}

impl ConfigError {
    pub(crate) fn long(token: &str, reason: &'static str) -> Self {
        Self::InvalidLongOption {
            token: token.to_string(),
            reason,
        }
    }

    pub(crate) fn short(token: &str, reason: &'static str) -> Self {
        Self::InvalidShortOption {
            token: token.to_string(),
            reason,
        }
    }
}

/// A handler returned an error during dispatch.
///
/// Carries the label of the route whose handler failed (for example
/// `--hello-world`, `:*` or `not-found`) along with the handler's error.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct HandlerFailure {
    /// Label of the failing route.
    pub route: String,
    /// The error returned by the handler.
    pub error: anyhow::Error,
}

impl HandlerFailure {
    pub fn new(route: impl Into<String>, error: anyhow::Error) -> Self {
        Self {
            route: route.into(),
            error,
        }
    }

    /// The conventional one-line report: `ERROR: <message>\n`.
    pub fn report(&self) -> String {
        format!("ERROR: {}\n", self.error)
    }
}

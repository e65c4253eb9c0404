//! AppBuilder for constructing App instances.
//!
//! This module provides the [`AppBuilder`] type for configuring the options,
//! logger, view and stdin source of an [`App`] before routes are registered.
//!
//! Options are layered: built-in defaults, then every `.option()` and
//! `.config_file()` call in the order they were made. The logger and view
//! are built from the final options unless they were supplied explicitly.
//!
//! ```rust
//! use signpost::App;
//!
//! let app = App::builder()
//!     .option("log.destination", "stderr")
//!     .option("log.severity", "warn")
//!     .option("template.path", "assets/views")
//!     .build()?;
//!
//! assert_eq!(app.view().dir(), std::path::Path::new("assets/views"));
//! # Ok::<(), signpost::SetupError>(())
//! ```
//!
//! The builder is split into submodules by concern:
//! - [`config`]: option, collaborator and stdin configuration

mod config;

use signpost_dispatch::NotFoundFn;
use signpost_input::{RealStdin, StdinReader};

use super::app::App;
use crate::log::Logger;
use crate::options::{
    OptionValue, Options, LOG_DATE_FORMAT, LOG_DESTINATION, LOG_DIR, LOG_SEVERITY, TEMPLATE_PATH,
};
use crate::setup::SetupError;
use crate::state::AppState;
use crate::view::View;

/// Builder for constructing an App instance.
pub struct AppBuilder {
    pub(crate) options: Options,
    pub(crate) logger: Option<Logger>,
    pub(crate) view: Option<View>,
    pub(crate) stdin: Option<Box<dyn StdinReader>>,
    pub(crate) program: Option<String>,
    pub(crate) not_found: Option<NotFoundFn<AppState>>,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self {
            options: Options::with_defaults(),
            logger: None,
            view: None,
            stdin: None,
            program: None,
            not_found: None,
        }
    }

    /// Builds the App.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a path or log option holds a boolean instead of a string
    /// - `log.severity`, `log.destination` or `log.date_format` cannot be parsed
    /// - the log directory cannot be created
    pub fn build(self) -> Result<App, SetupError> {
        for key in [TEMPLATE_PATH, LOG_DIR, LOG_SEVERITY, LOG_DESTINATION, LOG_DATE_FORMAT] {
            if let Some(OptionValue::Bool(value)) = self.options.get(key) {
                return Err(SetupError::InvalidOption {
                    key: key.to_string(),
                    reason: format!("expected a string, got {value}"),
                });
            }
        }

        let logger = match self.logger {
            Some(logger) => logger,
            None => Logger::from_options(&self.options)?,
        };
        let view = match self.view {
            Some(view) => view,
            None => View::new(self.options.get_str(TEMPLATE_PATH).unwrap_or("views")),
        };
        let stdin = self.stdin.unwrap_or_else(|| Box::new(RealStdin));

        tracing::debug!(options = self.options.len(), logger = ?logger, "app built");
        Ok(App::from_parts(
            AppState::new(self.options, logger, view),
            stdin,
            self.not_found,
            self.program,
        ))
    }
}

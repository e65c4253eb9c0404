//! Configuration methods for AppBuilder.

use std::path::Path;

use signpost_dispatch::{HandlerResult, NotFoundContext};
use signpost_input::StdinReader;

use super::AppBuilder;
use crate::config::load_ini;
use crate::log::Logger;
use crate::options::OptionValue;
use crate::state::AppState;
use crate::view::View;

impl AppBuilder {
    /// Sets one option. Later calls win.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.set(key, value);
        self
    }

    /// Sets several options, in order.
    pub fn options<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<OptionValue>,
    {
        self.options.extend(pairs);
        self
    }

    /// Loads an INI file into the options now.
    ///
    /// A missing or unreadable file is skipped.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.options.extend(load_ini(path));
        self
    }

    /// Uses this logger instead of one built from the `log.*` options.
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Uses this view instead of one rooted at `template.path`.
    pub fn view(mut self, view: View) -> Self {
        self.view = Some(view);
        self
    }

    /// Where stdin routes read from. Defaults to the process stdin.
    pub fn stdin_reader(mut self, reader: impl StdinReader + 'static) -> Self {
        self.stdin = Some(Box::new(reader));
        self
    }

    /// Overrides the program name shown in the usage header.
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = Some(name.into());
        self
    }

    /// Replaces the default not-found behavior (print usage, exit 0).
    pub fn not_found<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut NotFoundContext<'_, AppState>) -> HandlerResult + 'static,
    {
        self.not_found = Some(Box::new(handler));
        self
    }
}

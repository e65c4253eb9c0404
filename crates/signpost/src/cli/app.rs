//! App struct and implementation.
//!
//! This module provides the [`App`] type, the main entry point: it owns the
//! route table and the application state, and runs dispatch over the
//! process arguments.

use std::fmt;
use std::path::Path;

use signpost_dispatch::{
    exit_with_usage, program_name, ConfigError, Dispatcher, FnHandler, Handler, HandlerFailure,
    HandlerResult, HelpFormatter, NotFoundContext, NotFoundFn, OptionToken, Route, RouteContext,
    RouteKind, RouteTable,
};
use signpost_input::{RealStdin, StdinReader};

use super::result::RunResult;
use crate::config::load_ini;
use crate::log::{Logger, Severity};
use crate::options::{OptionValue, Options, DEBUG, TEMPLATE_PATH};
use crate::state::AppState;
use crate::view::View;

/// Label reported when the not-found handler fails.
pub const NOT_FOUND_LABEL: &str = "not-found";

/// Main entry point for signpost applications.
///
/// # Single-Threaded Design
///
/// CLI applications are single-threaded: register routes → run once → exit.
/// Handlers use `&mut self` and `FnMut`, so they can keep state without
/// interior mutability wrappers.
///
/// # Example
///
/// ```rust
/// use signpost::{App, RunResult};
///
/// let mut app = App::new();
/// app.command("hello-world:", |ctx| {
///     println!("Hello {}", ctx.value().unwrap_or_default());
///     Ok(())
/// })?
/// .with_help("Hello world example");
///
/// let result = app.run_from(["demo", "--hello-world", "Bob"])?;
/// assert!(result.is_dispatched());
/// # Ok::<(), signpost::ConfigError>(())
/// ```
pub struct App {
    pub(crate) table: RouteTable<AppState>,
    pub(crate) state: AppState,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) not_found: Option<NotFoundFn<AppState>>,
    pub(crate) stdin: Box<dyn StdinReader>,
    pub(crate) program: Option<String>,
}

impl App {
    /// Creates a new builder for constructing an App instance.
    pub fn builder() -> super::AppBuilder {
        super::AppBuilder::new()
    }

    /// Creates an App with the default options.
    ///
    /// The logger writes `info` and above to stdout; the view loads
    /// templates from `views/`.
    pub fn new() -> Self {
        let options = Options::with_defaults();
        let view = View::new(options.get_str(TEMPLATE_PATH).unwrap_or("views"));
        Self::from_parts(
            AppState::new(options, Logger::stdout(Severity::Info), view),
            Box::new(RealStdin),
            None,
            None,
        )
    }

    pub(crate) fn from_parts(
        state: AppState,
        stdin: Box<dyn StdinReader>,
        not_found: Option<NotFoundFn<AppState>>,
        program: Option<String>,
    ) -> Self {
        Self {
            table: RouteTable::new(),
            state,
            dispatcher: Dispatcher::new(),
            not_found,
            stdin,
            program,
        }
    }

    // =========================================================================
    // Route registration
    // =========================================================================

    /// Registers an option route.
    ///
    /// `long` uses getopt notation: `"verbose"` is a flag, `"name:"` takes a
    /// value.
    pub fn command<F>(
        &mut self,
        long: &str,
        handler: F,
    ) -> Result<&mut Route<AppState>, ConfigError>
    where
        F: FnMut(&mut RouteContext<'_, AppState>) -> HandlerResult + 'static,
    {
        let long = OptionToken::parse(long)?;
        Ok(self.table.push(Route::option(long, FnHandler::new(handler))))
    }

    /// Registers a route that runs on every dispatch.
    pub fn always<F>(&mut self, handler: F) -> &mut Route<AppState>
    where
        F: FnMut(&mut RouteContext<'_, AppState>) -> HandlerResult + 'static,
    {
        self.table.push(Route::always(FnHandler::new(handler)))
    }

    /// Registers a route that reads piped standard input.
    ///
    /// The stream is opened now, through the App's [`StdinReader`].
    pub fn stdin<F>(&mut self, handler: F) -> Result<&mut Route<AppState>, ConfigError>
    where
        F: FnMut(&mut RouteContext<'_, AppState>) -> HandlerResult + 'static,
    {
        self.route(RouteKind::StdinStream, handler)
    }

    /// Registers a route of any kind.
    ///
    /// Use [`RouteKind::from_token`] to register from the legacy `":*"` and
    /// `":stdin"` tokens.
    pub fn route<F>(
        &mut self,
        kind: RouteKind,
        handler: F,
    ) -> Result<&mut Route<AppState>, ConfigError>
    where
        F: FnMut(&mut RouteContext<'_, AppState>) -> HandlerResult + 'static,
    {
        self.route_handler(kind, FnHandler::new(handler))
    }

    /// Registers a struct handler for a route of any kind.
    pub fn route_handler<H>(
        &mut self,
        kind: RouteKind,
        handler: H,
    ) -> Result<&mut Route<AppState>, ConfigError>
    where
        H: Handler<AppState> + 'static,
    {
        let route = Route::open(kind, handler, &*self.stdin)?;
        Ok(self.table.push(route))
    }

    /// Replaces the default not-found behavior (print usage, exit 0).
    pub fn not_found<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&mut NotFoundContext<'_, AppState>) -> HandlerResult + 'static,
    {
        self.not_found = Some(Box::new(handler));
        self
    }

    pub fn routes(&self) -> &RouteTable<AppState> {
        &self.table
    }

    // =========================================================================
    // Options and collaborators
    // =========================================================================

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.state.options.get(key)
    }

    /// Sets an option, returning the value it replaced.
    pub fn set_option(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.state.options.set(key, value)
    }

    pub fn options(&self) -> &Options {
        &self.state.options
    }

    /// Applies every key of an INI file to the options.
    ///
    /// Returns the number of keys applied; a missing file applies none. The
    /// logger and view keep the configuration they were built with.
    pub fn configure(&mut self, path: impl AsRef<Path>) -> usize {
        let pairs = load_ini(path);
        let applied = pairs.len();
        self.state.options.extend(pairs);
        applied
    }

    pub fn logger(&self) -> &Logger {
        &self.state.logger
    }

    pub fn view(&self) -> &View {
        &self.state.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.state.view
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Overrides the program name shown in the usage header.
    pub fn set_program(&mut self, name: impl Into<String>) -> &mut Self {
        self.program = Some(name.into());
        self
    }

    /// The usage listing, named after the running executable.
    pub fn usage(&self) -> String {
        let argv0 = std::env::args_os()
            .next()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.usage_for(&argv0)
    }

    fn usage_for(&self, argv0: &str) -> String {
        let program = match &self.program {
            Some(name) => name.clone(),
            None => program_name(argv0),
        };
        HelpFormatter::new(program).render(self.table.specs())
    }

    // =========================================================================
    // Running
    // =========================================================================

    /// Dispatches the process arguments.
    pub fn run(&mut self) -> Result<RunResult, ConfigError> {
        let args: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.run_from(args)
    }

    /// Dispatches an explicit argument vector; element 0 is the program name.
    ///
    /// When no route fires and no not-found handler is set, the usage
    /// listing is printed and the process exits with status 0.
    pub fn run_from<I, T>(&mut self, args: I) -> Result<RunResult, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let Some((argv0, rest)) = args.split_first() else {
            return Err(ConfigError::NotCommandLine);
        };

        let usage = self.usage_for(argv0);
        tracing::debug!(args = ?rest, routes = self.table.len(), "run");

        let result = match self
            .dispatcher
            .dispatch(&mut self.table, rest, &usage, &mut self.state)
        {
            Ok(true) => RunResult::Dispatched,
            Ok(false) => self.handle_not_found(&usage),
            Err(failure) => RunResult::HandlerFailed(failure),
        };
        Ok(result)
    }

    fn handle_not_found(&mut self, usage: &str) -> RunResult {
        let Some(handler) = self.not_found.as_mut() else {
            tracing::debug!("no route fired, printing usage");
            exit_with_usage(usage);
        };

        let mut ctx = NotFoundContext::new(usage, &mut self.state);
        match handler(&mut ctx) {
            Ok(()) => RunResult::NotFound,
            Err(error) => RunResult::HandlerFailed(HandlerFailure::new(NOT_FOUND_LABEL, error)),
        }
    }

    /// Runs with the process arguments and applies the `debug` option to
    /// handler failures.
    pub fn run_reporting(&mut self) -> anyhow::Result<Option<String>> {
        let args: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.run_reporting_from(args)
    }

    /// Like [`run_from`](Self::run_from), with failures reported the
    /// conventional way.
    ///
    /// Without `debug`, a handler failure becomes `Ok(Some("ERROR: <msg>\n"))`.
    /// With `debug` truthy, the handler's error is returned as `Err`.
    pub fn run_reporting_from<I, T>(&mut self, args: I) -> anyhow::Result<Option<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        match self.run_from(args)? {
            RunResult::HandlerFailed(failure) => {
                if self.state.options.is_truthy(DEBUG) {
                    Err(failure.error)
                } else {
                    Ok(Some(failure.report()))
                }
            }
            RunResult::Dispatched | RunResult::NotFound => Ok(None),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("routes", &self.table)
            .field("state", &self.state)
            .field("program", &self.program)
            .field("not_found", &self.not_found.is_some())
            .finish_non_exhaustive()
    }
}

//! # Signpost - Flag-Routed CLI Applications
//!
//! Signpost routes command-line flags to handlers. Register a handler per
//! option, run, and the matching handlers are called in registration order.
//! When nothing matches, an aligned usage listing is printed.
//!
//! Each App carries three collaborators that handlers reach through
//! [`StateExt`]:
//!
//! - [`Options`]: flat key/value options, with defaults and INI loading
//! - [`Logger`]: leveled log to a file, stdout, stderr or `tracing`
//! - [`View`]: values rendered through MiniJinja templates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use signpost::{App, StateExt};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = App::builder().option("log.destination", "stderr").build()?;
//!
//!     app.command("help", |ctx| ctx.exit_with_usage())?
//!         .with_short_option("h")?
//!         .with_help("This Help text");
//!
//!     app.command("hello-world:", |ctx| {
//!         println!("Hello {}", ctx.value().unwrap_or_default());
//!         Ok(())
//!     })?
//!     .with_help("Hello world example");
//!
//!     app.always(|ctx| {
//!         ctx.logger().notice("Hello World Logging");
//!         Ok(())
//!     });
//!
//!     if let Some(report) = app.run_reporting()? {
//!         print!("{report}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Route Kinds
//!
//! | Registration | Fires |
//! |--------------|-------|
//! | `app.command("name:", h)` | once per `--name VALUE` / `-n VALUE` occurrence |
//! | `app.always(h)` | once per run |
//! | `app.stdin(h)` | once per run, with piped stdin lines |
//!
//! ## Options
//!
//! | Key | Default |
//! |-----|---------|
//! | `template.path` | `views` |
//! | `debug` | `false` |
//! | `log.dir` | `.` |
//! | `log.severity` | `info` |
//! | `log.destination` | `stdout` |
//! | `log.date_format` | unset (RFC 2822) |
//!
//! With `debug` set, [`App::run_reporting`] returns handler errors instead
//! of the `ERROR: <message>` line.

mod cli;
mod config;
mod log;
mod options;
mod setup;
mod state;
mod view;

pub use cli::{App, AppBuilder, RunResult, NOT_FOUND_LABEL};
pub use config::{load_ini, parse_ini};
pub use log::{log_file_path, Destination, LogError, Logger, Severity};
pub use options::{
    OptionValue, Options, DEBUG, LOG_DATE_FORMAT, LOG_DESTINATION, LOG_DIR, LOG_SEVERITY,
    TEMPLATE_PATH,
};
pub use setup::SetupError;
pub use state::{AppState, StateExt};
pub use view::{View, ViewError};

// Re-export the dispatch and input layers
pub use signpost_dispatch::{
    ConfigError, FnHandler, Handler, HandlerFailure, HandlerResult, HelpFormatter,
    NotFoundContext, OptionToken, Route, RouteContext, RouteKind, RouteSpec, RouteTable,
    ShortToken, ALWAYS_RUN_TOKEN, STDIN_TOKEN,
};
pub use signpost_input::{InputError, MockStdin, RealStdin, StdinLines, StdinReader};

//! Route matching and dispatch for signpost CLIs.
//!
//! `signpost-dispatch` provides the route model, the per-route option
//! matcher, the dispatcher and the usage listing. It knows nothing about
//! logging, templates or configuration: the application lends its own state
//! to handlers through the `S` parameter of [`RouteContext`].
//!
//! # Features
//!
//! - **Route kinds**: `--long`/`-s` options, always-run routes and stdin routes
//! - **Per-route matching**: each option route scans the arguments on its own,
//!   getopt style, skipping anything it cannot read
//! - **Ordered dispatch**: handlers run in registration order; duplicates all fire
//! - **Usage listing**: aligned `-x, --name=<VALUE>  help` lines
//!
//! # Usage
//!
//! ```rust
//! use signpost_dispatch::{
//!     Dispatcher, FnHandler, HelpFormatter, OptionToken, Route, RouteContext, RouteTable,
//! };
//!
//! let mut table: RouteTable<Vec<String>> = RouteTable::new();
//! table
//!     .push(Route::option(
//!         OptionToken::parse("hello-world:")?,
//!         FnHandler::new(|ctx: &mut RouteContext<'_, Vec<String>>| {
//!             let greeting = format!("Hello {}", ctx.value().unwrap_or_default());
//!             ctx.app_state_mut().push(greeting);
//!             Ok(())
//!         }),
//!     ))
//!     .with_help("Hello world example");
//!
//! let usage = HelpFormatter::new("demo").render(table.specs());
//! let args = vec!["--hello-world".to_string(), "Bob".to_string()];
//! let mut out = Vec::new();
//! let fired = Dispatcher::new().dispatch(&mut table, &args, &usage, &mut out)?;
//!
//! assert!(fired);
//! assert_eq!(out, vec!["Hello Bob"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod dispatch;
mod error;
mod handler;
mod help;
mod matcher;
mod route;

pub use dispatch::Dispatcher;

pub use error::{ConfigError, HandlerFailure};

pub use handler::{
    FnHandler, Handler, HandlerResult, NotFoundContext, NotFoundFn, RouteContext,
};

pub use help::{exit_with_usage, program_name, HelpFormatter};

pub use matcher::occurrences;

pub use route::{
    OptionToken, Route, RouteKind, RouteSpec, RouteTable, ShortToken, ALWAYS_RUN_TOKEN,
    STDIN_TOKEN,
};

//! Route registration and the run loop.
//!
//! ## Single-Threaded Design
//!
//! CLI applications are single-threaded: register routes → run once → exit.
//! Handlers are `FnMut` closures or [`Handler`](signpost_dispatch::Handler)
//! structs taking `&mut self`, so they can capture and mutate state freely.
//!
//! ## Execution Flow
//!
//! ```text
//! Registration → run() → Dispatch → Handlers → (nothing fired) → Not found
//! ```
//!
//! 1. Registration: routes are appended to the table. Token errors and a
//!    missing stdin are reported here, as [`ConfigError`](signpost_dispatch::ConfigError).
//!
//! 2. Dispatch: every route is visited in registration order. Always-run and
//!    stdin routes fire once; option routes fire once per occurrence.
//!
//! 3. Not found: when nothing fired, the not-found handler runs, or the
//!    usage listing is printed and the process exits with status 0.
//!
//! ## Key Types
//!
//! - [`App`] / [`AppBuilder`]: Main entry point and configuration
//! - [`RunResult`]: Dispatch outcome (dispatched, not found, or handler failure)

mod app;
mod builder;
mod result;

pub use app::{App, NOT_FOUND_LABEL};
pub use builder::AppBuilder;
pub use result::RunResult;

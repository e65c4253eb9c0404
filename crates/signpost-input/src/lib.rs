//! Standard input acquisition for signpost routes.
//!
//! `signpost-input` owns the one piece of I/O that dispatch needs from the
//! outside world: piped standard input. A stdin route opens the stream once,
//! when it is registered, and its handler pulls lines from it lazily.
//!
//! # Quick Start
//!
//! ```ignore
//! use signpost_input::{RealStdin, StdinLines};
//!
//! let mut lines = StdinLines::open(&RealStdin)?;
//! while let Some(line) = lines.next_line()? {
//!     println!("got {line}");
//! }
//! ```
//!
//! # Testing
//!
//! Every consumer takes a [`StdinReader`], so tests can swap the real stream
//! for a mock:
//!
//! ```
//! use signpost_input::{MockStdin, StdinLines};
//!
//! let mut lines = StdinLines::open(&MockStdin::piped("a\nb\n")).unwrap();
//! assert_eq!(lines.next_line().unwrap().as_deref(), Some("a"));
//! ```

pub mod env;
mod error;
mod lines;

pub use env::{MockStdin, RealStdin, StdinReader};
pub use error::InputError;
pub use lines::StdinLines;

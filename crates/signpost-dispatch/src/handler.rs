//! Route handler types.
//!
//! This module provides the types a route handler works with.
//!
//! # Core Types
//!
//! - [`Handler`]: trait for route handlers (`&mut self`)
//! - [`FnHandler`]: wrapper that implements [`Handler`] for `FnMut` closures
//! - [`RouteContext`]: what a handler sees while it runs: its own route, the
//!   matched value, the usage text, piped stdin and the application state
//! - [`NotFoundContext`]: what the not-found handler sees
//! - [`HandlerResult`]: `Result<(), anyhow::Error>`, so handlers can use `?`
//!
//! # Application State
//!
//! Dispatch is generic over `S`, the state the application lends to its
//! handlers for the duration of a run (options, logger, view, ...). Handlers
//! reach it through [`RouteContext::app_state`] and
//! [`RouteContext::app_state_mut`].
//!
//! ```rust
//! use signpost_dispatch::{FnHandler, Handler, RouteContext, RouteKind, RouteSpec};
//!
//! struct Counter { hits: u32 }
//!
//! let mut handler = FnHandler::new(|ctx: &mut RouteContext<'_, Counter>| {
//!     ctx.app_state_mut().hits += 1;
//!     Ok(())
//! });
//!
//! let spec = RouteSpec::new(RouteKind::AlwaysRun);
//! let mut state = Counter { hits: 0 };
//! let mut ctx = RouteContext::new(&spec, None, "", None, &mut state);
//! handler.handle(&mut ctx).unwrap();
//! assert_eq!(state.hits, 1);
//! ```

use std::marker::PhantomData;

use signpost_input::{InputError, StdinLines};

use crate::help::exit_with_usage;
use crate::route::RouteSpec;

/// The result type for route handlers.
///
/// Enables use of the `?` operator for error propagation.
pub type HandlerResult = Result<(), anyhow::Error>;

/// Context passed to a route handler.
///
/// The context only lives for one handler invocation. `route()` is the
/// route currently being dispatched.
pub struct RouteContext<'a, S> {
    route: &'a RouteSpec,
    value: Option<&'a str>,
    usage: &'a str,
    stdin: Option<&'a mut StdinLines>,
    app_state: &'a mut S,
}

impl<'a, S> RouteContext<'a, S> {
    pub fn new(
        route: &'a RouteSpec,
        value: Option<&'a str>,
        usage: &'a str,
        stdin: Option<&'a mut StdinLines>,
        app_state: &'a mut S,
    ) -> Self {
        Self {
            route,
            value,
            usage,
            stdin,
            app_state,
        }
    }

    /// The route being dispatched.
    pub fn route(&self) -> &RouteSpec {
        self.route
    }

    /// The matched option value.
    ///
    /// `None` for options that take no value and for pseudo-routes.
    pub fn value(&self) -> Option<&str> {
        self.value
    }

    /// The usage listing for the whole application.
    pub fn usage(&self) -> &str {
        self.usage
    }

    /// Prints the usage listing to stdout and exits the process with status 0.
    pub fn exit_with_usage(&self) -> ! {
        exit_with_usage(self.usage)
    }

    /// Piped standard input, for stdin routes.
    pub fn stdin(&mut self) -> Option<&mut StdinLines> {
        self.stdin.as_deref_mut()
    }

    /// Reads the next line of piped input.
    ///
    /// Returns `Ok(None)` at end of stream, and always for routes without
    /// stdin access.
    pub fn read_line(&mut self) -> Result<Option<String>, InputError> {
        match self.stdin.as_deref_mut() {
            Some(lines) => lines.next_line(),
            None => Ok(None),
        }
    }

    pub fn app_state(&self) -> &S {
        &*self.app_state
    }

    pub fn app_state_mut(&mut self) -> &mut S {
        &mut *self.app_state
    }
}

/// Context passed to the not-found handler.
pub struct NotFoundContext<'a, S> {
    usage: &'a str,
    app_state: &'a mut S,
}

impl<'a, S> NotFoundContext<'a, S> {
    pub fn new(usage: &'a str, app_state: &'a mut S) -> Self {
        Self { usage, app_state }
    }

    /// The usage listing that would have been printed.
    pub fn usage(&self) -> &str {
        self.usage
    }

    pub fn app_state(&self) -> &S {
        &*self.app_state
    }

    pub fn app_state_mut(&mut self) -> &mut S {
        &mut *self.app_state
    }
}

/// Boxed not-found handler.
pub type NotFoundFn<S> = Box<dyn FnMut(&mut NotFoundContext<'_, S>) -> HandlerResult>;

/// Trait for route handlers.
///
/// Handlers take `&mut self`, allowing direct mutation of internal state.
/// Dispatch is single-threaded, so no interior mutability is required.
///
/// # Example
///
/// ```rust
/// use signpost_dispatch::{Handler, HandlerResult, RouteContext};
///
/// struct Greeter { greeted: Vec<String> }
///
/// impl<S> Handler<S> for Greeter {
///     fn handle(&mut self, ctx: &mut RouteContext<'_, S>) -> HandlerResult {
///         let name = ctx.value().unwrap_or("world").to_string();
///         self.greeted.push(name);
///         Ok(())
///     }
/// }
/// ```
pub trait Handler<S> {
    /// Execute the handler for one matched occurrence of its route.
    fn handle(&mut self, ctx: &mut RouteContext<'_, S>) -> HandlerResult;
}

/// A wrapper that implements [`Handler`] for `FnMut` closures.
pub struct FnHandler<F, S> {
    f: F,
    _state: PhantomData<fn(&mut S)>,
}

impl<F, S> FnHandler<F, S>
where
    F: FnMut(&mut RouteContext<'_, S>) -> HandlerResult,
{
    /// Creates a new FnHandler wrapping the given FnMut closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _state: PhantomData,
        }
    }
}

impl<F, S> Handler<S> for FnHandler<F, S>
where
    F: FnMut(&mut RouteContext<'_, S>) -> HandlerResult,
{
    fn handle(&mut self, ctx: &mut RouteContext<'_, S>) -> HandlerResult {
        (self.f)(ctx)
    }
}

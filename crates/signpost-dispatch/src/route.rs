//! Route model: what a route matches and how it is described.
//!
//! A [`Route`] binds a [`RouteSpec`] (the flag it answers to, its help text)
//! to exactly one handler. Routes are collected, in registration order, in a
//! [`RouteTable`].
//!
//! # Route Kinds
//!
//! | Kind | Fires when | Handler value |
//! |------|------------|---------------|
//! | [`RouteKind::Option`] | `--long` / `-s` appears in the arguments | the option's value, if it takes one |
//! | [`RouteKind::AlwaysRun`] | every run | none |
//! | [`RouteKind::StdinStream`] | every run | none; lines are pulled from the context |
//!
//! The kind is fixed when the route is built. Long option tokens use getopt
//! notation: a trailing `:` means the option requires a value.

use std::fmt;

use signpost_input::{StdinLines, StdinReader};

use crate::error::ConfigError;
use crate::handler::Handler;

/// Legacy token selecting [`RouteKind::AlwaysRun`].
pub const ALWAYS_RUN_TOKEN: &str = ":*";

/// Legacy token selecting [`RouteKind::StdinStream`].
pub const STDIN_TOKEN: &str = ":stdin";

/// A parsed long option token such as `hello-world:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionToken {
    name: String,
    takes_value: bool,
}

impl OptionToken {
    /// Parses a long option token.
    ///
    /// A single trailing `:` marks the option as requiring a value. The name
    /// must be non-empty, must not start with `-`, and must not contain `=`,
    /// `:` or whitespace.
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        let (name, takes_value) = match token.strip_suffix(':') {
            Some(name) => (name, true),
            None => (token, false),
        };

        if name.is_empty() {
            return Err(ConfigError::long(token, "name is empty"));
        }
        if name.starts_with('-') {
            return Err(ConfigError::long(token, "name must not start with '-'"));
        }
        if name.contains(['=', ':']) {
            return Err(ConfigError::long(token, "name must not contain '=' or ':'"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ConfigError::long(token, "name must not contain whitespace"));
        }

        Ok(Self {
            name: name.to_string(),
            takes_value,
        })
    }

    /// The option name without dashes or value marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the option requires a value.
    pub fn takes_value(&self) -> bool {
        self.takes_value
    }
}

impl fmt::Display for OptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.takes_value {
            f.write_str(":")?;
        }
        Ok(())
    }
}

/// A parsed short option token such as `n:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortToken {
    flag: char,
    takes_value: bool,
}

impl ShortToken {
    /// Parses a short option token: one flag character, optionally followed
    /// by `:`.
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        let (flag, takes_value) = match token.strip_suffix(':') {
            Some(flag) => (flag, true),
            None => (token, false),
        };

        let mut chars = flag.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(ConfigError::short(token, "expected exactly one character"));
        };
        if ch == '-' || ch == ':' || ch == '=' || ch.is_whitespace() {
            return Err(ConfigError::short(token, "character cannot be used as a flag"));
        }

        Ok(Self {
            flag: ch,
            takes_value,
        })
    }

    pub fn flag(&self) -> char {
        self.flag
    }

    pub fn takes_value(&self) -> bool {
        self.takes_value
    }
}

impl fmt::Display for ShortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag)?;
        if self.takes_value {
            f.write_str(":")?;
        }
        Ok(())
    }
}

/// What a route responds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// A `--long` / `-s` option matched against the argument vector.
    Option(OptionToken),
    /// Runs on every dispatch, regardless of arguments.
    AlwaysRun,
    /// Runs on every dispatch with access to piped standard input.
    StdinStream,
}

impl RouteKind {
    /// Builds an option kind from a long option token.
    pub fn option(token: &str) -> Result<Self, ConfigError> {
        OptionToken::parse(token).map(RouteKind::Option)
    }

    /// Classifies a legacy long token.
    ///
    /// `":*"` selects [`AlwaysRun`](Self::AlwaysRun), `":stdin"` selects
    /// [`StdinStream`](Self::StdinStream) and anything else is parsed as an
    /// option token.
    pub fn from_token(token: &str) -> Result<Self, ConfigError> {
        match token {
            ALWAYS_RUN_TOKEN => Ok(RouteKind::AlwaysRun),
            STDIN_TOKEN => Ok(RouteKind::StdinStream),
            other => Self::option(other),
        }
    }

    pub fn is_option(&self) -> bool {
        matches!(self, RouteKind::Option(_))
    }

    /// The long token in getopt notation (`name:`, `:*`, `:stdin`).
    pub fn token(&self) -> String {
        match self {
            RouteKind::Option(long) => long.to_string(),
            RouteKind::AlwaysRun => ALWAYS_RUN_TOKEN.to_string(),
            RouteKind::StdinStream => STDIN_TOKEN.to_string(),
        }
    }
}

/// Description of a registered route: kind, short option and help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    kind: RouteKind,
    short: Option<ShortToken>,
    help: String,
}

impl RouteSpec {
    pub fn new(kind: RouteKind) -> Self {
        Self {
            kind,
            short: None,
            help: String::new(),
        }
    }

    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    pub fn is_option(&self) -> bool {
        self.kind.is_option()
    }

    /// The long option, for option routes.
    pub fn long(&self) -> Option<&OptionToken> {
        match &self.kind {
            RouteKind::Option(long) => Some(long),
            _ => None,
        }
    }

    pub fn short(&self) -> Option<&ShortToken> {
        self.short.as_ref()
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Human-readable name used in logs and failure reports.
    ///
    /// Option routes render as `--name`, pseudo-routes as their legacy token.
    pub fn label(&self) -> String {
        match &self.kind {
            RouteKind::Option(long) => format!("--{}", long.name()),
            other => other.token(),
        }
    }
}

/// A route: its spec, its handler and, for stdin routes, the open stream.
pub struct Route<S> {
    pub(crate) spec: RouteSpec,
    pub(crate) handler: Box<dyn Handler<S>>,
    pub(crate) stdin: Option<StdinLines>,
}

impl<S> Route<S> {
    /// Creates an option route.
    pub fn option<H>(long: OptionToken, handler: H) -> Self
    where
        H: Handler<S> + 'static,
    {
        Self::assemble(RouteKind::Option(long), Box::new(handler), None)
    }

    /// Creates a route that runs on every dispatch.
    pub fn always<H>(handler: H) -> Self
    where
        H: Handler<S> + 'static,
    {
        Self::assemble(RouteKind::AlwaysRun, Box::new(handler), None)
    }

    /// Creates a stdin route reading from an already opened stream.
    pub fn stdin<H>(lines: StdinLines, handler: H) -> Self
    where
        H: Handler<S> + 'static,
    {
        Self::assemble(RouteKind::StdinStream, Box::new(handler), Some(lines))
    }

    /// Creates a route of any kind, acquiring `stdin` when the kind needs it.
    ///
    /// Fails with [`ConfigError::StdinUnavailable`] if a stdin route cannot
    /// open its stream.
    pub fn open<H>(
        kind: RouteKind,
        handler: H,
        stdin: &dyn StdinReader,
    ) -> Result<Self, ConfigError>
    where
        H: Handler<S> + 'static,
    {
        let lines = match kind {
            RouteKind::StdinStream => Some(StdinLines::open(stdin)?),
            _ => None,
        };
        Ok(Self::assemble(kind, Box::new(handler), lines))
    }

    fn assemble(kind: RouteKind, handler: Box<dyn Handler<S>>, stdin: Option<StdinLines>) -> Self {
        Self {
            spec: RouteSpec::new(kind),
            handler,
            stdin,
        }
    }

    pub fn spec(&self) -> &RouteSpec {
        &self.spec
    }

    /// Sets the short option (`"n"` or `"n:"`).
    ///
    /// Only option routes accept a short option.
    pub fn with_short_option(&mut self, token: &str) -> Result<&mut Self, ConfigError> {
        if !self.spec.is_option() {
            return Err(ConfigError::ShortOptionNotAllowed(self.spec.label()));
        }
        self.spec.short = Some(ShortToken::parse(token)?);
        Ok(self)
    }

    /// Sets the help text shown in the usage listing.
    pub fn with_help(&mut self, text: impl Into<String>) -> &mut Self {
        self.spec.help = text.into();
        self
    }
}

impl<S> fmt::Debug for Route<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("spec", &self.spec)
            .field("stdin", &self.stdin)
            .finish_non_exhaustive()
    }
}

/// Routes in registration order.
///
/// Registration order is also dispatch order. The table is append-only;
/// duplicate tokens are allowed.
pub struct RouteTable<S> {
    pub(crate) routes: Vec<Route<S>>,
}

impl<S> RouteTable<S> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route and returns it for further configuration.
    pub fn push(&mut self, route: Route<S>) -> &mut Route<S> {
        tracing::debug!(
            route = %route.spec.label(),
            position = self.routes.len(),
            "route registered"
        );
        self.routes.push(route);
        let last = self.routes.len() - 1;
        &mut self.routes[last]
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Route<S>> {
        self.routes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<S>> {
        self.routes.iter()
    }

    /// Specs of every route, in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &RouteSpec> {
        self.routes.iter().map(Route::spec)
    }

    /// Finds the first option route answering to `--name`.
    pub fn find_long(&self, name: &str) -> Option<&Route<S>> {
        self.routes
            .iter()
            .find(|route| route.spec.long().is_some_and(|long| long.name() == name))
    }
}

impl<S> Default for RouteTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for RouteTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter()).finish()
    }
}

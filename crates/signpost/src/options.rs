//! The flat option map.
//!
//! Options start from [`Options::with_defaults`], then builder calls, config
//! files and [`App::set_option`](crate::App::set_option) overwrite entries.
//! The last write wins.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Directory the [`View`](crate::View) loads templates from.
pub const TEMPLATE_PATH: &str = "template.path";
/// When truthy, [`App::run_reporting`](crate::App::run_reporting) propagates handler errors.
pub const DEBUG: &str = "debug";
/// Directory for the file log destination.
pub const LOG_DIR: &str = "log.dir";
/// Logger threshold, by name (`info`) or code (`6`).
pub const LOG_SEVERITY: &str = "log.severity";
/// Logger destination: `file`, `stdout`, `stderr` or `syslog`.
pub const LOG_DESTINATION: &str = "log.destination";
/// Optional strftime pattern for log timestamps. Unset means RFC 2822.
pub const LOG_DATE_FORMAT: &str = "log.date_format";

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            OptionValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Str(_) => None,
        }
    }

    /// `true`, or one of `1`, `true`, `yes`, `on` (any case).
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Str(s) => {
                let s = s.trim();
                s == "1"
                    || s.eq_ignore_ascii_case("true")
                    || s.eq_ignore_ascii_case("yes")
                    || s.eq_ignore_ascii_case("on")
            }
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

/// Key/value option store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in defaults.
    pub fn with_defaults() -> Self {
        let mut options = Self::new();
        options.set(TEMPLATE_PATH, "views");
        options.set(DEBUG, false);
        options.set(LOG_DIR, ".");
        options.set(LOG_SEVERITY, "info");
        options.set(LOG_DESTINATION, "stdout");
        options
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// The value as a string slice, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    /// Whether the key is set to a truthy value. Unset keys are false.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(OptionValue::is_truthy)
    }

    /// Sets a value, returning the one it replaced.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.values.remove(key)
    }

    /// Applies every pair in order.
    pub fn extend<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<OptionValue>,
    {
        for (key, value) in pairs {
            self.set(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

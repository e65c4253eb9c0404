//! Leveled application logger.
//!
//! Entries look like:
//!
//! ```text
//! Tue, 14 Oct 2025 09:30:00 +0000 [NOTICE]: Started demo
//! ```
//!
//! Severities follow syslog (RFC 3164): lower codes are more severe, and an
//! entry is written when its severity is at or above the configured
//! threshold. [`Severity::Off`] as a threshold disables the logger.
//!
//! Timestamps default to RFC 2822 in UTC. [`Logger::with_date_format`] takes
//! any `chrono` strftime pattern instead.
//!
//! [`Destination::SystemLog`] entries are forwarded to `tracing`, so whatever
//! subscriber the binary installs decides where they go.

use std::cell::RefCell;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::Utc;
use thiserror::Error;

use crate::options::{Options, LOG_DATE_FORMAT, LOG_DESTINATION, LOG_DIR, LOG_SEVERITY};

/// Errors raised while configuring or writing the log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Unable to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write log entry to {destination}: {source}")]
    Write {
        destination: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Invalid log date format: {0}")]
    InvalidDateFormat(String),

    #[error("Unknown log severity: {0}")]
    UnknownSeverity(String),

    #[error("Unknown log destination: {0}")]
    UnknownDestination(String),
}

/// Message severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
    /// Threshold only: nothing is logged.
    Off = 8,
}

impl Severity {
    const ALL: [Severity; 9] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
        Severity::Off,
    ];

    /// The label written between brackets.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Emergency => "EMERG",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRIT",
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Off => "OFF",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    /// Accepts a numeric code, a label (`crit`) or a full name (`critical`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code).ok_or_else(|| LogError::UnknownSeverity(s.to_string()));
        }

        let severity = match trimmed.to_ascii_lowercase().as_str() {
            "emerg" | "emergency" => Severity::Emergency,
            "alert" => Severity::Alert,
            "crit" | "critical" => Severity::Critical,
            "err" | "error" => Severity::Error,
            "warn" | "warning" => Severity::Warning,
            "notice" => Severity::Notice,
            "info" => Severity::Info,
            "debug" => Severity::Debug,
            "off" | "none" => Severity::Off,
            _ => return Err(LogError::UnknownSeverity(s.to_string())),
        };
        Ok(severity)
    }
}

/// Where log entries go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// `<dir>/log_<YYYY-MM-DD>.txt`, appended to.
    File = 1,
    Stdout = 2,
    Stderr = 3,
    /// Forwarded to `tracing`.
    SystemLog = 4,
}

impl FromStr for Destination {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let destination = match s.trim().to_ascii_lowercase().as_str() {
            "1" | "file" => Destination::File,
            "2" | "stdout" => Destination::Stdout,
            "3" | "stderr" => Destination::Stderr,
            "4" | "syslog" | "system-log" | "error_log" => Destination::SystemLog,
            _ => return Err(LogError::UnknownDestination(s.to_string())),
        };
        Ok(destination)
    }
}

enum Sink {
    File(PathBuf),
    Stdout,
    Stderr,
    SystemLog,
    Writer(RefCell<Box<dyn Write>>),
}

/// A leveled logger bound to one destination.
pub struct Logger {
    threshold: Severity,
    sink: Sink,
    date_format: Option<String>,
}

impl Logger {
    /// Creates a logger.
    ///
    /// For [`Destination::File`] the directory is created if it is missing.
    /// A threshold of [`Severity::Off`] never touches the filesystem.
    pub fn new(
        dir: impl AsRef<Path>,
        threshold: Severity,
        destination: Destination,
    ) -> Result<Self, LogError> {
        let sink = match destination {
            Destination::File => {
                let dir = dir.as_ref();
                if threshold != Severity::Off && !dir.exists() {
                    fs::create_dir_all(dir).map_err(|source| LogError::CreateDir {
                        path: dir.to_path_buf(),
                        source,
                    })?;
                }
                Sink::File(log_file_path(dir))
            }
            Destination::Stdout => Sink::Stdout,
            Destination::Stderr => Sink::Stderr,
            Destination::SystemLog => Sink::SystemLog,
        };

        Ok(Self {
            threshold,
            sink,
            date_format: None,
        })
    }

    /// A logger that writes every entry at or above `threshold` to `writer`.
    pub fn to_writer(writer: impl Write + 'static, threshold: Severity) -> Self {
        Self {
            threshold,
            sink: Sink::Writer(RefCell::new(Box::new(writer))),
            date_format: None,
        }
    }

    /// A logger writing to stdout.
    pub fn stdout(threshold: Severity) -> Self {
        Self {
            threshold,
            sink: Sink::Stdout,
            date_format: None,
        }
    }

    /// A logger that discards everything.
    pub fn disabled() -> Self {
        Self {
            threshold: Severity::Off,
            sink: Sink::Stdout,
            date_format: None,
        }
    }

    /// Builds a logger from the `log.*` options.
    pub fn from_options(options: &Options) -> Result<Self, LogError> {
        let dir = options.get_str(LOG_DIR).unwrap_or(".");
        let threshold = match options.get_str(LOG_SEVERITY) {
            Some(value) => value.parse()?,
            None => Severity::Info,
        };
        let destination = match options.get_str(LOG_DESTINATION) {
            Some(value) => value.parse()?,
            None => Destination::Stdout,
        };
        let logger = Self::new(dir, threshold, destination)?;
        match options.get_str(LOG_DATE_FORMAT) {
            Some(format) => logger.with_date_format(format),
            None => Ok(logger),
        }
    }

    /// Replaces the RFC 2822 timestamp with a strftime pattern such as
    /// `%Y-%m-%d %H:%M:%S`.
    pub fn with_date_format(mut self, format: &str) -> Result<Self, LogError> {
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(LogError::InvalidDateFormat(format.to_string()));
        }
        self.date_format = Some(format.to_string());
        Ok(self)
    }

    pub fn date_format(&self) -> Option<&str> {
        self.date_format.as_deref()
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Severity) {
        self.threshold = threshold;
    }

    /// The file entries are appended to, for the file destination.
    pub fn file_path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::File(path) => Some(path.as_path()),
            _ => None,
        }
    }

    /// Whether an entry of `severity` would be written.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.threshold != Severity::Off && severity != Severity::Off && severity <= self.threshold
    }

    /// Writes one entry, reporting write failures.
    pub fn try_log(&self, message: &str, severity: Severity) -> Result<(), LogError> {
        if !self.enabled(severity) {
            return Ok(());
        }
        if let Sink::SystemLog = self.sink {
            forward_to_tracing(message, severity);
            return Ok(());
        }
        self.try_write_line(&format_entry(self.date_format.as_deref(), message, severity))
    }

    /// Writes one entry. Write failures are reported through `tracing`.
    pub fn log(&self, message: &str, severity: Severity) {
        if let Err(err) = self.try_log(message, severity) {
            tracing::warn!(error = %err, "log entry dropped");
        }
    }

    /// Writes one entry followed by `; ` and the pretty-printed value.
    pub fn log_value(&self, message: &str, severity: Severity, value: &impl fmt::Debug) {
        if self.enabled(severity) {
            self.log(&format!("{message}; {value:#?}"), severity);
        }
    }

    /// Writes `line` as is, without timestamp or level.
    pub fn write_line(&self, line: &str) {
        if let Err(err) = self.try_write_line(line) {
            tracing::warn!(error = %err, "log line dropped");
        }
    }

    fn try_write_line(&self, line: &str) -> Result<(), LogError> {
        if self.threshold == Severity::Off {
            return Ok(());
        }

        match &self.sink {
            Sink::File(path) => {
                let open_error = |source| LogError::Open {
                    path: path.clone(),
                    source,
                };
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(open_error)?;
                file.write_all(line.as_bytes()).map_err(open_error)
            }
            Sink::Stdout => io::stdout()
                .lock()
                .write_all(line.as_bytes())
                .map_err(write_error("stdout")),
            Sink::Stderr => io::stderr()
                .lock()
                .write_all(line.as_bytes())
                .map_err(write_error("stderr")),
            Sink::SystemLog => {
                tracing::info!(target: "signpost::log", "{}", line.trim_end());
                Ok(())
            }
            Sink::Writer(writer) => writer
                .borrow_mut()
                .write_all(line.as_bytes())
                .map_err(write_error("writer")),
        }
    }

    pub fn emergency(&self, message: &str) {
        self.log(message, Severity::Emergency);
    }

    pub fn alert(&self, message: &str) {
        self.log(message, Severity::Alert);
    }

    pub fn critical(&self, message: &str) {
        self.log(message, Severity::Critical);
    }

    pub fn error(&self, message: &str) {
        self.log(message, Severity::Error);
    }

    pub fn warn(&self, message: &str) {
        self.log(message, Severity::Warning);
    }

    pub fn notice(&self, message: &str) {
        self.log(message, Severity::Notice);
    }

    pub fn info(&self, message: &str) {
        self.log(message, Severity::Info);
    }

    pub fn debug(&self, message: &str) {
        self.log(message, Severity::Debug);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match &self.sink {
            Sink::File(path) => format!("File({})", path.display()),
            Sink::Stdout => "Stdout".to_string(),
            Sink::Stderr => "Stderr".to_string(),
            Sink::SystemLog => "SystemLog".to_string(),
            Sink::Writer(_) => "Writer".to_string(),
        };
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("sink", &sink)
            .field("date_format", &self.date_format)
            .finish()
    }
}

/// `<dir>/log_<YYYY-MM-DD>.txt` for today's UTC date.
pub fn log_file_path(dir: &Path) -> PathBuf {
    dir.join(format!("log_{}.txt", Utc::now().format("%Y-%m-%d")))
}

fn format_entry(date_format: Option<&str>, message: &str, severity: Severity) -> String {
    format!(
        "{} [{:>6}]: {}\n",
        timestamp(date_format),
        severity.label(),
        message
    )
}

fn timestamp(date_format: Option<&str>) -> String {
    let now = Utc::now();
    match date_format {
        Some(format) => now.format(format).to_string(),
        None => now.to_rfc2822(),
    }
}

fn write_error(destination: &'static str) -> impl Fn(io::Error) -> LogError {
    move |source| LogError::Write {
        destination,
        source,
    }
}

fn forward_to_tracing(message: &str, severity: Severity) {
    match severity {
        Severity::Emergency | Severity::Alert | Severity::Critical | Severity::Error => {
            tracing::error!(target: "signpost::log", severity = severity.label(), "{message}")
        }
        Severity::Warning => {
            tracing::warn!(target: "signpost::log", severity = severity.label(), "{message}")
        }
        Severity::Notice | Severity::Info => {
            tracing::info!(target: "signpost::log", severity = severity.label(), "{message}")
        }
        Severity::Debug => {
            tracing::debug!(target: "signpost::log", severity = severity.label(), "{message}")
        }
        Severity::Off => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(threshold: Severity) -> (Logger, SharedBuf) {
        let buf = SharedBuf::default();
        (Logger::to_writer(buf.clone(), threshold), buf)
    }

    #[test]
    fn test_entry_format() {
        let (logger, buf) = capture(Severity::Debug);
        logger.notice("Started demo");

        let out = buf.contents();
        assert!(out.ends_with(" [NOTICE]: Started demo\n"), "{out}");
        let timestamp = out.split(" [").next().unwrap();
        assert!(chrono::DateTime::parse_from_rfc2822(timestamp).is_ok(), "{timestamp}");
    }

    #[test]
    fn test_label_is_right_aligned() {
        let (logger, buf) = capture(Severity::Debug);
        logger.info("a");
        logger.critical("b");

        let out = buf.contents();
        assert!(out.contains("[  INFO]: a\n"), "{out}");
        assert!(out.contains("[  CRIT]: b\n"), "{out}");
    }

    #[test]
    fn test_threshold_filters_less_severe() {
        let (logger, buf) = capture(Severity::Warning);
        logger.debug("hidden");
        logger.info("hidden");
        logger.warn("shown");
        logger.emergency("shown too");

        let out = buf.contents();
        assert!(!out.contains("hidden"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_off_disables_everything() {
        let (logger, buf) = capture(Severity::Off);
        logger.emergency("nope");
        logger.write_line("raw\n");
        assert!(buf.contents().is_empty());
    }

    #[test]
    fn test_log_value_appends_debug() {
        let (logger, buf) = capture(Severity::Info);
        logger.log_value("args", Severity::Info, &vec!["a"]);

        let out = buf.contents();
        assert!(out.contains("]: args; [\n    \"a\",\n]\n"), "{out}");
    }

    #[test]
    fn test_write_line_is_raw() {
        let (logger, buf) = capture(Severity::Info);
        logger.write_line("free form\n");
        assert_eq!(buf.contents(), "free form\n");
    }

    #[test]
    fn test_custom_date_format() {
        let buf = SharedBuf::default();
        let logger = Logger::to_writer(buf.clone(), Severity::Info)
            .with_date_format("%Y-%m-%d")
            .unwrap();
        logger.info("dated");

        let out = buf.contents();
        let (date, rest) = out.split_once(' ').unwrap();
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok(), "{out}");
        assert_eq!(rest, "[  INFO]: dated\n");
    }

    #[test]
    fn test_invalid_date_format_is_rejected() {
        let err = Logger::disabled().with_date_format("%Q").unwrap_err();
        assert!(matches!(err, LogError::InvalidDateFormat(f) if f == "%Q"));
    }

    #[test]
    fn test_writer_failure_is_reported() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let logger = Logger::to_writer(Broken, Severity::Info);
        let err = logger.try_log("lost", Severity::Info).unwrap_err();
        assert!(matches!(err, LogError::Write { destination: "writer", .. }));
        assert!(logger.try_log("filtered", Severity::Debug).is_ok());
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("CRIT".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("7".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("8".parse::<Severity>().unwrap(), Severity::Off);
        assert!(matches!("9".parse::<Severity>(), Err(LogError::UnknownSeverity(_))));
        assert!(matches!("loud".parse::<Severity>(), Err(LogError::UnknownSeverity(_))));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Emergency < Severity::Debug);
        assert_eq!(Severity::from_code(3), Some(Severity::Error));
        assert_eq!(Severity::Notice.code(), 5);
    }

    #[test]
    fn test_destination_parsing() {
        assert_eq!("file".parse::<Destination>().unwrap(), Destination::File);
        assert_eq!("3".parse::<Destination>().unwrap(), Destination::Stderr);
        assert_eq!("syslog".parse::<Destination>().unwrap(), Destination::SystemLog);
        assert!(matches!(
            "printer".parse::<Destination>(),
            Err(LogError::UnknownDestination(_))
        ));
    }

    #[test]
    fn test_file_destination_creates_dir_and_appends() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested/logs");

        let logger = Logger::new(&dir, Severity::Info, Destination::File).unwrap();
        logger.info("one");
        logger.debug("filtered");
        logger.error("two");

        let path = logger.file_path().unwrap().to_path_buf();
        assert_eq!(path, log_file_path(&dir));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("log_") && name.ends_with(".txt"), "{name}");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[  INFO]: one"));
        assert!(lines[1].ends_with("[ ERROR]: two"));
    }

    #[test]
    fn test_file_destination_off_skips_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("never");
        Logger::new(&dir, Severity::Off, Destination::File).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_from_options() {
        let root = tempfile::tempdir().unwrap();
        let mut options = Options::with_defaults();
        options.set(LOG_DIR, root.path().to_string_lossy().into_owned());
        options.set(LOG_SEVERITY, "debug");
        options.set(LOG_DESTINATION, "file");

        let logger = Logger::from_options(&options).unwrap();
        assert_eq!(logger.threshold(), Severity::Debug);
        assert!(logger.file_path().unwrap().starts_with(root.path()));

        options.set(LOG_DATE_FORMAT, "%H:%M");
        assert_eq!(Logger::from_options(&options).unwrap().date_format(), Some("%H:%M"));

        options.set(LOG_SEVERITY, "chatty");
        assert!(matches!(
            Logger::from_options(&options),
            Err(LogError::UnknownSeverity(_))
        ));
    }
}

//! Lazy line reader over an opened stdin stream.

use std::fmt;
use std::io::BufRead;

use crate::env::StdinReader;
use crate::InputError;

/// Reads piped standard input one line at a time.
///
/// The stream is acquired once, by [`StdinLines::open`], and released as soon
/// as end of stream is reached. An exhausted reader keeps returning `None`;
/// it cannot be restarted.
///
/// Line terminators (`\n` or `\r\n`) are stripped unless
/// [`keep_line_endings`](Self::keep_line_endings) is enabled.
///
/// # Example
///
/// ```
/// use signpost_input::{MockStdin, StdinLines};
///
/// let lines = StdinLines::open(&MockStdin::piped("one\ntwo\n")).unwrap();
/// let collected: Result<Vec<_>, _> = lines.collect();
/// assert_eq!(collected.unwrap(), vec!["one", "two"]);
/// ```
pub struct StdinLines {
    reader: Option<Box<dyn BufRead>>,
    interactive: bool,
    keep_line_endings: bool,
}

impl StdinLines {
    /// Acquire the stream behind `source`.
    ///
    /// Fails with [`InputError::StdinUnavailable`] when the stream cannot be
    /// opened.
    pub fn open<R: StdinReader + ?Sized>(source: &R) -> Result<Self, InputError> {
        let reader = source.open().map_err(InputError::StdinUnavailable)?;
        let interactive = source.is_terminal();
        tracing::trace!(interactive, "opened stdin");

        Ok(Self {
            reader: Some(reader),
            interactive,
            keep_line_endings: false,
        })
    }

    /// Wrap an already opened reader.
    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            interactive: false,
            keep_line_endings: false,
        }
    }

    /// Control whether returned lines keep their terminator.
    ///
    /// Default is `false`.
    pub fn keep_line_endings(mut self, keep: bool) -> Self {
        self.keep_line_endings = keep;
        self
    }

    /// Returns `true` if the stream was a terminal when it was opened.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Returns `true` once end of stream has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.reader.is_none()
    }

    /// Read the next line.
    ///
    /// Returns `Ok(None)` at end of stream and on every call after it. This
    /// blocks until a full line or end of stream is available.
    pub fn next_line(&mut self) -> Result<Option<String>, InputError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(InputError::StdinFailed)?;

        if read == 0 {
            self.reader = None;
            return Ok(None);
        }

        if !self.keep_line_endings && line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }
}

impl Iterator for StdinLines {
    type Item = Result<String, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

impl fmt::Debug for StdinLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdinLines")
            .field("interactive", &self.interactive)
            .field("exhausted", &self.is_exhausted())
            .field("keep_line_endings", &self.keep_line_endings)
            .finish()
    }
}

//! Environment abstractions for testability.
//!
//! This module provides the trait that abstracts over the process's stdin,
//! allowing tests to run without depending on actual terminal state or
//! piping.

use std::io::{self, BufRead, Cursor, IsTerminal};

/// Abstraction over the process's standard input.
///
/// This trait allows tests to mock stdin without actually piping data.
pub trait StdinReader: Send + Sync {
    /// Check if stdin is a terminal (TTY).
    ///
    /// Returns `true` if stdin is interactive, `false` if piped.
    fn is_terminal(&self) -> bool;

    /// Open the stream for buffered, line-oriented reading.
    fn open(&self) -> io::Result<Box<dyn BufRead>>;
}

// === Real implementation ===

/// Real stdin reader using std::io.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealStdin;

impl StdinReader for RealStdin {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    // The lock is held for as long as the returned reader lives.
    fn open(&self) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(io::stdin().lock()))
    }
}

// === Mock implementation for testing ===

/// Mock stdin reader for testing.
///
/// Allows tests to simulate terminal, piped and unavailable stdin.
#[derive(Debug, Clone)]
pub struct MockStdin {
    is_terminal: bool,
    content: Option<String>,
}

impl MockStdin {
    /// Create a mock that simulates a terminal (no piped input).
    pub fn terminal() -> Self {
        Self {
            is_terminal: true,
            content: Some(String::new()),
        }
    }

    /// Create a mock that simulates piped input.
    pub fn piped(content: impl Into<String>) -> Self {
        Self {
            is_terminal: false,
            content: Some(content.into()),
        }
    }

    /// Create a mock whose stream cannot be opened.
    pub fn unavailable() -> Self {
        Self {
            is_terminal: false,
            content: None,
        }
    }
}

impl StdinReader for MockStdin {
    fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    fn open(&self) -> io::Result<Box<dyn BufRead>> {
        match &self.content {
            Some(content) => Ok(Box::new(Cursor::new(content.clone().into_bytes()))),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "stdin is closed")),
        }
    }
}

//! INI-style option files.
//!
//! ```ini
//! ; comments start with ';' or '#'
//! debug = 1
//!
//! [log]
//! log.dir = "/var/log/demo"   ; sections are flattened
//! ```
//!
//! Every `key = value` line becomes one string option. Section headers are
//! accepted and ignored, so later keys overwrite earlier ones regardless of
//! section. A file with any malformed line yields no options at all.

use std::fs;
use std::path::Path;

/// Parses INI text into `(key, value)` pairs, in file order.
///
/// Returns `None` if any line is malformed: an unclosed `[section`, a line
/// without `=`, an empty key, or an unterminated quoted value.
pub fn parse_ini(text: &str) -> Option<Vec<(String, String)>> {
    parse_lines(text).ok()
}

/// Like [`parse_ini`], but reports the 1-based number of the first bad line.
fn parse_lines(text: &str) -> Result<Vec<(String, String)>, usize> {
    let mut pairs = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            if line.ends_with(']') {
                continue;
            }
            return Err(index + 1);
        }

        let (key, value) = line.split_once('=').ok_or(index + 1)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(index + 1);
        }
        let value = parse_value(value.trim()).ok_or(index + 1)?;

        pairs.push((key.to_string(), value));
    }

    Ok(pairs)
}

/// Unquotes a quoted value; strips a trailing `; comment` from a bare one.
fn parse_value(raw: &str) -> Option<String> {
    for quote in ['"', '\''] {
        if let Some(inner) = raw.strip_prefix(quote) {
            let end = inner.find(quote)?;
            let rest = inner[end + 1..].trim_start();
            if !rest.is_empty() && !rest.starts_with(';') {
                return None;
            }
            return Some(inner[..end].to_string());
        }
    }

    let value = match raw.find(';') {
        Some(comment) => raw[..comment].trim_end(),
        None => raw,
    };
    Some(value.to_string())
}

/// Reads and parses an INI file.
///
/// A file that cannot be read or does not parse yields no pairs.
pub fn load_ini(path: impl AsRef<Path>) -> Vec<(String, String)> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "config file not loaded");
            return Vec::new();
        }
    };

    match parse_lines(&text) {
        Ok(pairs) => {
            tracing::debug!(path = %path.display(), keys = pairs.len(), "loaded config file");
            pairs
        }
        Err(line) => {
            tracing::debug!(path = %path.display(), line, "malformed config file ignored");
            Vec::new()
        }
    }
}

//! Usage listing.
//!
//! The listing has a header line naming the program, then one line per
//! option route in registration order:
//!
//! ```text
//! Usage: demo [OPTION]...
//!   -h, --help                This Help text
//!       --hello-world=<VALUE> Hello world example
//! ```
//!
//! The option column is padded to its widest entry plus one space. Routes
//! without a short option get four spaces in place of `-x, `. Pseudo-routes
//! are not listed.

use std::io::Write;
use std::path::Path;

use unicode_width::UnicodeWidthStr;

use crate::route::RouteSpec;

/// Builds usage text for a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpFormatter {
    program: String,
}

impl HelpFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Creates a formatter named after the basename of `argv[0]`.
    pub fn from_argv0(argv0: &str) -> Self {
        Self::new(program_name(argv0))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn header(&self) -> String {
        format!("Usage: {} [OPTION]...", self.program)
    }

    /// The unpadded option column for one route, or `None` for pseudo-routes.
    pub fn option_column(spec: &RouteSpec) -> Option<String> {
        let long = spec.long()?;

        let mut column = String::from("  ");
        match spec.short() {
            Some(short) => {
                column.push('-');
                column.push(short.flag());
                column.push_str(", ");
            }
            None => column.push_str("    "),
        }
        column.push_str("--");
        column.push_str(long.name());
        if long.takes_value() {
            column.push_str("=<VALUE>");
        }

        Some(column)
    }

    /// Renders the full listing, one `\n`-terminated line each.
    pub fn render<'a>(&self, specs: impl IntoIterator<Item = &'a RouteSpec>) -> String {
        let rows: Vec<(String, &str)> = specs
            .into_iter()
            .filter_map(|spec| Self::option_column(spec).map(|column| (column, spec.help())))
            .collect();

        let width = rows
            .iter()
            .map(|(column, _)| column.width())
            .max()
            .unwrap_or(0);

        let mut out = self.header();
        out.push('\n');
        for (column, help) in rows {
            out.push_str(&column);
            out.push_str(&" ".repeat(width - column.width()));
            out.push(' ');
            out.push_str(help);
            out.push('\n');
        }
        out
    }
}

/// The basename of `argv[0]`, falling back to the argument itself.
pub fn program_name(argv0: &str) -> String {
    Path::new(argv0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| argv0.to_string())
}

/// Prints `usage` to stdout and exits the process with status 0.
pub fn exit_with_usage(usage: &str) -> ! {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(usage.as_bytes());
    let _ = stdout.flush();
    std::process::exit(0)
}

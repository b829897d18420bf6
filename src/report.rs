//! Diagnostic output
//!
//! Warnings are printed as `<file>:<line>: <message>` with 1-based line
//! numbers, the format understood by editors' quickfix lists (`:make` in vim).
//! Errors use `<file>:<line>: error: <message>`, or `<file>: error: <message>`
//! when they do not refer to a line.
//!
//! When colour is enabled the location prefix is bold and the `error:` tag
//! red, using [crossterm](https://docs.rs/crossterm) styling.

use crate::checker::{CheckError, Warning};
use crossterm::style::Stylize;
use std::io::{self, Write};

/// When to colour output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Colour only when writing to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Plain-text warning line, without a trailing newline
pub fn format_warning(filename: &str, warning: &Warning) -> String {
    format!("{}:{}: {}", filename, warning.line + 1, warning.message)
}

/// Plain-text error line, without a trailing newline
pub fn format_error(filename: &str, error: &CheckError) -> String {
    match error.line() {
        Some(line) => format!("{}:{}: error: {}", filename, line + 1, error),
        None => format!("{}: error: {}", filename, error),
    }
}

/// Writes diagnostics for one output stream
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn warning(&mut self, filename: &str, warning: &Warning) -> io::Result<()> {
        if !self.color {
            return writeln!(self.out, "{}", format_warning(filename, warning));
        }
        let location = format!("{}:{}:", filename, warning.line + 1);
        writeln!(self.out, "{} {}", location.bold(), warning.message)
    }

    pub fn error(&mut self, filename: &str, error: &CheckError) -> io::Result<()> {
        if !self.color {
            return writeln!(self.out, "{}", format_error(filename, error));
        }
        let location = match error.line() {
            Some(line) => format!("{}:{}:", filename, line + 1),
            None => format!("{}:", filename),
        };
        writeln!(
            self.out,
            "{} {} {}",
            location.bold(),
            "error:".red().bold(),
            error
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

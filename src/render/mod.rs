// src/render/mod.rs

//! Output rendering for listing commands
//!
//! Results are rendered in one of two ways depending on [`OutputMode`]:
//! - `pretty`: a styled table followed by a summary line
//! - `json` / `pretty_json`: a single structured document on stdout
//!
//! Progress narration ("Getting list of ... OK") goes to stdout in pretty
//! mode and to stderr otherwise, so stdout in the structured modes carries
//! nothing but the document.
//!
//! Styling is a separate layer applied by [`Console::paint`]. It is only
//! active in pretty mode with colors enabled; column values themselves are
//! plain strings computed in [`columns`].

pub mod columns;
pub mod structured;
pub mod table;

use clap::ValueEnum;
use console::Style;
use std::io::{self, Stderr, Stdout, Write};

pub use structured::{emit_structured, structured_document};
pub use table::{Cell, Table};

/// How listing results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Human-readable tables
    #[default]
    Pretty,
    /// Compact JSON document on a single line
    Json,
    /// Indented JSON document
    #[value(name = "pretty_json")]
    PrettyJson,
}

impl OutputMode {
    pub fn is_pretty(&self) -> bool {
        matches!(self, OutputMode::Pretty)
    }

    pub fn is_structured(&self) -> bool {
        !self.is_pretty()
    }
}

/// Standard output and error streams plus the active output mode
pub struct Console<O: Write, E: Write> {
    out: O,
    err: E,
    mode: OutputMode,
    color: bool,
}

impl Console<Stdout, Stderr> {
    /// Console bound to the process streams
    ///
    /// Colors follow the terminal's capabilities and are never used outside
    /// pretty mode.
    pub fn stdio(mode: OutputMode) -> Self {
        let color = mode.is_pretty() && console::colors_enabled();
        Console::new(io::stdout(), io::stderr(), mode).with_color(color)
    }
}

impl<O: Write, E: Write> Console<O, E> {
    /// Console writing to arbitrary streams, without colors
    pub fn new(out: O, err: E, mode: OutputMode) -> Self {
        Self {
            out,
            err,
            mode,
            color: false,
        }
    }

    /// Enable or disable styling; ignored outside pretty mode
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color && self.mode.is_pretty();
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_styled(&self) -> bool {
        self.color
    }

    /// Apply a style when styling is active, otherwise return the text as-is
    pub fn paint(&self, text: impl AsRef<str>, style: &Style) -> String {
        paint(text.as_ref(), style, self.color)
    }

    /// Write narration without a trailing newline
    pub fn narrate(&mut self, text: &str) -> io::Result<()> {
        let stream = self.narration_stream();
        write!(stream, "{}", text)?;
        stream.flush()
    }

    /// Write a full narration line
    pub fn narrate_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.narration_stream(), "{}", text)
    }

    /// Write a line of result data to standard output
    pub fn out_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Standard output stream
    pub fn out(&mut self) -> &mut O {
        &mut self.out
    }

    /// Flush both streams
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    /// Give back the underlying streams
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    fn narration_stream(&mut self) -> &mut dyn Write {
        if self.mode.is_pretty() {
            &mut self.out
        } else {
            &mut self.err
        }
    }
}

/// Apply `style` to `text` when `enabled`
pub fn paint(text: &str, style: &Style, enabled: bool) -> String {
    style
        .clone()
        .force_styling(enabled)
        .apply_to(text)
        .to_string()
}

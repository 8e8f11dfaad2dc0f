// src/failure/presenter.rs

//! Console rendering of failure reports
//!
//! A report is written in this order, each part only when there is data
//! for it:
//! 1. `ERROR` marker
//! 2. context message with status code and description
//! 3. `Reason:` detail
//! 4. field validation errors
//! 5. `Hint:` line
//! 6. response headers (verbose, non-debug only)
//!
//! Reports follow the narration stream of the console: stdout in pretty
//! mode, stderr otherwise.

use super::hints::{HintContext, HintRegistry};
use super::{FailureContext, FailureReport, NON_FIELD_ERRORS};
use crate::render::Console;
use console::Style;
use std::io::{self, Write};

const VALIDATION_LABEL: &str = "Validation";

/// Writes failure reports to a console
#[derive(Debug, Clone)]
pub struct FailurePresenter<'a> {
    hints: &'a HintRegistry,
    verbose: bool,
    debug: bool,
    api_key_configured: bool,
}

impl<'a> FailurePresenter<'a> {
    pub fn new(hints: &'a HintRegistry) -> Self {
        Self {
            hints,
            verbose: false,
            debug: false,
            api_key_configured: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// In debug mode headers are left to the debug log instead
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn api_key_configured(mut self, configured: bool) -> Self {
        self.api_key_configured = configured;
        self
    }

    /// Write the full report
    pub fn present<O: Write, E: Write>(
        &self,
        console: &mut Console<O, E>,
        report: &FailureReport,
        context: &FailureContext,
    ) -> io::Result<()> {
        let red = Style::new().red();
        let bold = Style::new().bold();

        if context.nl {
            console.narrate_line("")?;
            console.narrate(&console.paint("ERROR: ", &red))?;
        } else {
            console.narrate_line(&console.paint("ERROR", &red))?;
        }

        let summary = format!(
            "{} (status: {} - {})",
            context.message, report.status, report.status_description
        );
        console.narrate_line(&console.paint(summary, &red))?;

        if let Some(detail) = &report.detail {
            console.narrate_line("")?;
            console.narrate_line(&console.paint(format!("Reason: {}", detail), &bold))?;
        }

        if let Some(fields) = report.fields.as_ref().filter(|f| !f.is_empty()) {
            if report.detail.is_none() {
                console.narrate_line("")?;
            }
            for (field, messages) in fields {
                let label = if field == NON_FIELD_ERRORS {
                    VALIDATION_LABEL
                } else {
                    field.as_str()
                };
                let line = format!(
                    "{}: {}",
                    console.paint(label, &bold),
                    console.paint(messages.join(" "), &red)
                );
                console.narrate_line(&line)?;
            }
        }

        let hint_context = HintContext {
            report,
            api_key_configured: self.api_key_configured,
        };
        if let Some(hint) = self.hints.resolve(&hint_context) {
            let line = format!("Hint: {}", console.paint(hint, &Style::new().yellow()));
            console.narrate_line(&line)?;
        }

        if self.verbose && !self.debug {
            if let Some(headers) = report.headers.as_ref().filter(|h| !h.is_empty()) {
                console.narrate_line("")?;
                console.narrate_line("Headers in Reply:")?;
                for (name, value) in headers {
                    console.narrate_line(&format!("{} = {}", name, value))?;
                }
            }
        }

        console.flush()
    }
}

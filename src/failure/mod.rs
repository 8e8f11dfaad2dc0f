// src/failure/mod.rs

//! Remote failure reports
//!
//! A [`FailureReport`] describes one failed call to the package service. It
//! is built by the API client, shown once by the [`FailurePresenter`], and
//! then either ends the command, is handed back to the caller, or is
//! dropped, according to the [`FailurePolicy`].

pub mod hints;
pub mod presenter;

pub use hints::{HintContext, HintFn, HintRegistry};
pub use presenter::FailurePresenter;

use crate::error::{Error, Result};
use crate::render::Console;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use tracing::warn;

/// Bucket the service uses for errors not tied to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation messages per field
pub type FieldErrors = Vec<(String, Vec<String>)>;

/// A non-success response from the package service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FailureReport {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status code
    pub status_description: String,
    pub detail: Option<String>,
    /// Field name to validation messages, in the order the service sent them
    pub fields: Option<FieldErrors>,
    /// Response headers
    pub headers: Option<BTreeMap<String, String>>,
}

impl FailureReport {
    pub fn new(status: u16, status_description: impl Into<String>) -> Self {
        Self {
            status,
            status_description: status_description.into(),
            ..Default::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_field_errors(
        mut self,
        field: impl Into<String>,
        messages: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let field = field.into();
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        let fields = self.fields.get_or_insert_with(Vec::new);
        match fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = messages,
            None => fields.push((field, messages)),
        }
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Process exit code for this failure
    ///
    /// The status code itself; a zero status maps to 1 so failure never
    /// looks like success.
    pub fn exit_code(&self) -> i32 {
        if self.status == 0 { 1 } else { i32::from(self.status) }
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API request failed (status: {} - {})", self.status, self.status_description)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

/// What happens after a failure has been reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// End the command with the status code as exit code
    #[default]
    Exit,
    /// Hand the failure back to the caller
    Reraise,
    /// Report and carry on
    Swallow,
}

/// Caller-supplied framing for a failure report
#[derive(Debug, Clone)]
pub struct FailureContext {
    /// E.g. "Failed to get list of packages!"
    pub message: String,
    /// Start the report on a fresh line instead of finishing the current one
    pub nl: bool,
    pub policy: FailurePolicy,
}

impl FailureContext {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            nl: false,
            policy: FailurePolicy::default(),
        }
    }

    pub fn nl(mut self, nl: bool) -> Self {
        self.nl = nl;
        self
    }

    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for FailureContext {
    fn default() -> Self {
        Self::new("Failed to perform operation!")
    }
}

/// Run `operation`, reporting an API failure exactly once if it occurs
///
/// Returns `Ok(Some(value))` on success. On an API failure the report is
/// presented and then, per the context's policy:
/// - `Exit` → `Err(Error::Exit(status))`
/// - `Reraise` → `Err(Error::Api(report))`
/// - `Swallow` → `Ok(None)`
///
/// The policy applies even when the report could not be written. Any other
/// error is returned untouched and nothing is presented.
pub fn handle_api_failures<T, O, E, F>(
    console: &mut Console<O, E>,
    presenter: &FailurePresenter<'_>,
    context: &FailureContext,
    operation: F,
) -> Result<Option<T>>
where
    O: Write,
    E: Write,
    F: FnOnce() -> Result<T>,
{
    match operation() {
        Ok(value) => Ok(Some(value)),
        Err(Error::Api(report)) => {
            if let Err(e) = presenter.present(console, &report, context) {
                warn!("Failed to write failure report: {}", e);
            }
            match context.policy {
                FailurePolicy::Exit => Err(Error::Exit(report.exit_code())),
                FailurePolicy::Reraise => Err(Error::Api(report)),
                FailurePolicy::Swallow => Ok(None),
            }
        }
        Err(other) => Err(other),
    }
}

// src/failure/hints.rs

//! Status-code specific hints for failure reports
//!
//! Hints are looked up by exact status code in a [`HintRegistry`]. New codes
//! are supported by registering another function; the lookup itself never
//! changes. A code without an entry, or a hint function that returns
//! nothing, simply means no hint is shown.
//!
//! The process-wide registry is installed once at startup with [`install`]
//! and read through [`global`] afterwards.

use super::FailureReport;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use tracing::warn;

static GLOBAL_HINTS: OnceLock<HintRegistry> = OnceLock::new();

/// What a hint function gets to look at
#[derive(Debug, Clone, Copy)]
pub struct HintContext<'a> {
    pub report: &'a FailureReport,
    /// Whether an API key was configured for the request
    pub api_key_configured: bool,
}

/// Produces a hint for one status code
///
/// Hint functions should not panic. A panic is caught and logged, and the
/// report is shown without a hint.
pub type HintFn = fn(&HintContext<'_>) -> Option<String>;

/// Mapping from status code to hint function
#[derive(Clone, Default)]
pub struct HintRegistry {
    hints: BTreeMap<u16, HintFn>,
}

impl fmt::Debug for HintRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HintRegistry")
            .field("statuses", &self.hints.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HintRegistry {
    /// Registry with no hints at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in hints for 401, 404 and 500
    pub fn with_defaults() -> Self {
        Self::empty()
            .register(401, unauthorized_hint)
            .register(404, not_found_hint)
            .register(500, server_error_hint)
    }

    /// Add or replace the hint for `status`
    pub fn register(mut self, status: u16, hint: HintFn) -> Self {
        self.hints.insert(status, hint);
        self
    }

    pub fn contains(&self, status: u16) -> bool {
        self.hints.contains_key(&status)
    }

    /// Hint for the report's status, if any
    pub fn resolve(&self, context: &HintContext<'_>) -> Option<String> {
        let hint = self.hints.get(&context.report.status)?;
        match panic::catch_unwind(AssertUnwindSafe(|| hint(context))) {
            Ok(hint) => hint.filter(|hint| !hint.trim().is_empty()),
            Err(_) => {
                warn!("Hint for status {} panicked", context.report.status);
                None
            }
        }
    }
}

/// Install the process-wide registry
///
/// Only the first call wins; later calls hand their registry back.
pub fn install(registry: HintRegistry) -> Result<(), HintRegistry> {
    GLOBAL_HINTS.set(registry)
}

/// The process-wide registry, defaulting to [`HintRegistry::with_defaults`]
pub fn global() -> &'static HintRegistry {
    GLOBAL_HINTS.get_or_init(HintRegistry::with_defaults)
}

fn unauthorized_hint(context: &HintContext<'_>) -> Option<String> {
    let hint = if context.api_key_configured {
        "Since you have an API key set, this probably means you don't have \
         the permission to perform this action."
    } else {
        "You don't have an API key set, but it seems this action requires \
         authentication - Try setting your API key via --api-key or \
         CLOUDSMITH_API_KEY first, then try again."
    };
    Some(hint.to_string())
}

fn not_found_hint(_context: &HintContext<'_>) -> Option<String> {
    Some("This usually means the user/org is wrong or not visible.".to_string())
}

fn server_error_hint(_context: &HintContext<'_>) -> Option<String> {
    Some(
        "This usually means the Cloudsmith service is encountering issues, \
         either with this specific command or as a whole. Please accept our \
         apologies and try again later."
            .to_string(),
    )
}

// src/progress.rs

//! Spinner shown on stderr while a request is outstanding

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Tick interval for the spinner
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A spinner that clears its line when dropped
///
/// indicatif keeps it hidden when stderr is not a terminal, so piped output
/// never contains spinner frames.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Start a spinner with a message, or a hidden one when not `enabled`
    pub fn start(enabled: bool, message: &str) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar }
    }

    /// Run `f` with a spinner active, clearing it before returning
    pub fn run<T>(enabled: bool, message: &str, f: impl FnOnce() -> T) -> T {
        let _spinner = Self::start(enabled, message);
        f()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

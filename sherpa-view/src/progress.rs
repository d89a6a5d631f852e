//! Terminal loading indicator.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use sherpa_client::progress::Progress;

/// Indicatif spinner shown while a request is in flight.
///
/// Draws to stderr and hides itself when stderr is not a terminal.
pub struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    /// Spinner (unknown total).
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style.tick_chars("-\\|/ "));
        }
        Self { pb }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for SpinnerProgress {
    fn start(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
        self.pb.enable_steady_tick(Duration::from_millis(80));
    }
    fn message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }
    fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

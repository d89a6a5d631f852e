//! Loading-indicator hook for form submissions.
//!
//! Use `NoopProgress` for headless runs and tests; terminal front-ends plug in
//! a spinner (see `sherpa_view::progress`).

/// Minimal progress interface driven by the form controller.
pub trait Progress: Send + Sync {
    /// The request is in flight.
    fn start(&self, _msg: &str) {}
    /// Replace current message.
    fn message(&self, _msg: &str) {}
    /// The request settled (success or failure).
    fn finish(&self) {}
}

/// No-op reporter.
#[derive(Default, Clone, Copy)]
pub struct NoopProgress;
impl Progress for NoopProgress {}

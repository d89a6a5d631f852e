//! Presentation side of SourceSherpa answers.
//!
//! [`normalize_fragment`] recovers structured-query fragments (the Mongo
//! filter) from loosely shaped LLM output; [`ResultView`] projects the form
//! state into the answer and debug panels; [`SpinnerProgress`] is the loading
//! indicator for terminals.

pub mod normalize;
pub mod progress;
pub mod render;

pub use normalize::normalize_fragment;
pub use progress::SpinnerProgress;
pub use render::{Panel, ResultView, Section};

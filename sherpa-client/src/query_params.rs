//! Query parameters collected by the form for a single submission.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::config::client_config::ClientConfig;
use crate::error_handler::FormError;

/// Accepted values for `max_context_docs`.
pub const MAX_CONTEXT_DOCS_RANGE: RangeInclusive<u32> = 1..=1000;

/// Human-readable form of [`MAX_CONTEXT_DOCS_RANGE`].
pub const MAX_CONTEXT_DOCS_RANGE_DETAIL: &str = "expected a value in 1..=1000";

/// Request body for `POST /v1/stage1/answer`.
///
/// All four fields are always serialized, including defaulted ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    /// Natural-language question about the codebase.
    pub question: String,
    /// Model identifier forwarded to the backend.
    pub model_id: String,
    /// Upper bound on context documents the backend retrieves.
    pub max_context_docs: u32,
    /// Ask the backend to include its `_debug` payload.
    pub debug: bool,
}

impl QueryParameters {
    /// Starts a submission for `question` with the form defaults from `cfg`.
    pub fn new(question: impl Into<String>, cfg: &ClientConfig) -> Self {
        Self {
            question: question.into(),
            model_id: cfg.model_id.clone(),
            max_context_docs: cfg.max_context_docs,
            debug: false,
        }
    }

    /// Applies the form's own rules: required text fields and the docs range.
    ///
    /// # Errors
    /// Returns [`FormError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.question.trim().is_empty() {
            return Err(FormError::Validation {
                field: "question",
                reason: "this field is required",
            });
        }
        if self.model_id.trim().is_empty() {
            return Err(FormError::Validation {
                field: "model_id",
                reason: "this field is required",
            });
        }
        if !MAX_CONTEXT_DOCS_RANGE.contains(&self.max_context_docs) {
            return Err(FormError::Validation {
                field: "max_context_docs",
                reason: MAX_CONTEXT_DOCS_RANGE_DETAIL,
            });
        }
        Ok(())
    }
}

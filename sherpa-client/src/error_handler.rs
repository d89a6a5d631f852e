//! Unified error handling for `sherpa-client`.
//!
//! This module exposes a single top-level error type [`ClientError`] for the
//! whole library, and groups configuration errors in [`ConfigError`]. Small
//! helpers for reading/validating configuration values return the unified
//! [`Result<T>`] alias.
//!
//! All messages include the suffix `[Sherpa Client]` to simplify attribution in
//! logs. [`ClientError::user_message`] is what the form shows to the user and
//! deliberately carries no suffix.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Fallback text shown when an error carries no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `sherpa-client` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream returned a non-successful HTTP status.
    ///
    /// `body` is the raw response text; it is shown to the user verbatim.
    #[error("[Sherpa Client] HTTP {status} from {url}: {body}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Full response body as text (not parsed).
        body: String,
    },

    /// Underlying HTTP transport error (connect, body read, timeout).
    #[error("[Sherpa Client] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Successful response whose body was not valid JSON.
    #[error("[Sherpa Client] failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text surfaced to the user for this error.
    ///
    /// Non-success statuses show the response body exactly as received; every
    /// other error shows its message. Empty text falls back to
    /// [`UNKNOWN_ERROR`].
    pub fn user_message(&self) -> String {
        let msg = match self {
            ClientError::HttpStatus { body, .. } => body.clone(),
            ClientError::Transport(e) => e.to_string(),
            ClientError::Decode(reason) => reason.clone(),
            ClientError::Config(e) => e.to_string(),
        };
        if msg.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            msg
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (like limits, timeouts).
    #[error("[Sherpa Client] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `SHERPA_MAX_CONTEXT_DOCS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Sherpa Client] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `SHERPA_API_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[Sherpa Client] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `max_context_docs`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Form errors                                                               */
/* ------------------------------------------------------------------------- */

/// A submission rejected before any request was issued.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field is blank or a bounded field is out of range.
    #[error("{field}: {reason}")]
    Validation {
        /// Form field name as sent on the wire (e.g., `question`).
        field: &'static str,
        /// Short explanation for the user.
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Parses an optional `u32` value (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ClientError::Config`] with [`ConfigError::InvalidNumber`] if the
/// value is set but not a valid `u32`.
pub fn parse_opt_u32(var: &'static str, value: Option<String>) -> Result<Option<u32>> {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().parse::<u32>().map(Some).map_err(|_| {
            ClientError::from(ConfigError::InvalidNumber {
                var,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/// Parses an optional `u64` value (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the value is not a valid `u64`.
pub fn parse_opt_u64(var: &'static str, value: Option<String>) -> Result<Option<u64>> {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().parse::<u64>().map(Some).map_err(|_| {
            ClientError::from(ConfigError::InvalidNumber {
                var,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ClientError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that an integer lies within an inclusive range.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]`.
pub fn validate_range_u32(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
    detail: &'static str,
) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, detail }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_shows_raw_body() {
        let err = ClientError::HttpStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: "http://localhost:8000/v1/stage1/answer".into(),
            body: "internal error".into(),
        };
        assert_eq!(err.user_message(), "internal error");
        assert!(err.to_string().contains("[Sherpa Client]"));
    }

    #[test]
    fn empty_message_falls_back() {
        let err = ClientError::HttpStatus {
            status: StatusCode::BAD_GATEWAY,
            url: "http://x".into(),
            body: String::new(),
        };
        assert_eq!(err.user_message(), UNKNOWN_ERROR);
    }

    #[test]
    fn numbers_and_ranges() {
        assert_eq!(parse_opt_u32("N", Some(" 12 ".into())).unwrap(), Some(12));
        assert_eq!(parse_opt_u32("N", Some("".into())).unwrap(), None);
        assert!(parse_opt_u32("N", Some("twelve".into())).is_err());
        assert!(validate_range_u32("max", 0, 1, 1000, "expected 1..=1000").is_err());
        assert!(validate_range_u32("max", 1000, 1, 1000, "expected 1..=1000").is_ok());
        assert!(validate_http_endpoint("URL", "ftp://host").is_err());
    }
}

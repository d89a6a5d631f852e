//! Client config loaded from environment variables.
//!
//! Every variable is optional; unset or empty values fall back to the
//! defaults in [`client_config`](crate::config::client_config).
//!
//! # Environment variables
//!
//! - `SHERPA_API_URL`          = base URL of the API (`http://` or `https://`)
//! - `SHERPA_MODEL_ID`         = model preselected in the form
//! - `SHERPA_MAX_CONTEXT_DOCS` = context-document limit (u32, 1..=1000)
//! - `SHERPA_TIMEOUT_SECS`     = request timeout in seconds (u64)

use crate::{
    config::client_config::{ClientConfig, DEFAULT_TIMEOUT_SECS},
    error_handler::{
        ClientError, parse_opt_u32, parse_opt_u64, validate_http_endpoint, validate_range_u32,
    },
    query_params::{MAX_CONTEXT_DOCS_RANGE, MAX_CONTEXT_DOCS_RANGE_DETAIL},
};

/// Builds a [`ClientConfig`] from the process environment.
///
/// # Errors
/// See [`config_from_lookup`].
pub fn config_from_env() -> Result<ClientConfig, ClientError> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Builds a [`ClientConfig`] from an arbitrary key lookup.
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat)
///   if `SHERPA_API_URL` lacks an http(s) scheme
/// - [`ConfigError::InvalidNumber`](crate::error_handler::ConfigError::InvalidNumber)
///   if a numeric variable does not parse
/// - [`ConfigError::OutOfRange`](crate::error_handler::ConfigError::OutOfRange)
///   if `SHERPA_MAX_CONTEXT_DOCS` is outside `1..=1000`
pub fn config_from_lookup<F>(lookup: F) -> Result<ClientConfig, ClientError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let defaults = ClientConfig::default();
    let non_empty = |name| lookup(name).filter(|v: &String| !v.trim().is_empty());

    let api_url = match non_empty("SHERPA_API_URL") {
        Some(url) => {
            let url = url.trim().trim_end_matches('/').to_string();
            validate_http_endpoint("SHERPA_API_URL", &url)?;
            url
        }
        None => defaults.api_url,
    };

    let model_id = non_empty("SHERPA_MODEL_ID")
        .map(|m| m.trim().to_string())
        .unwrap_or(defaults.model_id);

    let max_context_docs = match parse_opt_u32(
        "SHERPA_MAX_CONTEXT_DOCS",
        lookup("SHERPA_MAX_CONTEXT_DOCS"),
    )? {
        Some(n) => {
            validate_range_u32(
                "SHERPA_MAX_CONTEXT_DOCS",
                n,
                *MAX_CONTEXT_DOCS_RANGE.start(),
                *MAX_CONTEXT_DOCS_RANGE.end(),
                MAX_CONTEXT_DOCS_RANGE_DETAIL,
            )?;
            n
        }
        None => defaults.max_context_docs,
    };

    let timeout_secs = parse_opt_u64("SHERPA_TIMEOUT_SECS", lookup("SHERPA_TIMEOUT_SECS"))?
        .or(Some(DEFAULT_TIMEOUT_SECS));

    Ok(ClientConfig {
        api_url,
        model_id,
        max_context_docs,
        timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::client_config::{DEFAULT_API_URL, DEFAULT_MODEL_ID};
    use crate::error_handler::ConfigError;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_env_uses_defaults() {
        let cfg = config_from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.model_id, DEFAULT_MODEL_ID);
        assert_eq!(cfg.max_context_docs, 50);
        assert_eq!(cfg.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn overrides_are_applied_and_trimmed() {
        let cfg = config_from_lookup(lookup_from(&[
            ("SHERPA_API_URL", "https://sherpa.internal:9000/"),
            ("SHERPA_MODEL_ID", " anthropic.claude-v2 "),
            ("SHERPA_MAX_CONTEXT_DOCS", "200"),
            ("SHERPA_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_url, "https://sherpa.internal:9000");
        assert_eq!(cfg.model_id, "anthropic.claude-v2");
        assert_eq!(cfg.max_context_docs, 200);
        assert_eq!(cfg.timeout_secs, Some(15));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = config_from_lookup(lookup_from(&[("SHERPA_API_URL", "localhost:8000")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Config(ConfigError::InvalidFormat { .. })
        ));

        let err = config_from_lookup(lookup_from(&[("SHERPA_MAX_CONTEXT_DOCS", "1001")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Config(ConfigError::OutOfRange { .. })
        ));

        let err = config_from_lookup(lookup_from(&[("SHERPA_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Config(ConfigError::InvalidNumber { .. })
        ));
    }
}

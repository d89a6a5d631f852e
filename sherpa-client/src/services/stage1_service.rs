//! Thin client for the SourceSherpa stage-1 answer endpoint.
//!
//! - `POST {api_url}/v1/stage1/answer`: one question in, one JSON envelope out
//!
//! The envelope is returned untyped ([`serde_json::Value`]): its shape varies
//! across backend versions and is normalized by the view layer.
//!
//! # Examples
//!
//! ```no_run
//! use sherpa_client::config::client_config::ClientConfig;
//! use sherpa_client::query_params::QueryParameters;
//! use sherpa_client::services::stage1_service::Stage1Service;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ClientConfig::default();
//! let svc = Stage1Service::new(&cfg)?;
//!
//! let params = QueryParameters::new("Where is the login form validated?", &cfg);
//! let envelope = svc.answer(&params).await?;
//! println!("{}", envelope["llm_answer"]);
//! # Ok(()) }
//! ```

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::{
    config::client_config::{ClientConfig, DEFAULT_TIMEOUT_SECS},
    error_handler::{ClientError, Result, validate_http_endpoint},
    query_params::QueryParameters,
};

/// Path of the answer endpoint, relative to the API base URL.
pub const ANSWER_PATH: &str = "/v1/stage1/answer";

/// Client for `POST /v1/stage1/answer`.
///
/// Reuses one `reqwest::Client` configured with the timeout from
/// [`ClientConfig`]. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Stage1Service {
    client: reqwest::Client,
    url_answer: String,
}

impl Stage1Service {
    /// Creates a new [`Stage1Service`] from the given config.
    ///
    /// # Errors
    /// - [`ClientError::Config`] if `cfg.api_url` is not an http(s) URL
    /// - [`ClientError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        let base = cfg.api_url.trim().trim_end_matches('/');
        validate_http_endpoint("api_url", base)?;

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let url_answer = format!("{base}{ANSWER_PATH}");

        info!(
            endpoint = %url_answer,
            timeout_secs = timeout.as_secs(),
            "Stage1Service initialized"
        );

        Ok(Self { client, url_answer })
    }

    /// Full URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url_answer
    }

    /// Submits one question and returns the raw JSON envelope.
    ///
    /// The body always carries `question`, `model_id`, `max_context_docs`
    /// and `debug`.
    ///
    /// # Errors
    /// - [`ClientError::HttpStatus`] for non-2xx responses; `body` holds the
    ///   response text unparsed
    /// - [`ClientError::Transport`] for network or body-read failures
    /// - [`ClientError::Decode`] if a 2xx body is not valid JSON
    #[instrument(skip_all, fields(model = %params.model_id, max_docs = params.max_context_docs))]
    pub async fn answer(&self, params: &QueryParameters) -> Result<Value> {
        let started = Instant::now();

        debug!(
            question_len = params.question.len(),
            debug = params.debug,
            "POST {}", self.url_answer
        );

        let resp = self
            .client
            .post(&self.url_answer)
            .json(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;

            error!(
                %status,
                url = %self.url_answer,
                body_len = body.len(),
                latency_ms = started.elapsed().as_millis(),
                "stage-1 answer returned non-success status"
            );

            return Err(ClientError::HttpStatus {
                status,
                url: self.url_answer.clone(),
                body,
            });
        }

        let text = resp.text().await?;
        let envelope: Value = serde_json::from_str(&text).map_err(|e| {
            error!(
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode stage-1 answer"
            );
            ClientError::Decode(e.to_string())
        })?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            has_debug = envelope.get("_debug").is_some(),
            "stage-1 answer completed"
        );

        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_derived_from_base() {
        let cfg = ClientConfig {
            api_url: "http://127.0.0.1:8000/".into(),
            ..ClientConfig::default()
        };
        let svc = Stage1Service::new(&cfg).unwrap();
        assert_eq!(svc.url(), "http://127.0.0.1:8000/v1/stage1/answer");
    }

    #[test]
    fn rejects_base_without_scheme() {
        let cfg = ClientConfig {
            api_url: "127.0.0.1:8000".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            Stage1Service::new(&cfg),
            Err(ClientError::Config(_))
        ));
    }
}

//! Health probe for the SourceSherpa API.
//!
//! - `GET {api_url}/v1/ping` → `{"status": "ok"}`
//!
//! The returned [`HealthStatus`] is JSON-serializable. [`HealthService::check`]
//! is resilient and never fails (errors mapped to `ok=false`);
//! [`HealthService::try_ping`] returns a strict `Result`.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::client_config::ClientConfig;
use crate::error_handler::{ClientError, Result, validate_http_endpoint};

/// Path of the ping endpoint, relative to the API base URL.
pub const PING_PATH: &str = "/v1/ping";

/// A serializable health snapshot for the API.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Probed URL.
    pub endpoint: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct PingResponse {
    status: String,
}

/// Health checker with its own short-timeout HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    url_ping: String,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds).
    ///
    /// # Errors
    /// - [`ClientError::Config`] if `cfg.api_url` is not an http(s) URL
    /// - [`ClientError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: &ClientConfig, timeout_secs: Option<u64>) -> Result<Self> {
        let base = cfg.api_url.trim().trim_end_matches('/');
        validate_http_endpoint("api_url", base)?;

        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url_ping: format!("{base}{PING_PATH}"),
        })
    }

    /// Probes the API. Never returns an error.
    pub async fn check(&self) -> HealthStatus {
        let start = Instant::now();
        match self.try_ping().await {
            Ok(reported) => {
                let latency_ms = start.elapsed().as_millis();
                let ok = reported == "ok";
                info!(endpoint = %self.url_ping, ok, latency_ms, "health probe completed");
                HealthStatus {
                    endpoint: self.url_ping.clone(),
                    ok,
                    latency_ms,
                    message: format!("status: {reported}"),
                }
            }
            Err(err) => {
                let latency_ms = start.elapsed().as_millis();
                warn!(endpoint = %self.url_ping, latency_ms, error = %err, "health probe failed");
                HealthStatus {
                    endpoint: self.url_ping.clone(),
                    ok: false,
                    latency_ms,
                    message: err.user_message(),
                }
            }
        }
    }

    /// Strict probe: returns the `status` string reported by the API.
    ///
    /// # Errors
    /// - [`ClientError::HttpStatus`] for non-2xx responses
    /// - [`ClientError::Transport`] for network failures
    /// - [`ClientError::Decode`] if the body is not `{"status": "..."}`
    pub async fn try_ping(&self) -> Result<String> {
        debug!("GET {}", self.url_ping);
        let resp = self.client.get(&self.url_ping).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, url = %self.url_ping, "ping returned non-success status");
            return Err(ClientError::HttpStatus {
                status,
                url: self.url_ping.clone(),
                body,
            });
        }

        let text = resp.text().await?;
        let out: PingResponse = serde_json::from_str(&text)
            .map_err(|e| ClientError::Decode(format!("{e}; expected `{{\"status\": string}}`")))?;
        Ok(out.status)
    }
}

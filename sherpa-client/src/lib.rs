//! Client side of SourceSherpa: ask a codebase question over HTTP.
//!
//! - [`query_params`]: the four form fields and their validation
//! - [`config`]: API base URL, defaults and timeouts (env-driven)
//! - [`services::stage1_service`]: `POST /v1/stage1/answer`
//! - [`health_service`]: `GET /v1/ping`
//! - [`form_controller`]: `{loading, result, error}` state around one submission
//! - [`telemetry`]: tracing layer shared by the workspace binaries

pub mod config;
pub mod error_handler;
pub mod form_controller;
pub mod health_service;
pub mod progress;
pub mod query_params;
pub mod services;
pub mod telemetry;

pub use error_handler::{ClientError, ConfigError, FormError};
pub use form_controller::{FormController, FormState};
pub use query_params::QueryParameters;

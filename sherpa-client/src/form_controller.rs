//! Form controller: owns the submission state and issues the answer request.
//!
//! State is `{loading, result, error}`. A submission validates the form,
//! clears the previous outcome, raises `loading`, awaits one request, stores
//! either the JSON envelope or an error message, and always lowers `loading`.
//!
//! Submissions are not serialized or cancelled. Two overlapping submissions
//! race, and whichever response resolves last owns the final state.
//! Front-ends that want a single request in flight submit sequentially.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{
    error_handler::FormError,
    progress::{NoopProgress, Progress},
    query_params::QueryParameters,
    services::stage1_service::Stage1Service,
};

/// Snapshot of what the form currently displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// A request is in flight.
    pub loading: bool,
    /// Last successful envelope.
    pub result: Option<Value>,
    /// Last error message, verbatim.
    pub error: Option<String>,
}

/// Drives submissions against a shared [`Stage1Service`].
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct FormController {
    service: Arc<Stage1Service>,
    state: Arc<RwLock<FormState>>,
}

impl FormController {
    /// Creates a controller with an empty state.
    pub fn new(service: Arc<Stage1Service>) -> Self {
        Self {
            service,
            state: Arc::new(RwLock::new(FormState::default())),
        }
    }

    /// Returns a copy of the current state.
    pub async fn state(&self) -> FormState {
        self.state.read().await.clone()
    }

    /// Whether a request is in flight (drives the disabled submit control).
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Submits without a loading indicator.
    ///
    /// # Errors
    /// See [`FormController::submit_with`].
    pub async fn submit(&self, params: &QueryParameters) -> Result<(), FormError> {
        self.submit_with(params, &NoopProgress).await
    }

    /// Submits `params`, reporting the in-flight period to `progress`.
    ///
    /// Request failures are not returned: they land in [`FormState::error`].
    ///
    /// # Errors
    /// Returns [`FormError::Validation`] when a required field is blank or
    /// out of range. In that case no request is issued and the state is left
    /// untouched.
    pub async fn submit_with<P>(&self, params: &QueryParameters, progress: &P) -> Result<(), FormError>
    where
        P: Progress + ?Sized,
    {
        params.validate()?;

        {
            let mut st = self.state.write().await;
            st.error = None;
            st.result = None;
            st.loading = true;
        }
        progress.start("Loading...");

        let outcome = self.service.answer(params).await;

        {
            let mut st = self.state.write().await;
            match outcome {
                Ok(envelope) => {
                    debug!("storing answer envelope");
                    st.result = Some(envelope);
                }
                Err(err) => {
                    warn!(error = %err, "submission failed");
                    st.error = Some(err.user_message());
                }
            }
            st.loading = false;
        }
        progress.finish();

        Ok(())
    }
}

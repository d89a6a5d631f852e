/// Default base URL of the SourceSherpa API.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Model preselected in the form.
pub const DEFAULT_MODEL_ID: &str = "us.amazon.nova-premier-v1:0";

/// Default number of context documents the backend may fetch.
pub const DEFAULT_MAX_CONTEXT_DOCS: u32 = 50;

/// Default request timeout. Answers chain several LLM calls, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for talking to the SourceSherpa API.
///
/// # Fields
///
/// - `api_url`: Base URL of the API (paths such as `/v1/stage1/answer` are appended).
/// - `model_id`: Model identifier preselected for new submissions.
/// - `max_context_docs`: Context-document limit preselected for new submissions.
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use sherpa_client::config::client_config::ClientConfig;
///
/// let cfg = ClientConfig {
///     api_url: "http://localhost:8000".to_string(),
///     ..ClientConfig::default()
/// };
/// assert_eq!(cfg.max_context_docs, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API.
    pub api_url: String,

    /// Default model identifier for the form.
    pub model_id: String,

    /// Default maximum number of context documents (1..=1000).
    pub max_context_docs: u32,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_context_docs: DEFAULT_MAX_CONTEXT_DOCS,
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

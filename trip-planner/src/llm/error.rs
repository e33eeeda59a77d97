//! Chat-completion client error types.

/// Errors from the chat-completion endpoint.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Client could not be built from its configuration
    #[error("LLM client not configured: {0}")]
    NotConfigured(String),

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("LLM API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("invalid LLM response: {0}")]
    InvalidResponse(String),

    /// The completion had no text
    #[error("LLM returned an empty completion")]
    EmptyCompletion,
}

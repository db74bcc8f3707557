use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing required fields: provider, apiKey, prompt")]
    MissingFields,

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Non-success status from the provider, passed through untouched.
    #[error("{provider} API error: {status}")]
    Upstream {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for LlmError {
    fn from(e: serde_json::Error) -> Self {
        LlmError::Internal(e.to_string())
    }
}

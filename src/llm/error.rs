use thiserror::Error;

/// Failure talking to the chat-completions endpoint.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Failed to decode completion: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Completion contained no choices")]
    NoChoices,
}

impl LlmError {
    /// Map a non-success status to the matching variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::Authentication(body.to_string()),
            429 => Self::RateLimited(body.to_string()),
            _ => Self::Api {
                status,
                message: body.to_string(),
            },
        }
    }
}

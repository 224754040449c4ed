use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised at the LLM backend boundary. The agent layer catches these
/// and degrades to empty output; callers below the agent layer see them as-is.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("conversation must contain at least one message")]
    EmptyConversation,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server error: {0}")]
    Server(StatusCode),

    #[error("API error: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

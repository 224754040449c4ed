use anyhow::Result;

use crate::errors::ProviderResult;
use crate::models::message::Message;

/// Base trait for chat-completion backends (OpenAI, DeepSeek, etc).
///
/// Implementations differ only in endpoint, model identifier, and
/// model-specific tuning; everything above this trait is backend-agnostic.
pub trait Provider: Send + Sync {
    /// Create a provider instance from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Send an ordered conversation and return the model's text reply
    /// verbatim. The conversation must be non-empty and is never mutated.
    fn complete(&self, messages: &[Message]) -> ProviderResult<String>;

    /// Human-readable description of the backend and its configuration
    fn describe(&self) -> String;
}

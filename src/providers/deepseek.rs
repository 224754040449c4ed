use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use super::base::Provider;
use super::configs::DeepSeekProviderConfig;
use super::utils::{check_api_error, messages_to_chat_spec, response_text};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

/// DeepSeek exposes the same chat-completions wire format as OpenAI on its
/// own endpoint and model namespace
pub struct DeepSeekProvider {
    client: Client,
    config: DeepSeekProviderConfig,
}

impl DeepSeekProvider {
    pub fn new(config: DeepSeekProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()?;

        Ok(Self { client, config })
    }

    fn post(&self, payload: Value) -> ProviderResult<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );
        debug!(url = %url, model = self.config.model.as_str(), "posting chat completion");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()?;

        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            status => Err(ProviderError::Server(status)),
        }
    }
}

impl Provider for DeepSeekProvider {
    fn from_env() -> Result<Self> {
        let config = DeepSeekProviderConfig::from_env()?;
        Self::new(config)
    }

    fn complete(&self, messages: &[Message]) -> ProviderResult<String> {
        if messages.is_empty() {
            return Err(ProviderError::EmptyConversation);
        }

        let payload = json!({
            "model": self.config.model.as_str(),
            "messages": messages_to_chat_spec(messages),
        });

        let response = self.post(payload)?;
        check_api_error(&response)?;
        response_text(&response)
    }

    fn describe(&self) -> String {
        format!("DeepSeek with Model: {}", self.config.model.as_str())
    }
}

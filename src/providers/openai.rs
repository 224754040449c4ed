use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client; // blocking API: the pipelines are a fully sequential call chain
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use super::base::Provider;
use super::configs::OpenAiProviderConfig;
use super::utils::{check_api_error, messages_to_chat_spec, response_text};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
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

impl Provider for OpenAiProvider {
    fn from_env() -> Result<Self> {
        let config = OpenAiProviderConfig::from_env()?;
        Self::new(config)
    }

    fn complete(&self, messages: &[Message]) -> ProviderResult<String> {
        if messages.is_empty() {
            return Err(ProviderError::EmptyConversation);
        }

        let mut payload = json!({
            "model": self.config.model.as_str(),
            "messages": messages_to_chat_spec(messages),
        });

        // reasoning_effort is accepted only by the reasoning models; sending
        // it elsewhere is a request error, so the gate is on the model
        if self.config.model.is_reasoning() {
            if let Some(effort) = self.config.reasoning_effort {
                payload
                    .as_object_mut()
                    .unwrap()
                    .insert("reasoning_effort".to_string(), json!(effort.as_str()));
            }
        }

        let response = self.post(payload)?;
        check_api_error(&response)?;
        response_text(&response)
    }

    fn describe(&self) -> String {
        let base = format!("OpenAI with Model: {}", self.config.model.as_str());
        match self.config.reasoning_effort {
            Some(effort) if self.config.model.is_reasoning() => {
                format!("{}, Reasoning Effort: {}", base, effort.as_str())
            }
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::configs::{OpenAiModel, ReasoningEffort};
    use mockito::Matcher;

    fn provider_for(server: &mockito::ServerGuard, model: OpenAiModel) -> OpenAiProvider {
        let mut config = OpenAiProviderConfig::new("test_api_key".to_string(), model);
        config.host = server.url();
        OpenAiProvider::new(config).unwrap()
    }

    fn reply_body(text: &str) -> String {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 15, "total_tokens": 27}
        })
        .to_string()
    }

    #[test]
    fn test_complete_basic() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "Hello?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_body("Hello! How can I assist you today?"))
            .create();

        let provider = provider_for(&server, OpenAiModel::Gpt35Turbo);
        let messages = [
            Message::system("You are a helpful assistant."),
            Message::user("Hello?"),
        ];

        let reply = provider.complete(&messages).unwrap();
        assert_eq!(reply, "Hello! How can I assist you today?");
        mock.assert();
    }

    #[test]
    fn test_reasoning_effort_sent_for_reasoning_model() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({
                "model": "o3-mini",
                "reasoning_effort": "high"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_body("ok"))
            .create();

        let mut config = OpenAiProviderConfig::new("test_api_key".to_string(), OpenAiModel::O3Mini)
            .with_reasoning_effort(ReasoningEffort::High);
        config.host = server.url();
        let provider = OpenAiProvider::new(config).unwrap();

        provider.complete(&[Message::user("hi")]).unwrap();
        mock.assert();
    }

    #[test]
    fn test_reasoning_effort_omitted_for_chat_model() {
        let mut server = mockito::Server::new();
        // Exact-body match: a payload carrying reasoning_effort would not hit
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Json(json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_body("ok"))
            .create();

        let mut config = OpenAiProviderConfig::new("test_api_key".to_string(), OpenAiModel::Gpt4o)
            .with_reasoning_effort(ReasoningEffort::High);
        config.host = server.url();
        let provider = OpenAiProvider::new(config).unwrap();

        provider.complete(&[Message::user("hi")]).unwrap();
        mock.assert();
    }

    #[test]
    fn test_server_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .create();

        let provider = provider_for(&server, OpenAiModel::Gpt35Turbo);
        let err = provider.complete(&[Message::user("hi")]).unwrap_err();
        assert!(matches!(err, ProviderError::Server(status) if status.as_u16() == 500));
    }

    #[test]
    fn test_api_error_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"error": {"message": "model overloaded"}}).to_string())
            .create();

        let provider = provider_for(&server, OpenAiModel::Gpt35Turbo);
        let err = provider.complete(&[Message::user("hi")]).unwrap_err();
        assert!(matches!(err, ProviderError::Api(_)));
    }

    #[test]
    fn test_empty_conversation_rejected() {
        let server = mockito::Server::new();
        let provider = provider_for(&server, OpenAiModel::Gpt35Turbo);
        let err = provider.complete(&[]).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyConversation));
    }

    #[test]
    fn test_describe() {
        let config = OpenAiProviderConfig::new("k".to_string(), OpenAiModel::O1)
            .with_reasoning_effort(ReasoningEffort::Low);
        let provider = OpenAiProvider::new(config).unwrap();
        assert_eq!(provider.describe(), "OpenAI with Model: o1, Reasoning Effort: low");

        let config = OpenAiProviderConfig::new("k".to_string(), OpenAiModel::O1Mini)
            .with_reasoning_effort(ReasoningEffort::Low);
        let provider = OpenAiProvider::new(config).unwrap();
        // o1-mini is not a reasoning model, so the effort is not reported
        assert_eq!(provider.describe(), "OpenAI with Model: o1-mini");
    }
}

use serde_json::{json, Value};

use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

/// Convert internal Message format to the chat-completions message
/// specification shared by both backend families
pub fn messages_to_chat_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.content,
            })
        })
        .collect()
}

/// Extract the reply text from a chat-completions response
pub fn response_text(response: &Value) -> ProviderResult<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(|content| content.as_str())
        .map(|text| text.to_string())
        .ok_or_else(|| {
            ProviderError::MalformedResponse(format!(
                "no message content in response: {}",
                response
            ))
        })
}

/// Surface an `error` object returned in an otherwise-OK response body
pub fn check_api_error(response: &Value) -> ProviderResult<()> {
    match response.get("error") {
        Some(error) => Err(ProviderError::Api(error.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_to_chat_spec() {
        let messages = [
            Message::system("You are a helpful assistant."),
            Message::user("What is the capital of France?"),
        ];

        let spec = messages_to_chat_spec(&messages);
        assert_eq!(
            spec,
            vec![
                json!({"role": "system", "content": "You are a helpful assistant."}),
                json!({"role": "user", "content": "What is the capital of France?"}),
            ]
        );
    }

    #[test]
    fn test_response_text() {
        let response = json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Paris."},
                "finish_reason": "stop"
            }]
        });

        assert_eq!(response_text(&response).unwrap(), "Paris.");
    }

    #[test]
    fn test_response_text_missing_content() {
        let response = json!({"choices": []});
        let err = response_text(&response).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn test_check_api_error() {
        assert!(check_api_error(&json!({"choices": []})).is_ok());

        let err = check_api_error(&json!({"error": {"message": "boom"}})).unwrap_err();
        assert!(matches!(err, ProviderError::Api(_)));
    }
}
